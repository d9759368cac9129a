//! # Error Types
//!
//! Domain-specific error types for salma-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  salma-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  salma-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (in server app)                                           │
//! │  └── ApiError         - kind + message, mapped to a status code        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A cart line references a drug that is not in the catalog.
    ///
    /// ## When This Occurs
    /// - Drug was removed from the catalog after the pharmacist listed it
    /// - Client posted a made-up or mistyped id
    ///
    /// Aborts the whole submission.
    #[error("Medicine {0} not found in catalog")]
    MedicineNotFound(String),

    /// The invoice total does not fit the currency type.
    #[error("Invoice total overflows at line {line}")]
    TotalOverflow { line: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when client input doesn't meet requirements and are
/// raised before anything is written.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The submitted cart has no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A cart line has neither `drug_id` nor `id`.
    #[error("Cart line {line} has no drug reference")]
    MissingDrugReference { line: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MedicineNotFound("a1b2".to_string());
        assert_eq!(err.to_string(), "Medicine a1b2 not found in catalog");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::EmptyCart.to_string(), "Cart is empty");

        let err = ValidationError::Required {
            field: "patient_id".to_string(),
        };
        assert_eq!(err.to_string(), "patient_id is required");

        let err = ValidationError::MissingDrugReference { line: 2 };
        assert_eq!(err.to_string(), "Cart line 2 has no drug reference");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::EmptyCart.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
