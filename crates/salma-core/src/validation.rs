//! # Validation Module
//!
//! Input validation for prescription submissions and cashier queries.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum)                                                  │
//! │  └── JSON shape (deserialization into SubmitPrescription)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Cart must have lines                                              │
//! │  ├── Patient must be chosen                                            │
//! │  └── Every line must reference a drug                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── Drug must exist (checked inside the transaction)                  │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in here touches storage, so a rejected submission is
//! guaranteed to have written nothing.

use crate::cart::{reference_from_value, PreparedLine, PreparedSubmission, SubmitPrescription};
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted cashier search keyword.
const MAX_KEYWORD_LEN: usize = 100;

/// Longest accepted idempotency key.
const MAX_IDEMPOTENCY_KEY_LEN: usize = 200;

// =============================================================================
// Submission
// =============================================================================

/// Validates a prescription submission and resolves its lines.
///
/// ## Rules
/// - The cart must contain at least one line
/// - A patient must be given
/// - Every line must carry `drug_id` or `id`
/// - A blank doctor reference means "no doctor"
///
/// ## Example
/// ```rust
/// use salma_core::validation::validate_submission;
/// use salma_core::SubmitPrescription;
///
/// let request = SubmitPrescription::for_patient("p1").item("m1", 2);
/// let prepared = validate_submission(&request).unwrap();
/// assert_eq!(prepared.lines[0].qty, 2);
///
/// assert!(validate_submission(&SubmitPrescription::for_patient("p1")).is_err());
/// ```
pub fn validate_submission(request: &SubmitPrescription) -> ValidationResult<PreparedSubmission> {
    if request.lines().is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    let patient_id = request
        .patient_id
        .as_ref()
        .and_then(reference_from_value)
        .ok_or_else(|| ValidationError::Required {
            field: "patient_id".to_string(),
        })?;

    let doctor_id = request.doctor_id.as_ref().and_then(reference_from_value);

    let lines = request
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| -> ValidationResult<PreparedLine> {
            let drug_id = line
                .drug_ref()
                .ok_or(ValidationError::MissingDrugReference { line: index + 1 })?;
            Ok(PreparedLine {
                drug_id,
                qty: line.quantity(),
            })
        })
        .collect::<ValidationResult<Vec<_>>>()?;

    let idempotency_key = match request.idempotency_key.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(key) if key.len() > MAX_IDEMPOTENCY_KEY_LEN => {
            return Err(ValidationError::TooLong {
                field: "idempotency key".to_string(),
                max: MAX_IDEMPOTENCY_KEY_LEN,
            })
        }
        Some(key) => Some(key.to_string()),
    };

    Ok(PreparedSubmission {
        patient_id,
        doctor_id,
        lines,
        idempotency_key,
    })
}

// =============================================================================
// Cashier Search
// =============================================================================

/// Validates the cashier's bill search keyword.
///
/// ## Rules
/// - Must be present and not blank
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed keyword.
pub fn validate_search_keyword(keyword: Option<&str>) -> ValidationResult<String> {
    let keyword = keyword.map(str::trim).unwrap_or_default();

    if keyword.is_empty() {
        return Err(ValidationError::Required {
            field: "keyword".to_string(),
        });
    }

    if keyword.len() > MAX_KEYWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "keyword".to_string(),
            max: MAX_KEYWORD_LEN,
        });
    }

    Ok(keyword.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
