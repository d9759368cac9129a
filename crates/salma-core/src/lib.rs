//! # salma-core: Pure Business Logic for the SALMA Pharmacy Backend
//!
//! This crate holds the pharmacy's business rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SALMA Pharmacy Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Frontend (pharmacist + cashier screens)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    salma-server (axum)                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ salma-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   cart    │  │ validation│  │   │
//! │  │   │ Medicine  │  │ selling   │  │ CartLine  │  │  submit   │  │   │
//! │  │   │ Invoice   │  │  price    │  │ qty rules │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 salma-db (SQLite repositories)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, Prescription, Invoice, etc.)
//! - [`money`] - Money type in whole Rupiah units
//! - [`pricing`] - Selling price derivation (HNA + margin + tax, rounded up)
//! - [`cart`] - Submission request shape and line normalization
//! - [`error`] - Domain error types
//! - [`validation`] - Submission and query validation
//!
//! ## Example Usage
//!
//! ```rust
//! use salma_core::pricing::selling_price;
//! use salma_core::Medicine;
//!
//! let paracetamol = Medicine {
//!     id: "med-1".to_string(),
//!     name: "Paracetamol 500mg".to_string(),
//!     stock: 120,
//!     hna_price: Some(1000.0),
//!     margin_percentage: Some(10.0),
//!     tax_rate: Some(11.0),
//!     kfa_code: None,
//! };
//!
//! // 1000 + 10% margin = 1100, + 11% tax = 1221
//! assert_eq!(selling_price(&paracetamol).units(), 1221);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLine, SubmitPrescription};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Dosage instruction written on every prescription line.
///
/// The pharmacist screen does not collect a per-line instruction yet, so
/// every line gets the standard "once a day, as directed" label.
pub const DEFAULT_DOSAGE_INSTRUCTION: &str = "1x1 Sesuai Anjuran";

/// Invoice item code used when a medicine has no KFA catalog code.
pub const FALLBACK_ITEM_CODE: &str = "GENERIC";

/// Quantity used when a cart line carries no usable quantity.
pub const DEFAULT_LINE_QUANTITY: i64 = 1;
