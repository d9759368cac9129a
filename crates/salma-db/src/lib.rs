//! # salma-db: Database Layer for the SALMA Pharmacy Backend
//!
//! This crate provides database access for the pharmacy backend.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SALMA Data Flow                                  │
//! │                                                                         │
//! │  HTTP handler (POST /api/submit-prescription)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     salma-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ MedicineRepository │  │            │  │   │
//! │  │   │ SqlitePool    │◄───│ PatientRepository  │  │ 001_init   │  │   │
//! │  │   │ Connection    │    │ DoctorRepository   │  │            │  │   │
//! │  │   │ Management    │    │ PrescriptionRepo   │  │            │  │   │
//! │  │   │               │    │ InvoiceRepository  │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (salma.db)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog reads, the submission transaction, bill reads
//!
//! ## Usage
//!
//! ```rust,ignore
//! use salma_core::SubmitPrescription;
//! use salma_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./salma.db")).await?;
//!
//! let request = SubmitPrescription::for_patient(patient_id).item(drug_id, 2);
//! let receipt = db.prescriptions().submit(&request).await?;
//!
//! let bill = db.invoices().bill_details(&receipt.prescription_id).await?;
//! assert_eq!(bill.grand_total, receipt.total_amount);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::doctor::DoctorRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::medicine::MedicineRepository;
pub use repository::patient::PatientRepository;
pub use repository::prescription::PrescriptionRepository;
