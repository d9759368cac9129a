//! # Repository Module
//!
//! Database repository implementations for the pharmacy backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who Reads and Who Writes                             │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.prescriptions().submit(&request)                           │
//! │       ▼                                                                 │
//! │  PrescriptionRepository ──── the only writer ────┐                     │
//! │       │ reads catalog inside its transaction     │                     │
//! │       ▼                                          ▼                     │
//! │  medicines            prescriptions + details   invoices + details     │
//! │       ▲                                          │                     │
//! │       │                                          │                     │
//! │  MedicineRepository   PatientRepository          InvoiceRepository     │
//! │  (drug list)          DoctorRepository           (cashier reads)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`medicine::MedicineRepository`] - Drug catalog
//! - [`patient::PatientRepository`] - Patient registry
//! - [`doctor::DoctorRepository`] - Prescribing doctors
//! - [`prescription::PrescriptionRepository`] - Atomic prescription submission
//! - [`invoice::InvoiceRepository`] - Unpaid bill search and bill details

pub mod doctor;
pub mod invoice;
pub mod medicine;
pub mod patient;
pub mod prescription;

/// Fixtures shared by the repository tests.
#[cfg(test)]
pub(crate) mod test_support {
    use salma_core::{Doctor, Medicine, Patient};

    use crate::pool::{Database, DbConfig};

    /// Fresh migrated in-memory database.
    pub async fn test_db() -> Database {
        Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database")
    }

    pub fn medicine(
        id: &str,
        name: &str,
        hna: f64,
        margin: f64,
        tax: f64,
        kfa_code: Option<&str>,
    ) -> Medicine {
        Medicine {
            id: id.to_string(),
            name: name.to_string(),
            stock: 100,
            hna_price: Some(hna),
            margin_percentage: Some(margin),
            tax_rate: Some(tax),
            kfa_code: kfa_code.map(str::to_string),
        }
    }

    /// Seeds two medicines, one patient and one active doctor.
    ///
    /// | id     | hna  | margin | tax | kfa      | price |
    /// |--------|------|--------|-----|----------|-------|
    /// | med-a  | 1000 | 10     | 11  | KFA-001  | 1221  |
    /// | med-b  | 333  | 5      | 7   | (none)   | 375   |
    pub async fn seed_catalog(db: &Database) {
        db.medicines()
            .insert(&medicine("med-a", "Paracetamol 500mg", 1000.0, 10.0, 11.0, Some("KFA-001")))
            .await
            .unwrap();
        db.medicines()
            .insert(&medicine("med-b", "Vitamin C 100mg", 333.0, 5.0, 7.0, None))
            .await
            .unwrap();
        db.patients()
            .insert(&Patient {
                id: "pat-1".to_string(),
                full_name: "Siti Rahma".to_string(),
                mr_no: Some("MR-0001".to_string()),
            })
            .await
            .unwrap();
        db.doctors()
            .insert(&Doctor {
                id: "doc-1".to_string(),
                name: "dr. Budi Santoso".to_string(),
                specialization: Some("Umum".to_string()),
            })
            .await
            .unwrap();
    }

    /// Row count of `table`.
    pub async fn count_rows(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }
}
