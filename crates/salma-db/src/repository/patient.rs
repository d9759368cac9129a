//! # Patient Repository
//!
//! Patient registry reads for the pharmacist's patient picker.

use sqlx::SqlitePool;

use crate::error::DbResult;
use salma_core::Patient;

/// Repository for patients.
#[derive(Debug, Clone)]
pub struct PatientRepository {
    pool: SqlitePool,
}

impl PatientRepository {
    /// Creates a new PatientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PatientRepository { pool }
    }

    /// Lists all patients ordered by full name.
    pub async fn list_all(&self) -> DbResult<Vec<Patient>> {
        let patients = sqlx::query_as::<_, Patient>(
            "SELECT id, full_name, mr_no FROM patients ORDER BY full_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(patients)
    }

    /// Inserts a patient (seed binary and tests).
    pub async fn insert(&self, patient: &Patient) -> DbResult<()> {
        sqlx::query("INSERT INTO patients (id, full_name, mr_no) VALUES (?1, ?2, ?3)")
            .bind(&patient.id)
            .bind(&patient.full_name)
            .bind(&patient.mr_no)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::test_support::test_db;

    fn patient(id: &str, name: &str, mr_no: &str) -> Patient {
        Patient {
            id: id.to_string(),
            full_name: name.to_string(),
            mr_no: Some(mr_no.to_string()),
        }
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_full_name() {
        let db = test_db().await;
        db.patients().insert(&patient("p2", "Wati", "MR-2")).await.unwrap();
        db.patients().insert(&patient("p1", "Agus", "MR-1")).await.unwrap();

        let patients = db.patients().list_all().await.unwrap();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].full_name, "Agus");
        assert_eq!(patients[1].mr_no.as_deref(), Some("MR-2"));
    }

    #[tokio::test]
    async fn test_duplicate_mr_no_is_unique_violation() {
        let db = test_db().await;
        db.patients().insert(&patient("p1", "Agus", "MR-1")).await.unwrap();

        let err = db
            .patients()
            .insert(&patient("p2", "Agus Kedua", "MR-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert!(err.is_unique_violation_on("mr_no"));
    }
}
