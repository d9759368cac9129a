//! # Doctor Repository
//!
//! Prescribing doctors. Only active doctors are offered to the pharmacist.

use sqlx::SqlitePool;

use crate::error::DbResult;
use salma_core::Doctor;

/// Repository for doctors.
#[derive(Debug, Clone)]
pub struct DoctorRepository {
    pool: SqlitePool,
}

impl DoctorRepository {
    /// Creates a new DoctorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DoctorRepository { pool }
    }

    /// Lists active doctors ordered by name.
    pub async fn list_active(&self) -> DbResult<Vec<Doctor>> {
        let doctors = sqlx::query_as::<_, Doctor>(
            r#"
            SELECT id, name, specialization
            FROM doctors
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(doctors)
    }

    /// Inserts an active doctor (seed binary and tests).
    pub async fn insert(&self, doctor: &Doctor) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO doctors (id, name, specialization, is_active) VALUES (?1, ?2, ?3, 1)",
        )
        .bind(&doctor.id)
        .bind(&doctor.name)
        .bind(&doctor.specialization)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::test_db;

    #[tokio::test]
    async fn test_list_active_skips_inactive() {
        let db = test_db().await;
        db.doctors()
            .insert(&Doctor {
                id: "d1".to_string(),
                name: "dr. Rina".to_string(),
                specialization: None,
            })
            .await
            .unwrap();
        db.doctors()
            .insert(&Doctor {
                id: "d2".to_string(),
                name: "dr. Andi".to_string(),
                specialization: Some("Anak".to_string()),
            })
            .await
            .unwrap();
        sqlx::query("INSERT INTO doctors (id, name, is_active) VALUES ('d3', 'dr. Lama', 0)")
            .execute(db.pool())
            .await
            .unwrap();

        let doctors = db.doctors().list_active().await.unwrap();
        let ids: Vec<&str> = doctors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d2", "d1"]);
    }
}
