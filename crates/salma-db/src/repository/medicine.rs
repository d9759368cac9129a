//! # Medicine Repository
//!
//! Read access to the drug catalog.
//!
//! ## Decimal Columns
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  hna_price / margin_percentage / tax_rate are NUMERIC columns that the  │
//! │  back office fills in by hand. They are always read through            │
//! │  CAST(... AS REAL):                                                     │
//! │                                                                         │
//! │    stored value     CAST result     Medicine field                      │
//! │    ────────────     ───────────     ──────────────                      │
//! │    1000             1000.0          Some(1000.0)                        │
//! │    '12.5'           12.5            Some(12.5)                          │
//! │    'n/a'            0.0             Some(0.0)                           │
//! │    NULL             NULL            None  → priced as 0                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use salma_core::Medicine;

/// Repository for the drug catalog.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MedicineRepository::new(pool);
///
/// let all = repo.list_all().await?;
/// let one = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Lists every medicine ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Medicine>> {
        let medicines = sqlx::query_as::<_, Medicine>(
            r#"
            SELECT
                id,
                name,
                stock,
                CAST(hna_price AS REAL) AS hna_price,
                CAST(margin_percentage AS REAL) AS margin_percentage,
                CAST(tax_rate AS REAL) AS tax_rate,
                kfa_code
            FROM medicines
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = medicines.len(), "Listed medicines");
        Ok(medicines)
    }

    /// Gets a medicine by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Medicine))` - Medicine found
    /// * `Ok(None)` - Medicine not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Medicine>> {
        find_medicine(&self.pool, id).await
    }

    /// Inserts a catalog entry.
    ///
    /// The catalog is owned by the back office; this is used by the seed
    /// binary and tests.
    pub async fn insert(&self, medicine: &Medicine) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO medicines (
                id, name, stock, hna_price, margin_percentage, tax_rate, kfa_code
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&medicine.id)
        .bind(&medicine.name)
        .bind(medicine.stock)
        .bind(medicine.hna_price)
        .bind(medicine.margin_percentage)
        .bind(medicine.tax_rate)
        .bind(&medicine.kfa_code)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns the number of catalog entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Looks up one medicine on any executor.
///
/// The submission transaction calls this with its own connection so the
/// lookup sees the same snapshot as the rows it writes.
pub(crate) async fn find_medicine<'e, E>(executor: E, id: &str) -> DbResult<Option<Medicine>>
where
    E: SqliteExecutor<'e>,
{
    let medicine = sqlx::query_as::<_, Medicine>(
        r#"
        SELECT
            id,
            name,
            stock,
            CAST(hna_price AS REAL) AS hna_price,
            CAST(margin_percentage AS REAL) AS margin_percentage,
            CAST(tax_rate AS REAL) AS tax_rate,
            kfa_code
        FROM medicines
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(medicine)
}
