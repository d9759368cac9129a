//! # Prescription Repository
//!
//! The prescription submission transaction: one cart in, one prescription
//! and one invoice out, both complete or neither present.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    submit(&SubmitPrescription)                          │
//! │                                                                         │
//! │  validate_submission()          ← empty cart / no patient: no writes    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN IMMEDIATE ───────────────────────────────────────────────────┐   │
//! │  │ idempotency key seen before? ──yes──► earlier receipt (replayed) │   │
//! │  │ INSERT prescriptions (processed)                                 │   │
//! │  │ INSERT invoices (total_amount = 0, unpaid)                       │   │
//! │  │ for each line:                                                   │   │
//! │  │    SELECT medicine  ──none──► abort "Medicine .. not found"      │   │
//! │  │    price = selling_price(medicine)                               │   │
//! │  │    total += price × qty        (checked)                         │   │
//! │  │    INSERT prescription_details (price_snapshot = price)          │   │
//! │  │    INSERT invoice_details      (price = price, GENERIC fallback) │   │
//! │  │ UPDATE invoices SET total_amount = total                         │   │
//! │  COMMIT ────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SubmissionReceipt { invoice_id, prescription_id, total_amount, .. }    │
//! │                                                                         │
//! │  Any error inside BEGIN..COMMIT: ROLLBACK, log, return the error.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every statement inside the unit of work runs on the transaction's own
//! connection, including the catalog lookups.
//!
//! The transaction takes SQLite's write lock up front, before the idempotency
//! read. Concurrent submissions queue on the busy timeout instead of failing
//! with `SQLITE_BUSY`.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::invoice::find_receipt_by_key;
use crate::repository::medicine::find_medicine;
use salma_core::cart::PreparedSubmission;
use salma_core::pricing::selling_price;
use salma_core::validation::validate_submission;
use salma_core::{
    CoreError, InvoiceStatus, Money, Prescription, PrescriptionDetail, PrescriptionStatus,
    SubmissionReceipt, SubmitPrescription,
    DEFAULT_DOSAGE_INSTRUCTION, FALLBACK_ITEM_CODE, ITEM_TYPE_DRUG,
};

/// Repository owning the prescription submission transaction.
///
/// ## Usage
/// ```rust,ignore
/// let request = SubmitPrescription::for_patient(patient_id)
///     .doctor(doctor_id)
///     .item(paracetamol_id, 2)
///     .item(vitamin_c_id, 1);
///
/// let receipt = db.prescriptions().submit(&request).await?;
/// println!("Invoice {} for {}", receipt.invoice_id, receipt.total_amount);
/// ```
#[derive(Debug, Clone)]
pub struct PrescriptionRepository {
    pool: SqlitePool,
}

impl PrescriptionRepository {
    /// Creates a new PrescriptionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PrescriptionRepository { pool }
    }

    /// Submits a prescription cart atomically.
    ///
    /// ## Errors
    /// * `DbError::Domain(CoreError::Validation(_))` - cart shape rejected, nothing written
    /// * `DbError::Domain(CoreError::MedicineNotFound(_))` - unknown drug, rolled back
    /// * `DbError::Domain(CoreError::TotalOverflow { .. })` - total out of range, rolled back
    /// * `DbError::ForeignKeyViolation` - unknown patient or doctor, rolled back
    /// * other `DbError` - store failure, rolled back
    ///
    /// ## Idempotency
    /// A request carrying an idempotency key that was already used returns
    /// the first submission's receipt with `replayed = true`. Racing
    /// requests with the same key are serialized by the write lock, so the
    /// later one sees the earlier receipt. Should one still trip the unique
    /// index, it rolls back and returns the winner's receipt.
    pub async fn submit(&self, request: &SubmitPrescription) -> DbResult<SubmissionReceipt> {
        let prepared = validate_submission(request)?;

        match self.run_submission(&prepared).await {
            Err(err) if err.is_unique_violation_on("idempotency_key") => {
                let Some(key) = prepared.idempotency_key.as_deref() else {
                    return Err(err);
                };
                warn!(idempotency_key = %key, "Concurrent duplicate submission, returning first receipt");
                match find_receipt_by_key(&self.pool, key).await? {
                    Some(receipt) => Ok(receipt),
                    None => Err(err),
                }
            }
            other => other,
        }
    }

    /// Gets a prescription header by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Prescription>> {
        let prescription = sqlx::query_as::<_, Prescription>(
            "SELECT id, patient_id, doctor_id, status, created_at FROM prescriptions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prescription)
    }

    /// Gets the lines of a prescription in cart order.
    pub async fn get_details(&self, prescription_id: &str) -> DbResult<Vec<PrescriptionDetail>> {
        let details = sqlx::query_as::<_, PrescriptionDetail>(
            r#"
            SELECT id, prescription_id, medicine_id, qty, dosage_instruction, price_snapshot
            FROM prescription_details
            WHERE prescription_id = ?1
            ORDER BY line_no
            "#,
        )
        .bind(prescription_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// Opens the transaction, runs the writes, and commits or rolls back.
    async fn run_submission(&self, prepared: &PreparedSubmission) -> DbResult<SubmissionReceipt> {
        let prescription_id = Uuid::new_v4().to_string();
        let invoice_id = Uuid::new_v4().to_string();

        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        match write_submission(&mut *tx, prepared, &prescription_id, &invoice_id).await {
            Ok(receipt) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

                if receipt.replayed {
                    info!(
                        invoice_id = %receipt.invoice_id,
                        "Idempotent replay of an earlier submission"
                    );
                } else {
                    info!(
                        invoice_id = %receipt.invoice_id,
                        prescription_id = %receipt.prescription_id,
                        lines = receipt.line_count,
                        total = %receipt.total_amount,
                        "Prescription submitted"
                    );
                }
                Ok(receipt)
            }
            Err(err) => {
                error!(
                    prescription_id = %prescription_id,
                    patient_id = %prepared.patient_id,
                    error = %err,
                    "Prescription submission failed, rolling back"
                );
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// All reads and writes of one submission, on the transaction's connection.
async fn write_submission(
    conn: &mut SqliteConnection,
    prepared: &PreparedSubmission,
    prescription_id: &str,
    invoice_id: &str,
) -> DbResult<SubmissionReceipt> {
    if let Some(key) = prepared.idempotency_key.as_deref() {
        if let Some(receipt) = find_receipt_by_key(&mut *conn, key).await? {
            let first_patient: Option<String> =
                sqlx::query_scalar("SELECT patient_id FROM invoices WHERE id = ?1")
                    .bind(&receipt.invoice_id)
                    .fetch_optional(&mut *conn)
                    .await?;

            if first_patient.as_deref() != Some(prepared.patient_id.as_str())
                || receipt.line_count != prepared.lines.len()
            {
                warn!(
                    idempotency_key = %key,
                    invoice_id = %receipt.invoice_id,
                    patient_id = %prepared.patient_id,
                    lines = prepared.lines.len(),
                    "Idempotency key reused for a different cart, returning first receipt"
                );
            }
            return Ok(receipt);
        }
    }

    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO prescriptions (id, patient_id, doctor_id, status, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(prescription_id)
    .bind(&prepared.patient_id)
    .bind(&prepared.doctor_id)
    .bind(PrescriptionStatus::Processed)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO invoices (
            id, patient_id, total_amount, status, idempotency_key, prescription_id, created_at
        ) VALUES (?1, ?2, 0, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(invoice_id)
    .bind(&prepared.patient_id)
    .bind(InvoiceStatus::Unpaid)
    .bind(&prepared.idempotency_key)
    .bind(prescription_id)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    let mut running_total = Money::zero();

    for (index, line) in prepared.lines.iter().enumerate() {
        let line_no = index + 1;

        let medicine = find_medicine(&mut *conn, &line.drug_id)
            .await?
            .ok_or_else(|| CoreError::MedicineNotFound(line.drug_id.clone()))?;

        let price = selling_price(&medicine);
        running_total = price
            .checked_mul_quantity(line.qty)
            .and_then(|line_total| running_total.checked_add(line_total))
            .ok_or(CoreError::TotalOverflow { line: line_no })?;

        debug!(
            line = line_no,
            medicine_id = %medicine.id,
            qty = line.qty,
            price = %price,
            "Priced prescription line"
        );

        sqlx::query(
            r#"
            INSERT INTO prescription_details (
                id, prescription_id, medicine_id, qty, dosage_instruction, price_snapshot, line_no
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(prescription_id)
        .bind(&medicine.id)
        .bind(line.qty)
        .bind(DEFAULT_DOSAGE_INSTRUCTION)
        .bind(price.units())
        .bind(line_no as i64)
        .execute(&mut *conn)
        .await?;

        let item_code = medicine
            .kfa_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(FALLBACK_ITEM_CODE);

        sqlx::query(
            r#"
            INSERT INTO invoice_details (
                id, invoice_id, item_code, item_name, item_type, qty, price, line_no
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(invoice_id)
        .bind(item_code)
        .bind(&medicine.name)
        .bind(ITEM_TYPE_DRUG)
        .bind(line.qty)
        .bind(price.units())
        .bind(line_no as i64)
        .execute(&mut *conn)
        .await?;
    }

    sqlx::query("UPDATE invoices SET total_amount = ?1 WHERE id = ?2")
        .bind(running_total.units())
        .bind(invoice_id)
        .execute(&mut *conn)
        .await?;

    Ok(SubmissionReceipt {
        invoice_id: invoice_id.to_string(),
        prescription_id: prescription_id.to_string(),
        total_amount: running_total,
        line_count: prepared.lines.len(),
        replayed: false,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{count_rows, medicine, seed_catalog, test_db};
    use crate::{Database, DbConfig};
    use salma_core::{CartLine, ValidationError};
    use serde_json::json;

    const WRITTEN_TABLES: [&str; 4] = [
        "prescriptions",
        "prescription_details",
        "invoices",
        "invoice_details",
    ];

    async fn assert_nothing_written(db: &Database) {
        for table in WRITTEN_TABLES {
            assert_eq!(count_rows(db, table).await, 0, "{} should be empty", table);
        }
    }

    #[tokio::test]
    async fn test_submit_writes_both_aggregates() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let request = SubmitPrescription::for_patient("pat-1")
            .doctor("doc-1")
            .item("med-a", 2)
            .item("med-b", 1);
        let receipt = db.prescriptions().submit(&request).await.unwrap();

        assert_eq!(receipt.total_amount.units(), 2 * 1221 + 375);
        assert_eq!(receipt.line_count, 2);
        assert!(!receipt.replayed);

        assert_eq!(count_rows(&db, "prescriptions").await, 1);
        assert_eq!(count_rows(&db, "prescription_details").await, 2);
        assert_eq!(count_rows(&db, "invoices").await, 1);
        assert_eq!(count_rows(&db, "invoice_details").await, 2);

        let prescription = db
            .prescriptions()
            .get_by_id(&receipt.prescription_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(prescription.status, PrescriptionStatus::Processed);
        assert_eq!(prescription.patient_id, "pat-1");
        assert_eq!(prescription.doctor_id.as_deref(), Some("doc-1"));

        let details = db
            .prescriptions()
            .get_details(&receipt.prescription_id)
            .await
            .unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].medicine_id, "med-a");
        assert_eq!(details[0].qty, 2);
        assert_eq!(details[0].price().units(), 1221);
        assert_eq!(details[1].price_snapshot, 375);
        assert!(details
            .iter()
            .all(|d| d.dosage_instruction == DEFAULT_DOSAGE_INSTRUCTION));

        let invoice = db.invoices().get_by_id(&receipt.invoice_id).await.unwrap().unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Unpaid);
        assert_eq!(invoice.patient_id, "pat-1");
    }

    #[tokio::test]
    async fn test_total_equals_sum_of_invoice_lines() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let request = SubmitPrescription::for_patient("pat-1")
            .item("med-a", 3)
            .item("med-b", 4)
            .item("med-a", 1);
        let receipt = db.prescriptions().submit(&request).await.unwrap();

        let items = db.invoices().get_items(&receipt.invoice_id).await.unwrap();
        let sum: Money = items.iter().map(|item| item.line_total()).sum();
        let invoice = db.invoices().get_by_id(&receipt.invoice_id).await.unwrap().unwrap();

        assert_eq!(invoice.total(), sum);
        assert_eq!(receipt.total_amount, sum);
        assert_eq!(sum.units(), 4 * 1221 + 4 * 375);
    }

    #[tokio::test]
    async fn test_unknown_drug_rolls_back_everything() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let request = SubmitPrescription::for_patient("pat-1")
            .item("med-a", 1)
            .item("med-b", 2)
            .item("med-ghost", 1);
        let err = db.prescriptions().submit(&request).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::Domain(CoreError::MedicineNotFound(ref id)) if id == "med-ghost"
        ));
        assert!(err.to_string().contains("med-ghost"));
        assert_nothing_written(&db).await;
    }

    #[tokio::test]
    async fn test_empty_cart_persists_nothing() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let err = db
            .prescriptions()
            .submit(&SubmitPrescription::for_patient("pat-1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Domain(CoreError::Validation(ValidationError::EmptyCart))
        ));
        assert_nothing_written(&db).await;
    }

    #[tokio::test]
    async fn test_unknown_patient_rolls_back() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let err = db
            .prescriptions()
            .submit(&SubmitPrescription::for_patient("pat-ghost").item("med-a", 1))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_nothing_written(&db).await;
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_catalog_change() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let receipt = db
            .prescriptions()
            .submit(&SubmitPrescription::for_patient("pat-1").item("med-a", 2))
            .await
            .unwrap();

        sqlx::query(
            "UPDATE medicines SET margin_percentage = 50, tax_rate = 20 WHERE id = 'med-a'",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let details = db
            .prescriptions()
            .get_details(&receipt.prescription_id)
            .await
            .unwrap();
        assert_eq!(details[0].price_snapshot, 1221);
        let bill = db.invoices().bill_details(&receipt.prescription_id).await.unwrap();
        assert_eq!(bill.items[0].price, 1221);
        let items = db.invoices().get_items(&receipt.invoice_id).await.unwrap();
        assert_eq!(items[0].price, 1221);
        let invoice = db.invoices().get_by_id(&receipt.invoice_id).await.unwrap().unwrap();
        assert_eq!(invoice.total_amount, 2442);

        // New submissions see the new price
        let next = db
            .prescriptions()
            .submit(&SubmitPrescription::for_patient("pat-1").item("med-a", 1))
            .await
            .unwrap();
        assert_eq!(next.total_amount.units(), 1800);
    }

    #[tokio::test]
    async fn test_item_code_falls_back_to_generic() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let receipt = db
            .prescriptions()
            .submit(
                &SubmitPrescription::for_patient("pat-1")
                    .item("med-a", 1)
                    .item("med-b", 1),
            )
            .await
            .unwrap();

        let items = db.invoices().get_items(&receipt.invoice_id).await.unwrap();
        assert_eq!(items[0].item_code, "KFA-001");
        assert_eq!(items[1].item_code, FALLBACK_ITEM_CODE);
        assert!(items.iter().all(|i| i.item_type == ITEM_TYPE_DRUG));
        assert_eq!(items[1].item_name, "Vitamin C 100mg");
    }

    #[tokio::test]
    async fn test_idempotent_replay_returns_same_invoice() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let request = SubmitPrescription::for_patient("pat-1")
            .item("med-a", 1)
            .idempotency_key("retry-42");

        let first = db.prescriptions().submit(&request).await.unwrap();
        let second = db.prescriptions().submit(&request).await.unwrap();

        assert!(!first.replayed);
        assert!(second.replayed);
        assert_eq!(first.invoice_id, second.invoice_id);
        assert_eq!(first.prescription_id, second.prescription_id);
        assert_eq!(first.total_amount, second.total_amount);
        assert_eq!(count_rows(&db, "invoices").await, 1);
        assert_eq!(count_rows(&db, "prescriptions").await, 1);
    }

    #[tokio::test]
    async fn test_reused_key_with_different_cart_returns_first_receipt() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let first = db
            .prescriptions()
            .submit(
                &SubmitPrescription::for_patient("pat-1")
                    .item("med-a", 1)
                    .idempotency_key("retry-43"),
            )
            .await
            .unwrap();
        let second = db
            .prescriptions()
            .submit(
                &SubmitPrescription::for_patient("pat-1")
                    .item("med-b", 5)
                    .item("med-a", 1)
                    .idempotency_key("retry-43"),
            )
            .await
            .unwrap();

        assert!(second.replayed);
        assert_eq!(second.invoice_id, first.invoice_id);
        assert_eq!(second.total_amount.units(), 1221);
        assert_eq!(count_rows(&db, "invoice_details").await, 1);
    }

    /// Migrated database in a temp file, shared by `max_connections` pooled
    /// connections.
    async fn file_db(dir: &tempfile::TempDir, max_connections: u32) -> Database {
        let config = DbConfig::new(dir.path().join("salma.db")).max_connections(max_connections);
        Database::new(config).await.unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_keyed_submissions_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_db(&dir, 8).await;
        seed_catalog(&db).await;

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = db.prescriptions();
                tokio::spawn(async move {
                    let request = SubmitPrescription::for_patient("pat-1")
                        .item("med-a", 1)
                        .item("med-b", 2)
                        .idempotency_key(format!("counter-1-{}", i));
                    repo.submit(&request).await
                })
            })
            .collect();

        for handle in handles {
            let receipt = handle.await.unwrap().unwrap();
            assert!(!receipt.replayed);
            assert_eq!(receipt.total_amount.units(), 1221 + 2 * 375);
        }

        assert_eq!(count_rows(&db, "invoices").await, 16);
        assert_eq!(count_rows(&db, "prescriptions").await, 16);
        assert_eq!(count_rows(&db, "invoice_details").await, 32);

        let mismatched: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM invoices i
            WHERE i.total_amount != (
                SELECT COALESCE(SUM(d.price * d.qty), 0)
                FROM invoice_details d WHERE d.invoice_id = i.id
            )
            "#,
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(mismatched, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_key_submissions_replay() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_db(&dir, 8).await;
        seed_catalog(&db).await;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = db.prescriptions();
                tokio::spawn(async move {
                    let request = SubmitPrescription::for_patient("pat-1")
                        .item("med-a", 2)
                        .idempotency_key("double-tap");
                    repo.submit(&request).await
                })
            })
            .collect();

        let mut receipts = Vec::new();
        for handle in handles {
            receipts.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(receipts.iter().filter(|r| !r.replayed).count(), 1);
        assert!(receipts
            .iter()
            .all(|r| r.invoice_id == receipts[0].invoice_id && r.total_amount.units() == 2442));
        assert_eq!(count_rows(&db, "invoices").await, 1);
        assert_eq!(count_rows(&db, "prescriptions").await, 1);
    }

    #[tokio::test]
    async fn test_without_key_every_submission_is_new() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let request = SubmitPrescription::for_patient("pat-1").item("med-a", 1);
        let first = db.prescriptions().submit(&request).await.unwrap();
        let second = db.prescriptions().submit(&request).await.unwrap();

        assert_ne!(first.invoice_id, second.invoice_id);
        assert_eq!(count_rows(&db, "invoices").await, 2);
    }

    #[tokio::test]
    async fn test_loose_cart_lines_are_normalized() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let request = SubmitPrescription {
            items: Some(vec![
                CartLine {
                    drug_id: None,
                    id: Some(json!("med-a")),
                    qty: Some(json!("2 strips")),
                },
                CartLine {
                    drug_id: Some(json!("med-b")),
                    id: None,
                    qty: Some(json!(0)),
                },
            ]),
            patient_id: Some(json!("pat-1")),
            doctor_id: Some(json!("")),
            idempotency_key: None,
        };
        let receipt = db.prescriptions().submit(&request).await.unwrap();

        let items = db.invoices().get_items(&receipt.invoice_id).await.unwrap();
        assert_eq!(items[0].qty, 2);
        assert_eq!(items[1].qty, 1);
        assert_eq!(receipt.total_amount.units(), 2 * 1221 + 375);
    }

    #[tokio::test]
    async fn test_overflowing_total_rolls_back() {
        let db = test_db().await;
        seed_catalog(&db).await;
        db.medicines()
            .insert(&medicine("med-gold", "Very Expensive", 1e17, 0.0, 0.0, None))
            .await
            .unwrap();

        let err = db
            .prescriptions()
            .submit(&SubmitPrescription::for_patient("pat-1").item("med-gold", 1000))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Domain(CoreError::TotalOverflow { line: 1 })
        ));
        assert_nothing_written(&db).await;
    }
}
