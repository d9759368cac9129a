//! # Invoice Repository
//!
//! Cashier-side reads over the records the submission transaction wrote.
//!
//! ## Cashier Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Cashier searches bills                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search_unpaid() ──► invoices WHERE status = 'unpaid'                  │
//! │                      newest first                                       │
//! │       │                                                                 │
//! │       │  picks one, opens its prescription                              │
//! │       ▼                                                                 │
//! │  bill_details(prescription_id)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prescription_details ⋈ medicines                                      │
//! │  ┌──────────────────┬─────┬───────┬──────────┐                         │
//! │  │ drug_name        │ qty │ price │ subtotal │                         │
//! │  ├──────────────────┼─────┼───────┼──────────┤                         │
//! │  │ Paracetamol      │  2  │ 1221  │   2442   │                         │
//! │  │ Vitamin C        │  1  │  375  │    375   │                         │
//! │  └──────────────────┴─────┴───────┴──────────┘                         │
//! │                              grand_total = 2817 = invoice.total_amount │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices come from the frozen snapshots, never from the current catalog.

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use salma_core::{BillDetails, BillLine, Invoice, InvoiceDetail, InvoiceStatus, Money, SubmissionReceipt};

/// Repository for invoices and bill read models.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Lists unpaid invoices, newest first.
    pub async fn search_unpaid(&self) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, patient_id, total_amount, status, created_at
            FROM invoices
            WHERE status = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(InvoiceStatus::Unpaid)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = invoices.len(), "Unpaid invoices found");
        Ok(invoices)
    }

    /// Returns the priced lines of one prescription with their grand total.
    ///
    /// An unknown prescription id yields an empty bill with a zero total.
    pub async fn bill_details(&self, prescription_id: &str) -> DbResult<BillDetails> {
        let lines = sqlx::query_as::<_, BillLine>(
            r#"
            SELECT
                m.name AS drug_name,
                d.qty AS qty,
                d.price_snapshot AS price,
                d.price_snapshot * d.qty AS subtotal
            FROM prescription_details d
            INNER JOIN medicines m ON m.id = d.medicine_id
            WHERE d.prescription_id = ?1
            ORDER BY d.line_no
            "#,
        )
        .bind(prescription_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(BillDetails::from_lines(lines))
    }

    /// Gets an invoice header by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT id, patient_id, total_amount, status, created_at FROM invoices WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Gets the line items of an invoice in submission order.
    pub async fn get_items(&self, invoice_id: &str) -> DbResult<Vec<InvoiceDetail>> {
        let items = sqlx::query_as::<_, InvoiceDetail>(
            r#"
            SELECT id, invoice_id, item_code, item_name, item_type, qty, price
            FROM invoice_details
            WHERE invoice_id = ?1
            ORDER BY line_no
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Returns the receipt of the submission that used `key`, if any.
    pub async fn find_by_idempotency_key(&self, key: &str) -> DbResult<Option<SubmissionReceipt>> {
        find_receipt_by_key(&self.pool, key).await
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReceiptRow {
    invoice_id: String,
    prescription_id: Option<String>,
    total_amount: i64,
    line_count: i64,
}

/// Rebuilds the receipt of an earlier submission from its invoice.
pub(crate) async fn find_receipt_by_key<'e, E>(
    executor: E,
    key: &str,
) -> DbResult<Option<SubmissionReceipt>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, ReceiptRow>(
        r#"
        SELECT
            i.id AS invoice_id,
            i.prescription_id AS prescription_id,
            i.total_amount AS total_amount,
            (SELECT COUNT(*) FROM invoice_details d WHERE d.invoice_id = i.id) AS line_count
        FROM invoices i
        WHERE i.idempotency_key = ?1
        "#,
    )
    .bind(key)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|row| SubmissionReceipt {
        invoice_id: row.invoice_id,
        prescription_id: row.prescription_id.unwrap_or_default(),
        total_amount: Money::from_units(row.total_amount),
        line_count: usize::try_from(row.line_count).unwrap_or_default(),
        replayed: true,
    }))
}
