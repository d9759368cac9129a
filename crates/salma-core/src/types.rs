//! # Domain Types
//!
//! Core domain types used throughout the SALMA pharmacy backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog (read-only)        Clinical aggregate      Billing aggregate   │
//! │  ┌─────────────────┐        ┌─────────────────┐     ┌─────────────────┐ │
//! │  │    Medicine     │        │  Prescription   │     │     Invoice     │ │
//! │  │  hna_price      │        │  patient_id     │     │  patient_id     │ │
//! │  │  margin_pct     │        │  doctor_id?     │     │  total_amount   │ │
//! │  │  tax_rate       │        │  status         │     │  status         │ │
//! │  │  kfa_code?      │        └────────┬────────┘     └────────┬────────┘ │
//! │  └─────────────────┘                 │ 1..N                  │ 1..N     │
//! │  ┌─────────────────┐        ┌────────▼────────┐     ┌────────▼────────┐ │
//! │  │ Patient, Doctor │        │PrescriptionDetail│    │  InvoiceDetail  │ │
//! │  └─────────────────┘        │ price_snapshot  │     │  price          │ │
//! │                             └─────────────────┘     └─────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Detail rows copy the selling price computed at submission time. Later
//! changes to a medicine's margin or tax never touch submitted rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog
// =============================================================================

/// A drug in the pharmacy catalog.
///
/// Decimal pricing inputs are optional: a catalog row with a missing value
/// still prices (the missing input counts as zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    /// Units on hand.
    pub stock: i64,
    /// Harga Netto Apotek: acquisition price before margin and tax.
    pub hna_price: Option<f64>,
    /// Pharmacy margin in percent (10.0 = 10%).
    pub margin_percentage: Option<f64>,
    /// Tax (PPN) in percent (11.0 = 11%).
    pub tax_rate: Option<f64>,
    /// KFA (Kamus Farmasi dan Alat Kesehatan) catalog code.
    pub kfa_code: Option<String>,
}

/// Medicine as listed to the pharmacist, with its current selling price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MedicineListing {
    pub id: String,
    pub name: String,
    pub stock: i64,
    pub price: Money,
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Patient {
    pub id: String,
    pub full_name: String,
    /// Medical record number.
    pub mr_no: Option<String>,
}

/// A prescribing doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: Option<String>,
}

// =============================================================================
// Prescription Status
// =============================================================================

/// The status of a prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionStatus {
    /// Submitted by the pharmacist and priced.
    Processed,
    /// Handed over to the patient.
    Dispensed,
    Cancelled,
}

impl Default for PrescriptionStatus {
    fn default() -> Self {
        PrescriptionStatus::Processed
    }
}

// =============================================================================
// Invoice Status
// =============================================================================

/// The payment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Waiting at the cashier.
    Unpaid,
    Paid,
    Cancelled,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Unpaid
    }
}

/// Kind of billable item on an invoice line.
pub const ITEM_TYPE_DRUG: &str = "drug";

// =============================================================================
// Prescription
// =============================================================================

/// Clinical header of a submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub status: PrescriptionStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// One prescribed medicine.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PrescriptionDetail {
    pub id: String,
    pub prescription_id: String,
    pub medicine_id: String,
    pub qty: i64,
    pub dosage_instruction: String,
    /// Selling price at time of submission (frozen).
    pub price_snapshot: i64,
}

impl PrescriptionDetail {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_units(self.price_snapshot)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Billing header of a submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Invoice {
    pub id: String,
    pub patient_id: String,
    /// Sum of `price × qty` over the invoice's detail rows.
    pub total_amount: i64,
    pub status: InvoiceStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns the invoice total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_units(self.total_amount)
    }
}

/// One billed item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InvoiceDetail {
    pub id: String,
    pub invoice_id: String,
    /// KFA code at time of submission, or `GENERIC`.
    pub item_code: String,
    pub item_name: String,
    pub item_type: String,
    pub qty: i64,
    /// Unit price at time of submission (frozen).
    pub price: i64,
}

impl InvoiceDetail {
    /// Returns `price × qty` as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_units(self.price) * self.qty
    }
}

// =============================================================================
// Cashier Read Models
// =============================================================================

/// A prescription line as shown on the cashier's bill detail screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BillLine {
    pub drug_name: String,
    pub qty: i64,
    pub price: i64,
    pub subtotal: i64,
}

/// All lines of a prescription plus their grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillDetails {
    pub items: Vec<BillLine>,
    pub grand_total: Money,
}

impl BillDetails {
    /// Builds the bill, summing every line's subtotal.
    pub fn from_lines(items: Vec<BillLine>) -> Self {
        let grand_total = items.iter().map(|l| Money::from_units(l.subtotal)).sum();
        BillDetails { items, grand_total }
    }
}

// =============================================================================
// Submission Result
// =============================================================================

/// What a successful prescription submission hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionReceipt {
    /// Handle for all later billing operations.
    pub invoice_id: String,
    pub prescription_id: String,
    pub total_amount: Money,
    pub line_count: usize,
    /// True when an earlier submission with the same idempotency key was
    /// returned instead of writing a new one.
    pub replayed: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
