//! # Prescription Cart
//!
//! The request shape the pharmacist screen posts when submitting a
//! prescription, plus the rules that turn loosely-typed cart lines into
//! concrete drug references and quantities.
//!
//! ## Wire Format
//! ```json
//! {
//!   "patient_id": "8d0c…",
//!   "doctor_id": "51fa…",
//!   "items": [
//!     { "drug_id": "a1b2…", "qty": 2 },
//!     { "id": "c3d4…", "qty": "1", "price": 999 }
//!   ]
//! }
//! ```
//! The frontend sometimes sends the whole drug object it listed, so a line
//! may carry `id` instead of `drug_id`, numeric strings for `qty`, and stale
//! price fields. Prices sent by the client are ignored entirely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DEFAULT_LINE_QUANTITY;

// =============================================================================
// Cart Line
// =============================================================================

/// One line of a submitted cart, as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartLine {
    /// Preferred drug reference.
    pub drug_id: Option<Value>,
    /// Fallback drug reference when the client posts a listed drug object.
    pub id: Option<Value>,
    pub qty: Option<Value>,
}

impl CartLine {
    /// Creates a line referencing `drug_id` with an integer quantity.
    pub fn new(drug_id: impl Into<String>, qty: i64) -> Self {
        CartLine {
            drug_id: Some(Value::String(drug_id.into())),
            id: None,
            qty: Some(Value::from(qty)),
        }
    }

    /// Returns the referenced drug id: `drug_id` if usable, else `id`.
    pub fn drug_ref(&self) -> Option<String> {
        self.drug_id
            .as_ref()
            .and_then(reference_from_value)
            .or_else(|| self.id.as_ref().and_then(reference_from_value))
    }

    /// Returns the quantity as a positive integer.
    ///
    /// ## Rules
    /// - JSON integers are used as-is, fractional numbers are truncated
    /// - Strings are read by their leading integer (`"3 box"` → 3)
    /// - Anything missing, unreadable, zero, or negative becomes 1
    ///
    /// ## Example
    /// ```rust
    /// use salma_core::CartLine;
    /// use serde_json::json;
    ///
    /// let line: CartLine = serde_json::from_value(json!({"drug_id": "x", "qty": "4"})).unwrap();
    /// assert_eq!(line.quantity(), 4);
    ///
    /// let line: CartLine = serde_json::from_value(json!({"drug_id": "x", "qty": -2})).unwrap();
    /// assert_eq!(line.quantity(), 1);
    /// ```
    pub fn quantity(&self) -> i64 {
        self.qty
            .as_ref()
            .and_then(integer_from_value)
            .filter(|qty| *qty > 0)
            .unwrap_or(DEFAULT_LINE_QUANTITY)
    }
}

// =============================================================================
// Submission Request
// =============================================================================

/// A prescription submission as received from the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitPrescription {
    pub items: Option<Vec<CartLine>>,
    pub patient_id: Option<Value>,
    pub doctor_id: Option<Value>,
    /// Client-chosen key that makes retries of the same submission safe.
    /// Carried in the `Idempotency-Key` header, never in the body.
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

impl SubmitPrescription {
    /// Starts an empty submission for `patient_id`.
    pub fn for_patient(patient_id: impl Into<String>) -> Self {
        SubmitPrescription {
            items: Some(Vec::new()),
            patient_id: Some(Value::String(patient_id.into())),
            doctor_id: None,
            idempotency_key: None,
        }
    }

    /// Sets the prescribing doctor.
    pub fn doctor(mut self, doctor_id: impl Into<String>) -> Self {
        self.doctor_id = Some(Value::String(doctor_id.into()));
        self
    }

    /// Appends a cart line.
    pub fn item(mut self, drug_id: impl Into<String>, qty: i64) -> Self {
        self.items
            .get_or_insert_with(Vec::new)
            .push(CartLine::new(drug_id, qty));
        self
    }

    /// Sets the idempotency key.
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Returns the cart lines (empty when the client sent none).
    pub fn lines(&self) -> &[CartLine] {
        self.items.as_deref().unwrap_or(&[])
    }
}

// =============================================================================
// Validated Submission
// =============================================================================

/// A cart line whose drug reference and quantity have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLine {
    pub drug_id: String,
    pub qty: i64,
}

/// A submission that passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSubmission {
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub lines: Vec<PreparedLine>,
    pub idempotency_key: Option<String>,
}

// =============================================================================
// Value Coercion
// =============================================================================

/// Reads an identifier from a JSON string or number.
pub(crate) fn reference_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads an integer the way a lenient form parser would.
fn integer_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

/// Parses the leading signed integer of `s`, saturating on overflow.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(value: Value) -> CartLine {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_drug_ref_prefers_drug_id() {
        let l = line(json!({"drug_id": "abc", "id": "xyz"}));
        assert_eq!(l.drug_ref().as_deref(), Some("abc"));

        let l = line(json!({"id": "xyz", "name": "Paracetamol", "price": 5}));
        assert_eq!(l.drug_ref().as_deref(), Some("xyz"));

        let l = line(json!({"drug_id": "  ", "id": 42}));
        assert_eq!(l.drug_ref().as_deref(), Some("42"));

        let l = line(json!({"qty": 1}));
        assert_eq!(l.drug_ref(), None);
    }

    #[test]
    fn test_quantity_coercion() {
        assert_eq!(line(json!({"qty": 3})).quantity(), 3);
        assert_eq!(line(json!({"qty": "5"})).quantity(), 5);
        assert_eq!(line(json!({"qty": " 7 tablets"})).quantity(), 7);
        assert_eq!(line(json!({"qty": 2.9})).quantity(), 2);
        assert_eq!(line(json!({"qty": "abc"})).quantity(), 1);
        assert_eq!(line(json!({"qty": 0})).quantity(), 1);
        assert_eq!(line(json!({"qty": -4})).quantity(), 1);
        assert_eq!(line(json!({"qty": "-4"})).quantity(), 1);
        assert_eq!(line(json!({"qty": null})).quantity(), 1);
        assert_eq!(line(json!({"qty": true})).quantity(), 1);
        assert_eq!(line(json!({})).quantity(), 1);
    }

    #[test]
    fn test_oversized_quantity_saturates() {
        assert_eq!(line(json!({"qty": "99999999999999999999999"})).quantity(), i64::MAX);
    }

    #[test]
    fn test_submission_builder() {
        let request = SubmitPrescription::for_patient("p1")
            .doctor("d1")
            .item("m1", 2)
            .item("m2", 1)
            .idempotency_key("retry-1");

        assert_eq!(request.lines().len(), 2);
        assert_eq!(request.lines()[0].drug_ref().as_deref(), Some("m1"));
        assert_eq!(request.idempotency_key.as_deref(), Some("retry-1"));
    }

    #[test]
    fn test_submission_deserializes_with_missing_fields() {
        let request: SubmitPrescription = serde_json::from_value(json!({
            "items": null,
            "patient_id": "p1"
        }))
        .unwrap();
        assert!(request.lines().is_empty());
        assert!(request.doctor_id.is_none());
        assert!(request.idempotency_key.is_none());
    }
}
