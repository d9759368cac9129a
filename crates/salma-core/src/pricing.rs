//! # Pricing Engine
//!
//! Derives the customer-facing selling price of a medicine from its catalog
//! record.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price_after_margin = hna + hna × margin / 100                          │
//! │  tax                = price_after_margin × tax_rate / 100               │
//! │  selling_price      = ⌈price_after_margin + tax⌉                        │
//! │                                                                         │
//! │  Example: hna 333, margin 5%, tax 7%                                    │
//! │    333 + 16.65       = 349.65                                           │
//! │    349.65 × 0.07     =  24.4755                                         │
//! │    ⌈374.1255⌉        = 375                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Always the ceiling to a whole Rupiah, never floor or round-half-even.
//! The arithmetic runs on `rust_decimal::Decimal`, so an integral result
//! such as 1221 is never pushed to 1222 by binary float noise.
//!
//! ## Missing Inputs
//! A missing or non-finite HNA, margin, or tax counts as zero. A finite
//! value too large for `Decimal` saturates at `Decimal::MAX` (or `MIN`).
//! Pricing never fails.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::Money;
use crate::types::Medicine;

/// Intermediate values of a price calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub base: Decimal,
    pub after_margin: Decimal,
    pub tax: Decimal,
    pub selling_price: Money,
}

/// Computes the selling price of one unit of `medicine`.
///
/// ## Example
/// ```rust
/// use salma_core::pricing::selling_price;
/// use salma_core::Medicine;
///
/// let drug = Medicine {
///     id: "m1".into(),
///     name: "Vitamin C".into(),
///     stock: 10,
///     hna_price: Some(333.0),
///     margin_percentage: Some(5.0),
///     tax_rate: Some(7.0),
///     kfa_code: None,
/// };
/// assert_eq!(selling_price(&drug).units(), 375);
/// ```
pub fn selling_price(medicine: &Medicine) -> Money {
    price_breakdown(medicine).selling_price
}

/// Computes the selling price and keeps every intermediate value.
pub fn price_breakdown(medicine: &Medicine) -> PriceBreakdown {
    let hna = to_decimal(medicine.hna_price);
    let margin = to_decimal(medicine.margin_percentage);
    let tax_rate = to_decimal(medicine.tax_rate);

    // Saturating so extreme catalog values cannot panic
    let after_margin = hna.saturating_add(hna.saturating_mul(margin) / Decimal::ONE_HUNDRED);
    let tax = after_margin.saturating_mul(tax_rate) / Decimal::ONE_HUNDRED;
    let total = after_margin.saturating_add(tax).ceil();

    PriceBreakdown {
        base: hna,
        after_margin,
        tax,
        selling_price: Money::from_units(to_units(total)),
    }
}

/// Converts an optional catalog value, treating missing/NaN/infinite as zero.
fn to_decimal(value: Option<f64>) -> Decimal {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return Decimal::ZERO;
    };

    match Decimal::from_f64(value) {
        Some(decimal) => decimal,
        // Too small to represent rounds to zero, too large saturates
        None if value.abs() < 1.0 => Decimal::ZERO,
        None if value.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// Converts an already-integral decimal to whole units, saturating at the
/// i64 range.
fn to_units(value: Decimal) -> i64 {
    value.to_i64().unwrap_or(if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
