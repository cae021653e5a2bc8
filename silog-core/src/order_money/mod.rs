//! Money calculation utilities using rust_decimal for precision
//!
//! This module provides precise decimal arithmetic for monetary calculations.
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::CartLine;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Fixed VAT rate applied on top of the cart subtotal (12%)
pub const VAT_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);

/// Maximum allowed price per menu item
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated at the catalog boundary.
/// If NaN/Infinity somehow reaches here, logs an error and returns ZERO
/// to avoid silent data corruption in financial calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round to 2 decimal places, midpoint away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_else(|| {
        tracing::error!(value = %value, "Decimal not representable as f64, defaulting to zero");
        0.0
    })
}

/// `unit_price × quantity`, rounded
pub fn line_subtotal(unit_price: f64, quantity: i32) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Recompute a line's derived subtotal from its unit price and quantity
pub fn refresh_line(line: &mut CartLine) {
    line.subtotal = line_subtotal(line.unit_price_or_zero(), line.quantity);
}

/// Derived cart figures shown to the diner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl CartTotals {
    pub const ZERO: CartTotals = CartTotals {
        subtotal: 0.0,
        tax: 0.0,
        total: 0.0,
    };
}

/// Sum line subtotals without tax
pub fn sum_subtotals<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Decimal {
    lines
        .into_iter()
        .map(|line| to_decimal(line.subtotal))
        .sum()
}

/// Subtotal, 12% VAT and grand total for a set of lines
///
/// Formula: tax = round(subtotal × 0.12), total = round(subtotal + tax)
pub fn compute_totals<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> CartTotals {
    let subtotal = round_money(sum_subtotals(lines));
    let tax = round_money(subtotal * VAT_RATE);
    let total = round_money(subtotal + tax);

    CartTotals {
        subtotal: to_f64(subtotal),
        tax: to_f64(tax),
        total: to_f64(total),
    }
}
