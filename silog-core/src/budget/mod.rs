//! Budget Constraint Evaluator
//!
//! Pure functions over the catalog and a proposed selection. Nothing here
//! mutates a cart: a selection that goes over the cap is reported in full,
//! never truncated to fit.

use crate::cart::Selection;
use crate::catalog::MenuCatalog;
use crate::order_money::{self, to_decimal};
use crate::utils::BudgetReport;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{CartLine, MenuItem};

/// Result of checking a total against a spending cap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub within_budget: bool,
    /// Pre-tax total
    pub total: f64,
    pub cap: f64,
    /// Amount over the cap, zero when within budget
    pub excess: f64,
}

impl BudgetCheck {
    fn evaluate(total: Decimal, cap: f64) -> Self {
        let cap_dec = to_decimal(cap);
        let excess = (total - cap_dec).max(Decimal::ZERO);
        BudgetCheck {
            within_budget: total <= cap_dec,
            total: order_money::to_f64(total),
            cap,
            excess: order_money::to_f64(excess),
        }
    }

    /// Overage report carrying the attempted lines
    pub fn report(&self, lines: Vec<CartLine>) -> BudgetReport {
        BudgetReport {
            cap: self.cap,
            total: self.total,
            excess: self.excess,
            lines,
        }
    }
}

/// Every catalog item affordable on its own within `cap`, in catalog order
pub fn suggest<C>(catalog: &C, cap: f64) -> Vec<&MenuItem>
where
    C: MenuCatalog + ?Sized,
{
    let cap = to_decimal(cap);
    catalog
        .items()
        .iter()
        .filter(|item| to_decimal(item.price) <= cap)
        .collect()
}

/// `Σ price × quantity` over the selection, checked against `cap`
pub fn validate_selection(selection: &[Selection<'_>], cap: f64) -> BudgetCheck {
    let total: Decimal = selection
        .iter()
        .map(|s| to_decimal(s.item.price) * Decimal::from(s.quantity))
        .sum();
    BudgetCheck::evaluate(total, cap)
}

/// Check cart lines (by their current subtotals) against `cap`
pub fn validate_lines(lines: &[CartLine], cap: f64) -> BudgetCheck {
    BudgetCheck::evaluate(order_money::sum_subtotals(lines), cap)
}

/// Lines a selection would add, for display in an overage report
pub fn selection_lines(selection: &[Selection<'_>]) -> Vec<CartLine> {
    selection
        .iter()
        .map(|s| CartLine {
            item_id: Some(s.item.id),
            name: s.item.name.clone(),
            unit_price: Some(s.item.price),
            quantity: s.quantity,
            subtotal: order_money::line_subtotal(s.item.price, s.quantity),
            image: s.item.image.clone(),
            special_request: String::new(),
        })
        .collect()
}
