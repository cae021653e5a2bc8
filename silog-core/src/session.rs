//! Ordering session
//!
//! The caller-owned state of one diner (or one staff member ordering on a
//! diner's behalf): identity, cart, optional budget cap and the table chosen
//! for the next checkout. Nothing here is shared between sessions.

use crate::budget::{self, BudgetCheck};
use crate::cart::{Cart, collect_selection};
use crate::catalog::MenuCatalog;
use crate::utils::validation::validate_price;
use crate::utils::{OrderError, OrderResult};
use serde::{Deserialize, Serialize};
use shared::models::Identity;
use std::collections::HashMap;

/// Upper bound accepted for a spending cap
pub const MAX_BUDGET: f64 = 10_000_000.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderingSession {
    pub identity: Identity,
    pub cart: Cart,
    budget_cap: Option<f64>,
    selected_table: Option<i64>,
}

impl OrderingSession {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            ..Default::default()
        }
    }

    pub fn budget_cap(&self) -> Option<f64> {
        self.budget_cap
    }

    /// Set the spending cap checked again at every checkout
    pub fn set_budget(&mut self, cap: f64) -> OrderResult<()> {
        validate_price(cap, MAX_BUDGET).map_err(|e| OrderError::InvalidBudget(e.message))?;
        self.budget_cap = Some(cap);
        tracing::debug!(cap, "Budget cap set");
        Ok(())
    }

    pub fn clear_budget(&mut self) {
        self.budget_cap = None;
    }

    pub fn selected_table(&self) -> Option<i64> {
        self.selected_table
    }

    /// Record the table for the next checkout. Table state is not touched.
    pub fn select_table(&mut self, table_id: i64) {
        self.selected_table = Some(table_id);
    }

    pub fn clear_table(&mut self) {
        self.selected_table = None;
    }

    /// Validate a bulk selection against `cap` (which becomes the session's
    /// cap) and add it to the cart only when it fits.
    ///
    /// Over budget, the cart is left untouched and the error carries the
    /// attempted lines.
    pub fn add_within_budget<C>(
        &mut self,
        catalog: &C,
        quantities: &HashMap<i64, String>,
        cap: f64,
    ) -> OrderResult<BudgetCheck>
    where
        C: MenuCatalog + ?Sized,
    {
        self.set_budget(cap)?;

        let selection = collect_selection(catalog, quantities);
        let check = budget::validate_selection(&selection, cap);
        if !check.within_budget {
            tracing::info!(cap, total = check.total, excess = check.excess, "Selection over budget");
            return Err(OrderError::BudgetExceeded(
                check.report(budget::selection_lines(&selection)),
            ));
        }

        self.cart.add_selection(&selection);
        Ok(check)
    }

    /// The diner proceeds despite the overage: add the selection unchecked
    /// and drop the cap so checkout does not refuse it again.
    pub fn confirm_over_budget<C>(&mut self, catalog: &C, quantities: &HashMap<i64, String>) -> usize
    where
        C: MenuCatalog + ?Sized,
    {
        self.budget_cap = None;
        let added = self.cart.add_bulk(catalog, quantities);
        tracing::info!(lines = added, "Over-budget selection confirmed");
        added
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }
}
