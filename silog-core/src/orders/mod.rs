//! Order Lifecycle
//!
//! - **checkout**: snapshot a session's cart into a `pending` order
//! - **advance_status**: staff override of an order's status
//!
//! # Status flow
//!
//! ```text
//! pending ──→ preparing ──→ completed
//!    │            │
//!    └────────────┴──→ cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal. Among non-terminal orders any
//! target status is accepted; moves off the usual path are logged.

use crate::budget;
use crate::catalog::MenuCatalog;
use crate::db::{StatusUpdate, Store};
use crate::session::OrderingSession;
use crate::utils::{OrderError, OrderResult};
use shared::models::{Order, OrderCreate, OrderStatus};
use std::sync::Arc;

/// Whether `from → to` is one of the regular steps of the status flow
pub fn is_regular_step(from: OrderStatus, to: OrderStatus) -> bool {
    matches!(
        (from, to),
        (OrderStatus::Pending, OrderStatus::Preparing)
            | (OrderStatus::Preparing, OrderStatus::Completed)
            | (OrderStatus::Pending, OrderStatus::Cancelled)
            | (OrderStatus::Preparing, OrderStatus::Cancelled)
    )
}

/// Checkout and status handling over a [`Store`]
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn Store>,
}

impl OrderService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Turn the session's cart into a `pending` order.
    ///
    /// The budget cap, when set, is checked against the cart as it is now.
    /// On an overage the cap is dropped and the cart kept, so the diner can
    /// trim it or check out again to proceed anyway. On success the cart,
    /// cap and selected table are cleared.
    pub async fn checkout<C>(
        &self,
        session: &mut OrderingSession,
        catalog: &C,
    ) -> OrderResult<Order>
    where
        C: MenuCatalog + ?Sized,
    {
        if session.cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        session.cart.normalize(catalog);

        if let Some(cap) = session.budget_cap() {
            let check = budget::validate_lines(session.cart.lines(), cap);
            if !check.within_budget {
                session.clear_budget();
                tracing::info!(cap, total = check.total, excess = check.excess, "Checkout over budget");
                return Err(OrderError::BudgetExceeded(
                    check.report(session.cart.lines().to_vec()),
                ));
            }
        }

        let totals = session.cart.summarize();
        let requested_table = session.selected_table();
        let order = self
            .store
            .create_order(OrderCreate {
                user_id: session.identity.user_id,
                items: session.cart.lines().to_vec(),
                total: totals.total,
                table_id: requested_table,
                status: OrderStatus::Pending,
                created_at: None,
            })
            .await?;

        if let Some(table_id) = requested_table
            && order.table_id != Some(table_id)
        {
            tracing::warn!(order_id = order.id, table_id, "Selected table does not exist, order placed without a table");
        }

        session.clear_cart();
        session.clear_budget();
        session.clear_table();

        tracing::info!(
            order_id = order.id,
            user_id = ?order.user_id,
            table_id = ?order.table_id,
            lines = order.items.len(),
            subtotal = totals.subtotal,
            tax = totals.tax,
            total = order.total,
            "Order placed"
        );
        Ok(order)
    }

    /// Set an order's status from a raw status string.
    ///
    /// Fails with [`OrderError::InvalidTransition`] for an unrecognized status
    /// or a terminal order; nothing is written in either case. Tables are
    /// left alone: only [`crate::tables::TableService::release`] frees one.
    pub async fn advance_status(&self, order_id: i64, new_status: &str) -> OrderResult<Order> {
        let status: OrderStatus = new_status.parse().map_err(|_| {
            tracing::warn!(order_id, requested = %new_status, "Unrecognized order status");
            OrderError::InvalidTransition {
                order_id,
                requested: new_status.to_string(),
                current: None,
            }
        })?;

        // Read for the audit log only; the write below is the guard
        let previous = self
            .store
            .get_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?
            .status;

        let order = match self.store.update_order_status(order_id, status).await? {
            StatusUpdate::Updated(order) => order,
            StatusUpdate::Terminal(current) => {
                tracing::warn!(order_id, %current, requested = %status, "Order already closed");
                return Err(OrderError::InvalidTransition {
                    order_id,
                    requested: new_status.to_string(),
                    current: Some(current),
                });
            }
            StatusUpdate::NotFound => return Err(OrderError::OrderNotFound(order_id)),
        };

        if is_regular_step(previous, status) {
            tracing::info!(order_id, from = %previous, to = %status, "Order status changed");
        } else {
            tracing::warn!(order_id, from = %previous, to = %status, "Order status overridden off the regular flow");
        }

        Ok(order)
    }

    pub async fn get_order(&self, order_id: i64) -> OrderResult<Order> {
        self.store
            .get_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))
    }

    /// All orders, newest first
    pub async fn list_orders(&self) -> OrderResult<Vec<Order>> {
        Ok(self.store.list_orders().await?)
    }

    pub async fn list_orders_by_status(&self, status: OrderStatus) -> OrderResult<Vec<Order>> {
        Ok(self.store.list_orders_by_status(status).await?)
    }
}

#[cfg(test)]
mod tests;
