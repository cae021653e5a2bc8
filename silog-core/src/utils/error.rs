//! Ordering core errors
//!
//! - [`OrderError`] - domain failures raised by cart, budget, order and table operations
//! - [`BudgetReport`] - what the diner sees when a checkout goes over budget
//!
//! Every variant is a per-request recoverable condition. The surrounding
//! application converts them into [`AppError`] (shared error codes) for display.

use crate::db::repository::RepoError;
use serde::{Deserialize, Serialize};
use shared::models::{CartLine, OrderStatus};
use thiserror::Error;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

/// Budget overage details: the attempted lines are returned, never truncated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub cap: f64,
    /// Pre-tax total of the attempted selection
    pub total: f64,
    /// `total - cap`
    pub excess: f64,
    pub lines: Vec<CartLine>,
}

/// Ordering core error
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("{}", describe_overage(.0))]
    BudgetExceeded(BudgetReport),

    #[error("Invalid status transition for order {order_id}: {}", describe_rejection(.requested, .current))]
    InvalidTransition {
        order_id: i64,
        requested: String,
        /// Set when the order is already terminal; `None` for an unrecognized status
        current: Option<OrderStatus>,
    },

    #[error("Unknown menu item: {0}")]
    UnknownItem(i64),

    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

fn describe_overage(report: &BudgetReport) -> String {
    format!(
        "Order total {:.2} exceeds budget {:.2} by {:.2}",
        report.total, report.cap, report.excess
    )
}

fn describe_rejection(requested: &str, current: &Option<OrderStatus>) -> String {
    match current {
        Some(status) => format!("already {status}, cannot move to {requested:?}"),
        None => format!("unrecognized status {requested:?}"),
    }
}

impl OrderError {
    /// Budget report, when this is an overage
    pub fn budget_report(&self) -> Option<&BudgetReport> {
        match self {
            OrderError::BudgetExceeded(report) => Some(report),
            _ => None,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Serialization(msg) => AppError::internal(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::EmptyCart => AppError::new(ErrorCode::OrderEmpty),
            OrderError::BudgetExceeded(report) => {
                let lines = serde_json::to_value(&report.lines).unwrap_or_default();
                AppError::with_message(ErrorCode::OrderBudgetExceeded, message)
                    .with_detail("cap", report.cap)
                    .with_detail("total", report.total)
                    .with_detail("excess", report.excess)
                    .with_detail("lines", lines)
            }
            OrderError::InvalidTransition {
                order_id, current, ..
            } => {
                let code = match current {
                    Some(OrderStatus::Completed) => ErrorCode::OrderAlreadyCompleted,
                    Some(OrderStatus::Cancelled) => ErrorCode::OrderAlreadyCancelled,
                    _ => ErrorCode::OrderInvalidStatus,
                };
                AppError::with_message(code, message).with_detail("order_id", order_id)
            }
            OrderError::UnknownItem(id) => {
                AppError::with_message(ErrorCode::ProductNotFound, message).with_detail("item_id", id)
            }
            OrderError::InvalidBudget(_) => AppError::with_message(ErrorCode::ValidationFailed, message),
            OrderError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message).with_detail("order_id", id)
            }
            OrderError::TableNotFound(id) => {
                AppError::with_message(ErrorCode::TableNotFound, message).with_detail("table_id", id)
            }
            OrderError::Repo(e) => e.into(),
        }
    }
}

/// Result type for ordering core operations
pub type OrderResult<T> = Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_exceeded_carries_report() {
        let report = BudgetReport {
            cap: 100.0,
            total: 150.0,
            excess: 50.0,
            lines: vec![],
        };
        let err = OrderError::BudgetExceeded(report.clone());
        assert_eq!(err.budget_report(), Some(&report));
        assert_eq!(
            err.to_string(),
            "Order total 150.00 exceeds budget 100.00 by 50.00"
        );

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderBudgetExceeded);
        assert_eq!(app.details.unwrap().get("excess").unwrap(), 50.0);
    }

    #[test]
    fn test_invalid_transition_codes() {
        let terminal = OrderError::InvalidTransition {
            order_id: 7,
            requested: "pending".to_string(),
            current: Some(OrderStatus::Completed),
        };
        assert_eq!(
            terminal.to_string(),
            "Invalid status transition for order 7: already completed, cannot move to \"pending\""
        );
        assert_eq!(AppError::from(terminal).code, ErrorCode::OrderAlreadyCompleted);

        let unknown = OrderError::InvalidTransition {
            order_id: 7,
            requested: "served".to_string(),
            current: None,
        };
        assert_eq!(AppError::from(unknown).code, ErrorCode::OrderInvalidStatus);
    }

    #[test]
    fn test_repo_errors_are_system_errors() {
        let app: AppError = OrderError::Repo(RepoError::Database("locked".into())).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert!(!app.is_recoverable());
    }

    #[test]
    fn test_lookup_failures_map_to_domain_codes() {
        assert_eq!(AppError::from(OrderError::OrderNotFound(3)).code, ErrorCode::OrderNotFound);
        assert_eq!(AppError::from(OrderError::TableNotFound(5)).code, ErrorCode::TableNotFound);
        let app = AppError::from(OrderError::InvalidBudget("price must be non-negative".into()));
        assert_eq!(app.code, ErrorCode::ValidationFailed);
        assert!(app.is_recoverable());
    }

    #[test]
    fn test_empty_cart_and_unknown_item() {
        assert_eq!(AppError::from(OrderError::EmptyCart).code, ErrorCode::OrderEmpty);
        let app = AppError::from(OrderError::UnknownItem(99));
        assert_eq!(app.code, ErrorCode::ProductNotFound);
        assert_eq!(app.message, "Unknown menu item: 99");
    }
}
