//! Order Model

use super::cart_line::CartLine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order fulfillment status
///
/// `pending → preparing → completed`, with `cancelled` reachable from any
/// non-terminal state. `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// No transition leaves a terminal status
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status string outside `pending | preparing | completed | cancelled`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized order status: {0:?}")]
pub struct InvalidOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(InvalidOrderStatus(s.to_string())),
        }
    }
}

/// Order entity
///
/// `items` is a by-value snapshot of the cart at checkout; it never changes
/// afterwards. Only `status` and `table_id` are mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: Option<i64>,
    pub items: Vec<CartLine>,
    /// Post-tax total in currency unit
    pub total: f64,
    pub status: OrderStatus,
    pub table_id: Option<i64>,
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user_id: Option<i64>,
    pub items: Vec<CartLine>,
    pub total: f64,
    /// Table to occupy in the same write, if any
    pub table_id: Option<i64>,
    /// Initial status; checkout always uses `Pending`
    #[serde(default)]
    pub status: OrderStatus,
    /// Creation time override (demo data); defaults to now
    pub created_at: Option<i64>,
}
