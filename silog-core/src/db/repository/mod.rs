//! Repository Module
//!
//! Row-level access for menu items, orders and dining tables, plus the
//! [`Store`] seam the ordering core persists through.

pub mod dining_table;
pub mod menu_item;
pub mod order;

use async_trait::async_trait;
use shared::models::{
    DiningTable, DiningTableCreate, MenuItem, MenuItemCreate, MenuItemUpdate, Order, OrderCreate,
    OrderStatus,
};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Record not found".into()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Serialization(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Outcome of a conditional status write
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    /// Written; carries the order as stored afterwards
    Updated(Order),
    /// Rejected: the order is already completed or cancelled
    Terminal(OrderStatus),
    NotFound,
}

/// Persistence interface consumed by the ordering core
///
/// Create/read/update only. Every write that touches shared order or table
/// state is a single atomic unit against the backing store.
#[async_trait]
pub trait Store: Send + Sync {
    // ── Menu ────────────────────────────────────────────────────
    async fn list_menu_items(&self) -> RepoResult<Vec<MenuItem>>;
    async fn create_menu_item(&self, data: MenuItemCreate) -> RepoResult<MenuItem>;
    async fn update_menu_item(&self, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem>;

    // ── Orders ──────────────────────────────────────────────────
    /// Insert an order. When `data.table_id` names an existing table, the
    /// table is occupied in the same transaction; an unknown table leaves the
    /// stored order with no table.
    async fn create_order(&self, data: OrderCreate) -> RepoResult<Order>;
    async fn get_order(&self, id: i64) -> RepoResult<Option<Order>>;
    /// Newest first
    async fn list_orders(&self) -> RepoResult<Vec<Order>>;
    async fn list_orders_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>>;
    /// Overwrite the status unless the order is terminal
    async fn update_order_status(&self, id: i64, status: OrderStatus)
    -> RepoResult<StatusUpdate>;

    // ── Tables ──────────────────────────────────────────────────
    /// Set `order.table_id` and occupy the table together.
    /// Returns `false` (nothing written) when the table does not exist.
    async fn bind_table(&self, table_id: i64, order_id: i64) -> RepoResult<bool>;
    /// Mark the table available. Returns `false` when the table does not exist.
    async fn release_table(&self, table_id: i64) -> RepoResult<bool>;
    async fn list_tables(&self) -> RepoResult<Vec<DiningTable>>;
    async fn get_table(&self, id: i64) -> RepoResult<Option<DiningTable>>;
    async fn create_table(&self, data: DiningTableCreate) -> RepoResult<DiningTable>;
    async fn count_tables(&self) -> RepoResult<i64>;
}
