//! Data models
//!
//! Shared between the ordering core and the application that renders it.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod cart_line;
pub mod dining_table;
pub mod identity;
pub mod menu_item;
pub mod order;

// Re-exports
pub use cart_line::*;
pub use dining_table::*;
pub use identity::*;
pub use menu_item::*;
pub use order::*;
