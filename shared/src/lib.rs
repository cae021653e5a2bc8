//! Shared types for the Silog ordering workspace
//!
//! Plain data models used by the ordering core and whatever renders it
//! (menu items, cart lines, orders, dining tables), the unified error
//! system, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
