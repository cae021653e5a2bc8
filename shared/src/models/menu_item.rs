//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity (catalog row)
///
/// `name` may carry a free-text suffix added by staff; the catalog treats it
/// as an opaque display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    /// Price in currency unit
    pub price: f64,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub description: Option<String>,
}
