//! Cart Line Model
//!
//! One distinguishable ordered item (menu item + special request). The same
//! shape is used while the cart is being assembled and inside an order's
//! frozen line-item snapshot, so it doubles as the storage encoding:
//!
//! ```json
//! {"id": 1, "name": "Tapsilog", "price": 120.0, "quantity": 2,
//!  "subtotal": 240.0, "image": "tapsilog.jpg", "request": "no egg"}
//! ```

use serde::{Deserialize, Serialize};

/// Cart line / order line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Menu item reference; absent on lines rebuilt from legacy data
    #[serde(rename = "id", default)]
    pub item_id: Option<i64>,
    pub name: String,
    /// Unit price snapshot taken when the line was first added
    #[serde(rename = "price", default)]
    pub unit_price: Option<f64>,
    #[serde(alias = "qty")]
    pub quantity: i32,
    /// Derived: `unit_price × quantity`
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "request", default)]
    pub special_request: String,
}

impl CartLine {
    /// Merge identity: `(item_id, special_request)`
    pub fn same_line(&self, item_id: Option<i64>, special_request: &str) -> bool {
        self.item_id == item_id && self.special_request == special_request
    }

    /// Unit price, treating a missing snapshot as free until repaired
    pub fn unit_price_or_zero(&self) -> f64 {
        self.unit_price.unwrap_or(0.0)
    }
}
