//! Cart Engine
//!
//! Holds the in-progress selection for one ordering session. Lines are keyed
//! by `(item_id, special_request)`: adding the same item with the same note
//! merges into the existing line, a different note starts a new line.
//!
//! Every mutation recomputes the affected line's subtotal from its snapshotted
//! unit price, so derived figures never drift.

use crate::catalog::MenuCatalog;
use crate::order_money::{self, CartTotals};
use crate::utils::{OrderError, OrderResult};
use serde::{Deserialize, Serialize};
use shared::models::{CartLine, MenuItem};
use std::collections::HashMap;

/// One catalog item with a requested quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub item: &'a MenuItem,
    pub quantity: i32,
}

/// Parse a raw form quantity. Blank, malformed and non-positive values yield `None`.
pub fn parse_quantity(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|q| *q > 0)
}

/// Pair every catalog item that has a positive quantity in `quantities`,
/// preserving catalog order
pub fn collect_selection<'a, C>(catalog: &'a C, quantities: &HashMap<i64, String>) -> Vec<Selection<'a>>
where
    C: MenuCatalog + ?Sized,
{
    catalog
        .items()
        .iter()
        .filter_map(|item| {
            let raw = quantities.get(&item.id)?;
            match parse_quantity(raw) {
                Some(quantity) => Some(Selection { item, quantity }),
                None => {
                    if !raw.trim().is_empty() {
                        tracing::debug!(item_id = item.id, raw = %raw, "Skipping unusable quantity");
                    }
                    None
                }
            }
        })
        .collect()
}

/// Session-scoped cart. Serialized as its bare line list; deserializing goes
/// through [`Cart::from_lines`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Cart::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines (possibly legacy or partial).
    /// Call [`Cart::normalize`] before computing totals.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart { lines };
        cart.lines.retain(|line| line.quantity > 0);
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of a catalog item, merging into the line with the same
    /// `(item_id, special_request)`.
    ///
    /// The request note is trimmed, so a blank note merges with the note-less
    /// line. Non-positive quantities are ignored. An id missing from the
    /// catalog leaves the cart untouched and returns [`OrderError::UnknownItem`].
    pub fn add_line<C>(
        &mut self,
        catalog: &C,
        item_id: i64,
        quantity: i32,
        special_request: Option<&str>,
    ) -> OrderResult<()>
    where
        C: MenuCatalog + ?Sized,
    {
        if quantity <= 0 {
            tracing::debug!(item_id, quantity, "Ignoring non-positive quantity");
            return Ok(());
        }
        let item = catalog.by_id(item_id).ok_or_else(|| {
            tracing::warn!(item_id, "Add references an item no longer on the menu");
            OrderError::UnknownItem(item_id)
        })?;
        self.merge(item, quantity, special_request.map(str::trim).unwrap_or(""));
        Ok(())
    }

    /// Apply [`Cart::add_line`] for every catalog item with a positive
    /// quantity in `quantities`, in catalog order. Unusable quantities are
    /// skipped. Returns the number of selections applied.
    pub fn add_bulk<C>(&mut self, catalog: &C, quantities: &HashMap<i64, String>) -> usize
    where
        C: MenuCatalog + ?Sized,
    {
        self.add_selection(&collect_selection(catalog, quantities))
    }

    /// Add already-resolved selections without a request note
    pub fn add_selection(&mut self, selection: &[Selection<'_>]) -> usize {
        for s in selection {
            self.merge(s.item, s.quantity, "");
        }
        selection.len()
    }

    /// Change the quantity of the note-less line for `item_id` by `delta`.
    ///
    /// A result of zero or below removes the line. With no existing line, a
    /// positive delta creates one priced from the catalog; a negative delta
    /// does nothing.
    pub fn adjust_quantity<C>(&mut self, catalog: &C, item_id: i64, delta: i32) -> OrderResult<()>
    where
        C: MenuCatalog + ?Sized,
    {
        if let Some(idx) = self.position(Some(item_id), "") {
            let new_quantity = self.lines[idx].quantity.saturating_add(delta);
            if new_quantity <= 0 {
                let removed = self.lines.remove(idx);
                tracing::debug!(item_id, name = %removed.name, "Cart line removed");
            } else {
                let line = &mut self.lines[idx];
                line.quantity = new_quantity;
                order_money::refresh_line(line);
                tracing::debug!(item_id, quantity = new_quantity, "Cart line adjusted");
            }
            return Ok(());
        }

        if delta <= 0 {
            return Ok(());
        }
        let item = catalog.by_id(item_id).ok_or_else(|| {
            tracing::warn!(item_id, "Adjust references an item no longer on the menu");
            OrderError::UnknownItem(item_id)
        })?;
        self.merge(item, delta, "");
        Ok(())
    }

    /// Remove every line with this display name, whatever its request note.
    /// Returns how many lines were removed.
    pub fn remove_by_name(&mut self, name: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| line.name != name);
        let removed = before - self.lines.len();
        if removed > 0 {
            tracing::debug!(name, removed, "Cart lines removed by name");
        }
        removed
    }

    /// Drop lines with no positive quantity, fill in missing unit prices and
    /// images from the catalog (by id, then by name) and recompute every
    /// subtotal. Idempotent.
    pub fn normalize<C>(&mut self, catalog: &C)
    where
        C: MenuCatalog + ?Sized,
    {
        self.lines.retain(|line| {
            if line.quantity <= 0 {
                tracing::warn!(name = %line.name, quantity = line.quantity, "Dropping cart line without a positive quantity");
            }
            line.quantity > 0
        });
        for line in &mut self.lines {
            if line.unit_price.is_none() || line.image.is_none() {
                let source = line
                    .item_id
                    .and_then(|id| catalog.by_id(id))
                    .or_else(|| catalog.by_name(&line.name));
                match source {
                    Some(item) => {
                        if line.unit_price.is_none() {
                            line.unit_price = Some(item.price);
                        }
                        if line.image.is_none() {
                            line.image = item.image.clone();
                        }
                    }
                    None if line.unit_price.is_none() => {
                        tracing::warn!(name = %line.name, item_id = ?line.item_id, "Cannot price cart line, treating as zero");
                    }
                    None => {}
                }
            }
            order_money::refresh_line(line);
        }
    }

    /// Sum of line subtotals, before tax
    pub fn subtotal(&self) -> f64 {
        order_money::to_f64(order_money::sum_subtotals(&self.lines))
    }

    /// Subtotal, 12% VAT and total
    pub fn summarize(&self) -> CartTotals {
        order_money::compute_totals(&self.lines)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, item_id: Option<i64>, special_request: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.same_line(item_id, special_request))
    }

    fn merge(&mut self, item: &MenuItem, quantity: i32, special_request: &str) {
        match self.position(Some(item.id), special_request) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(quantity);
                if line.unit_price.is_none() {
                    line.unit_price = Some(item.price);
                }
                order_money::refresh_line(line);
                tracing::debug!(item_id = item.id, quantity = line.quantity, "Cart line merged");
            }
            None => {
                let mut line = CartLine {
                    item_id: Some(item.id),
                    name: item.name.clone(),
                    unit_price: Some(item.price),
                    quantity,
                    subtotal: 0.0,
                    image: item.image.clone(),
                    special_request: special_request.to_string(),
                };
                order_money::refresh_line(&mut line);
                tracing::debug!(item_id = item.id, quantity, "Cart line added");
                self.lines.push(line);
            }
        }
    }
}
