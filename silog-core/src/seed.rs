//! Demo data
//!
//! Generates a day's worth of plausible orders for a fresh database.

use crate::cart::Cart;
use crate::catalog::{Catalog, MenuCatalog};
use crate::db::Store;
use crate::utils::OrderResult;
use chrono::{Timelike, Utc};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use shared::models::{Order, OrderCreate, OrderStatus};

/// Status mix of generated orders
const STATUS_WEIGHTS: [(OrderStatus, u32); 4] = [
    (OrderStatus::Pending, 40),
    (OrderStatus::Preparing, 30),
    (OrderStatus::Completed, 20),
    (OrderStatus::Cancelled, 10),
];

/// Weights for 1..=6 lines per order
const LINE_COUNT_WEIGHTS: [u32; 6] = [10, 25, 30, 20, 10, 5];

/// Chance that an order is seated at a table
const TABLE_CHANCE: f64 = 0.8;

const OPENING_HOUR: u32 = 8;
const CLOSING_HOUR: u32 = 22;

/// Create `count` orders for today, spread over business hours up to now
pub async fn generate_demo_orders(
    store: &dyn Store,
    catalog: &Catalog,
    user_ids: &[i64],
    count: usize,
) -> OrderResult<Vec<Order>> {
    let mut rng = StdRng::from_entropy();
    generate_demo_orders_with(store, catalog, user_ids, count, &mut rng).await
}

/// [`generate_demo_orders`] with a caller-supplied random source
pub async fn generate_demo_orders_with<R>(
    store: &dyn Store,
    catalog: &Catalog,
    user_ids: &[i64],
    count: usize,
    rng: &mut R,
) -> OrderResult<Vec<Order>>
where
    R: Rng + Send,
{
    if catalog.is_empty() || count == 0 {
        tracing::warn!(items = catalog.len(), count, "Nothing to generate demo orders from");
        return Ok(Vec::new());
    }

    let table_ids: Vec<i64> = store.list_tables().await?.iter().map(|t| t.id).collect();
    let now = Utc::now();
    let day_start = shared::util::start_of_day_millis(now.timestamp_millis());
    let last_hour = now.hour().clamp(OPENING_HOUR, CLOSING_HOUR);

    let status_index = WeightedIndex::new(STATUS_WEIGHTS.iter().map(|(_, w)| *w))
        .map_err(|e| crate::db::RepoError::Validation(e.to_string()))?;
    let line_index = WeightedIndex::new(LINE_COUNT_WEIGHTS)
        .map_err(|e| crate::db::RepoError::Validation(e.to_string()))?;

    let mut orders = Vec::with_capacity(count);
    for _ in 0..count {
        let mut cart = Cart::new();
        let line_count = line_index.sample(rng) + 1;
        for _ in 0..line_count {
            if let Some(item) = catalog.items().choose(rng) {
                cart.add_line(catalog, item.id, rng.gen_range(1..=3), None)?;
            }
        }

        let hour = rng.gen_range(OPENING_HOUR..=last_hour) as i64;
        let minute = rng.gen_range(0..60) as i64;
        let created_at = day_start + (hour * 60 + minute) * 60_000;

        let table_id = if rng.gen_bool(TABLE_CHANCE) {
            table_ids.choose(rng).copied()
        } else {
            None
        };

        let order = store
            .create_order(OrderCreate {
                user_id: user_ids.choose(rng).copied(),
                items: cart.lines().to_vec(),
                total: cart.summarize().total,
                table_id,
                status: STATUS_WEIGHTS[status_index.sample(rng)].0,
                created_at: Some(created_at),
            })
            .await?;
        orders.push(order);
    }

    tracing::info!(count = orders.len(), "Generated demo orders");
    Ok(orders)
}
