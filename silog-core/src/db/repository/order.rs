//! Order Repository
//!
//! Line items are stored as a JSON snapshot in `orders.items`.

use super::{RepoError, RepoResult, StatusUpdate, dining_table};
use shared::models::{CartLine, Order, OrderCreate, OrderStatus, TableStatus};
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, items, total, status, table_id, created_at FROM orders";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: Option<i64>,
    items: String,
    total: f64,
    status: OrderStatus,
    table_id: Option<i64>,
    created_at: i64,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepoError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<CartLine> = serde_json::from_str(&row.items).map_err(|e| {
            RepoError::Serialization(format!("Order {} has unreadable items: {e}", row.id))
        })?;
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            items,
            total: row.total,
            status: row.status,
            table_id: row.table_id,
            created_at: row.created_at,
        })
    }
}

fn into_orders(rows: Vec<OrderRow>) -> RepoResult<Vec<Order>> {
    rows.into_iter().map(Order::try_from).collect()
}

async fn fetch_one_conn(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    row.map(Order::try_from).transpose()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Order::try_from).transpose()
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    into_orders(rows)
}

pub async fn find_by_status(pool: &SqlitePool, status: OrderStatus) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "{SELECT_COLUMNS} WHERE status = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(status)
    .fetch_all(pool)
    .await?;
    into_orders(rows)
}

/// Insert the order and, when it names an existing table, occupy that table
/// in the same transaction
pub async fn create(pool: &SqlitePool, data: OrderCreate) -> RepoResult<Order> {
    let items = serde_json::to_string(&data.items)?;
    let created_at = data.created_at.unwrap_or_else(shared::util::now_millis);

    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (user_id, items, total, status, table_id, created_at) VALUES (?1, ?2, ?3, ?4, NULL, ?5) RETURNING id",
    )
    .bind(data.user_id)
    .bind(&items)
    .bind(data.total)
    .bind(data.status)
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(table_id) = data.table_id {
        // Terminal orders (demo history) link the table without occupying it
        let exists = if data.status.is_terminal() {
            dining_table::exists(&mut tx, table_id).await?
        } else {
            dining_table::set_status(&mut tx, table_id, TableStatus::Occupied).await?
        };
        if exists {
            sqlx::query("UPDATE orders SET table_id = ? WHERE id = ?")
                .bind(table_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
    }

    let order = fetch_one_conn(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))?;

    tx.commit().await?;
    Ok(order)
}

/// Single conditional write: terminal orders are never touched. The reported
/// order is the row this statement wrote.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
) -> RepoResult<StatusUpdate> {
    let written = sqlx::query_as::<_, OrderRow>(
        "UPDATE orders SET status = ?1 WHERE id = ?2 AND status NOT IN ('completed', 'cancelled') RETURNING id, user_id, items, total, status, table_id, created_at",
    )
    .bind(status)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = written {
        return Ok(StatusUpdate::Updated(Order::try_from(row)?));
    }

    // Nothing written: missing, or already closed
    Ok(match find_by_id(pool, id).await? {
        None => StatusUpdate::NotFound,
        Some(order) => StatusUpdate::Terminal(order.status),
    })
}

/// Link the order to the table and occupy it, or write nothing
pub async fn bind_table(pool: &SqlitePool, table_id: i64, order_id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    if !dining_table::set_status(&mut tx, table_id, TableStatus::Occupied).await? {
        tx.rollback().await?;
        return Ok(false);
    }

    let rows = sqlx::query("UPDATE orders SET table_id = ? WHERE id = ?")
        .bind(table_id)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(RepoError::NotFound(format!("Order {order_id} not found")));
    }

    tx.commit().await?;
    Ok(true)
}

pub async fn release_table(pool: &SqlitePool, table_id: i64) -> RepoResult<bool> {
    let mut conn = pool.acquire().await?;
    dining_table::set_status(&mut conn, table_id, TableStatus::Available).await
}
