//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, TableStatus};
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_COLUMNS: &str = "SELECT id, table_number, capacity, status FROM dining_table";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let rows = sqlx::query_as::<_, DiningTable>(&format!("{SELECT_COLUMNS} ORDER BY table_number"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let row = sqlx::query_as::<_, DiningTable>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dining_table")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM dining_table WHERE table_number = ?")
            .bind(data.table_number)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(RepoError::Validation(format!(
            "Table number {} already exists",
            data.table_number
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO dining_table (table_number, capacity, status) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(data.table_number)
    .bind(data.capacity)
    .bind(data.status)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

/// Flip occupancy. Returns `false` when no such table exists.
pub async fn set_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: TableStatus,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE dining_table SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM dining_table WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}
