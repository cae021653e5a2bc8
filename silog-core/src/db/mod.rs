//! Database Module
//!
//! Handles the SQLite connection pool and migrations, and provides the two
//! [`Store`] implementations: [`SqliteStore`] and [`MemoryStore`].

pub mod memory;
pub mod repository;

pub use memory::MemoryStore;
pub use repository::{RepoError, RepoResult, StatusUpdate, Store};

use crate::utils::AppError;
use async_trait::async_trait;
use repository::{dining_table, menu_item, order};
use shared::models::{
    DiningTable, DiningTableCreate, MenuItem, MenuItemCreate, MenuItemUpdate, Order, OrderCreate,
    OrderStatus,
};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use std::str::FromStr;

/// SQLite-backed store: owns a connection pool
#[derive(Clone)]
pub struct SqliteStore {
    pub pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database with WAL mode, then apply migrations
    pub async fn open(db_path: &str) -> Result<Self, AppError> {
        if let Some(parent) = Path::new(db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::database(format!("Failed to create database directory: {e}"))
            })?;
        }

        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        // busy_timeout: 写冲突时等待 5s 而非立即失败
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;

        tracing::info!(path = %db_path, "Database connection established (SQLite WAL, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_menu_items(&self) -> RepoResult<Vec<MenuItem>> {
        menu_item::find_all(&self.pool).await
    }

    async fn create_menu_item(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        menu_item::create(&self.pool, data).await
    }

    async fn update_menu_item(&self, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        menu_item::update(&self.pool, id, data).await
    }

    async fn create_order(&self, data: OrderCreate) -> RepoResult<Order> {
        order::create(&self.pool, data).await
    }

    async fn get_order(&self, id: i64) -> RepoResult<Option<Order>> {
        order::find_by_id(&self.pool, id).await
    }

    async fn list_orders(&self) -> RepoResult<Vec<Order>> {
        order::find_all(&self.pool).await
    }

    async fn list_orders_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>> {
        order::find_by_status(&self.pool, status).await
    }

    async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> RepoResult<StatusUpdate> {
        order::update_status(&self.pool, id, status).await
    }

    async fn bind_table(&self, table_id: i64, order_id: i64) -> RepoResult<bool> {
        order::bind_table(&self.pool, table_id, order_id).await
    }

    async fn release_table(&self, table_id: i64) -> RepoResult<bool> {
        order::release_table(&self.pool, table_id).await
    }

    async fn list_tables(&self) -> RepoResult<Vec<DiningTable>> {
        dining_table::find_all(&self.pool).await
    }

    async fn get_table(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        dining_table::find_by_id(&self.pool, id).await
    }

    async fn create_table(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        dining_table::create(&self.pool, data).await
    }

    async fn count_tables(&self) -> RepoResult<i64> {
        dining_table::count(&self.pool).await
    }
}
