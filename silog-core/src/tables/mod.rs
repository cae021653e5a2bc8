//! Table Assignment
//!
//! Tables cycle between `available` and `occupied`. An order keeps its
//! `table_id` after the table is released; orders are history, tables are
//! reused.

use crate::db::{RepoError, Store};
use crate::session::OrderingSession;
use crate::utils::{OrderError, OrderResult};
use shared::models::{DiningTable, DiningTableCreate, TableStatus};
use std::sync::Arc;

/// Seat counts of the tables provisioned on first run, numbered from 1
pub const DEFAULT_CAPACITIES: [i32; 10] = [2, 2, 4, 4, 4, 6, 6, 8, 10, 10];

#[derive(Clone)]
pub struct TableService {
    store: Arc<dyn Store>,
}

impl TableService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Choose the table for the session's next checkout
    pub async fn select(
        &self,
        session: &mut OrderingSession,
        table_id: i64,
    ) -> OrderResult<DiningTable> {
        let table = self.get_table(table_id).await?;
        if table.status == TableStatus::Occupied {
            tracing::warn!(table_id, table_number = table.table_number, "Selected table is occupied");
        }
        session.select_table(table_id);
        Ok(table)
    }

    /// Attach an order to a table and occupy it, together.
    /// An unknown table writes nothing and returns `false`.
    pub async fn bind_to_order(&self, table_id: i64, order_id: i64) -> OrderResult<bool> {
        let bound = self.store.bind_table(table_id, order_id).await?;
        if bound {
            tracing::info!(table_id, order_id, "Table bound to order");
        } else {
            tracing::warn!(table_id, order_id, "Cannot bind order to missing table");
        }
        Ok(bound)
    }

    /// Make a table available again. Orders referencing it are left alone.
    pub async fn release(&self, table_id: i64) -> OrderResult<bool> {
        let released = self.store.release_table(table_id).await?;
        if released {
            tracing::info!(table_id, "Table released");
        } else {
            tracing::warn!(table_id, "Cannot release missing table");
        }
        Ok(released)
    }

    pub async fn list_tables(&self) -> OrderResult<Vec<DiningTable>> {
        Ok(self.store.list_tables().await?)
    }

    pub async fn get_table(&self, table_id: i64) -> OrderResult<DiningTable> {
        self.store
            .get_table(table_id)
            .await?
            .ok_or(OrderError::TableNotFound(table_id))
    }

    pub async fn create_table(&self, data: DiningTableCreate) -> OrderResult<DiningTable> {
        if data.table_number <= 0 {
            return Err(RepoError::Validation(format!(
                "table number must be positive, got {}",
                data.table_number
            ))
            .into());
        }
        if data.capacity <= 0 {
            return Err(RepoError::Validation(format!(
                "capacity must be positive, got {}",
                data.capacity
            ))
            .into());
        }
        let table = self.store.create_table(data).await?;
        tracing::info!(table_id = table.id, table_number = table.table_number, capacity = table.capacity, "Table created");
        Ok(table)
    }

    /// Provision the default floor when no tables exist. Returns how many were created.
    pub async fn seed_default_tables(&self) -> OrderResult<usize> {
        if self.store.count_tables().await? > 0 {
            return Ok(0);
        }
        for (idx, capacity) in DEFAULT_CAPACITIES.into_iter().enumerate() {
            self.store
                .create_table(DiningTableCreate {
                    table_number: idx as i32 + 1,
                    capacity,
                    status: TableStatus::Available,
                })
                .await?;
        }
        tracing::info!(count = DEFAULT_CAPACITIES.len(), "Seeded default tables");
        Ok(DEFAULT_CAPACITIES.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use shared::models::{Identity, OrderCreate, OrderStatus};

    fn setup() -> (Arc<MemoryStore>, TableService) {
        let store = Arc::new(MemoryStore::new());
        let service = TableService::new(store.clone());
        (store, service)
    }

    async fn place_order(store: &MemoryStore) -> i64 {
        store
            .create_order(OrderCreate {
                user_id: None,
                items: vec![],
                total: 0.0,
                table_id: None,
                status: OrderStatus::Pending,
                created_at: None,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_seed_default_tables_once() {
        let (_store, service) = setup();
        assert_eq!(service.seed_default_tables().await.unwrap(), 10);
        assert_eq!(service.seed_default_tables().await.unwrap(), 0);

        let tables = service.list_tables().await.unwrap();
        let numbers: Vec<i32> = tables.iter().map(|t| t.table_number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
        let capacities: Vec<i32> = tables.iter().map(|t| t.capacity).collect();
        assert_eq!(capacities, DEFAULT_CAPACITIES.to_vec());
        assert!(tables.iter().all(|t| t.status == TableStatus::Available));
    }

    #[tokio::test]
    async fn test_bind_then_release_keeps_order_link() {
        let (store, service) = setup();
        service.seed_default_tables().await.unwrap();
        let table = service
            .list_tables()
            .await
            .unwrap()
            .into_iter()
            .find(|t| t.table_number == 5)
            .unwrap();
        let order_id = place_order(&store).await;

        assert!(service.bind_to_order(table.id, order_id).await.unwrap());
        assert_eq!(
            service.get_table(table.id).await.unwrap().status,
            TableStatus::Occupied
        );

        assert!(service.release(table.id).await.unwrap());
        let order = store.get_order(order_id).await.unwrap().unwrap();
        assert_eq!(order.table_id, Some(table.id));
        assert_eq!(
            service.get_table(table.id).await.unwrap().status,
            TableStatus::Available
        );
    }

    #[tokio::test]
    async fn test_bind_unknown_table_is_silent() {
        let (store, service) = setup();
        let order_id = place_order(&store).await;
        assert!(!service.bind_to_order(99, order_id).await.unwrap());
        assert!(!service.release(99).await.unwrap());
        assert_eq!(store.get_order(order_id).await.unwrap().unwrap().table_id, None);
    }

    #[tokio::test]
    async fn test_bind_unknown_order_fails() {
        let (_store, service) = setup();
        service.seed_default_tables().await.unwrap();
        let table = service.list_tables().await.unwrap().remove(0);

        let err = service.bind_to_order(table.id, 4242).await.unwrap_err();
        assert!(matches!(err, OrderError::Repo(RepoError::NotFound(_))));
        assert_eq!(
            service.get_table(table.id).await.unwrap().status,
            TableStatus::Available
        );
    }

    #[tokio::test]
    async fn test_select_records_without_occupying() {
        let (_store, service) = setup();
        let table = service
            .create_table(DiningTableCreate {
                table_number: 12,
                capacity: 4,
                status: TableStatus::Available,
            })
            .await
            .unwrap();
        let mut session = OrderingSession::new(Identity::staff(1));

        service.select(&mut session, table.id).await.unwrap();
        assert_eq!(session.selected_table(), Some(table.id));
        assert_eq!(
            service.get_table(table.id).await.unwrap().status,
            TableStatus::Available
        );

        let err = service.select(&mut session, 999).await.unwrap_err();
        assert!(matches!(err, OrderError::TableNotFound(999)));
        assert_eq!(session.selected_table(), Some(table.id));
    }

    #[tokio::test]
    async fn test_create_table_validates() {
        let (_store, service) = setup();
        let err = service
            .create_table(DiningTableCreate {
                table_number: 1,
                capacity: 0,
                status: TableStatus::Available,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Repo(RepoError::Validation(_))));
    }
}
