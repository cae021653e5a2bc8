//! In-memory [`Store`] for tests and embedding
//!
//! One lock guards all three collections, so the multi-record writes
//! (checkout with a table, bind) are atomic the same way a transaction is.

use super::repository::{RepoError, RepoResult, StatusUpdate, Store};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{
    DiningTable, DiningTableCreate, MenuItem, MenuItemCreate, MenuItemUpdate, Order, OrderCreate,
    OrderStatus, TableStatus,
};
use std::collections::BTreeMap;

#[derive(Default)]
struct MemoryState {
    menu: BTreeMap<i64, MenuItem>,
    orders: BTreeMap<i64, Order>,
    tables: BTreeMap<i64, DiningTable>,
    last_id: i64,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory implementation for development and testing
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    orders
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_menu_items(&self) -> RepoResult<Vec<MenuItem>> {
        Ok(self.state.read().menu.values().cloned().collect())
    }

    async fn create_menu_item(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let mut state = self.state.write();
        let item = MenuItem {
            id: state.next_id(),
            name: data.name,
            price: data.price,
            image: data.image,
            description: data.description,
        };
        state.menu.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_menu_item(&self, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let mut state = self.state.write();
        let item = state
            .menu
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))?;
        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(price) = data.price {
            item.price = price;
        }
        if data.image.is_some() {
            item.image = data.image;
        }
        if data.description.is_some() {
            item.description = data.description;
        }
        Ok(item.clone())
    }

    async fn create_order(&self, data: OrderCreate) -> RepoResult<Order> {
        let mut state = self.state.write();
        let id = state.next_id();

        let table_id = match data.table_id {
            Some(table_id) => match state.tables.get_mut(&table_id) {
                Some(table) => {
                    if !data.status.is_terminal() {
                        table.status = TableStatus::Occupied;
                    }
                    Some(table_id)
                }
                None => None,
            },
            None => None,
        };

        let order = Order {
            id,
            user_id: data.user_id,
            items: data.items,
            total: data.total,
            status: data.status,
            table_id,
            created_at: data.created_at.unwrap_or_else(shared::util::now_millis),
        };
        state.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: i64) -> RepoResult<Option<Order>> {
        Ok(self.state.read().orders.get(&id).cloned())
    }

    async fn list_orders(&self) -> RepoResult<Vec<Order>> {
        Ok(newest_first(
            self.state.read().orders.values().cloned().collect(),
        ))
    }

    async fn list_orders_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>> {
        Ok(newest_first(
            self.state
                .read()
                .orders
                .values()
                .filter(|o| o.status == status)
                .cloned()
                .collect(),
        ))
    }

    async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> RepoResult<StatusUpdate> {
        let mut state = self.state.write();
        Ok(match state.orders.get_mut(&id) {
            None => StatusUpdate::NotFound,
            Some(order) if order.status.is_terminal() => StatusUpdate::Terminal(order.status),
            Some(order) => {
                order.status = status;
                StatusUpdate::Updated(order.clone())
            }
        })
    }

    async fn bind_table(&self, table_id: i64, order_id: i64) -> RepoResult<bool> {
        let mut state = self.state.write();
        if !state.tables.contains_key(&table_id) {
            return Ok(false);
        }
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))?;
        order.table_id = Some(table_id);
        if let Some(table) = state.tables.get_mut(&table_id) {
            table.status = TableStatus::Occupied;
        }
        Ok(true)
    }

    async fn release_table(&self, table_id: i64) -> RepoResult<bool> {
        let mut state = self.state.write();
        Ok(match state.tables.get_mut(&table_id) {
            Some(table) => {
                table.status = TableStatus::Available;
                true
            }
            None => false,
        })
    }

    async fn list_tables(&self) -> RepoResult<Vec<DiningTable>> {
        let mut tables: Vec<DiningTable> = self.state.read().tables.values().cloned().collect();
        tables.sort_by_key(|t| t.table_number);
        Ok(tables)
    }

    async fn get_table(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        Ok(self.state.read().tables.get(&id).cloned())
    }

    async fn create_table(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        let mut state = self.state.write();
        if state
            .tables
            .values()
            .any(|t| t.table_number == data.table_number)
        {
            return Err(RepoError::Validation(format!(
                "Table number {} already exists",
                data.table_number
            )));
        }
        let table = DiningTable {
            id: state.next_id(),
            table_number: data.table_number,
            capacity: data.capacity,
            status: data.status,
        };
        state.tables.insert(table.id, table.clone());
        Ok(table)
    }

    async fn count_tables(&self) -> RepoResult<i64> {
        Ok(self.state.read().tables.len() as i64)
    }
}
