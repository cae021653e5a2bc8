use super::*;
use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::db::MemoryStore;
use crate::tables::TableService;
use shared::models::{DiningTableCreate, Identity, MenuItem, TableStatus};

fn catalog() -> Catalog {
    Catalog::from_rows(vec![
        MenuItem {
            id: 1,
            name: "A".into(),
            price: 50.0,
            image: None,
            description: None,
        },
        MenuItem {
            id: 2,
            name: "B".into(),
            price: 30.0,
            image: None,
            description: None,
        },
    ])
}

fn setup() -> (Arc<MemoryStore>, OrderService) {
    let store = Arc::new(MemoryStore::new());
    let service = OrderService::new(store.clone());
    (store, service)
}

async fn add_table(store: &MemoryStore, number: i32) -> i64 {
    store
        .create_table(DiningTableCreate {
            table_number: number,
            capacity: 4,
            status: TableStatus::Available,
        })
        .await
        .unwrap()
        .id
}

/// A×3 (150) + B×1 "no onions" (30)
fn filled_session(catalog: &Catalog) -> OrderingSession {
    let mut session = OrderingSession::new(Identity::diner(7));
    session.cart.add_line(catalog, 1, 2, None).unwrap();
    session.cart.add_line(catalog, 2, 1, Some("no onions")).unwrap();
    session.cart.add_line(catalog, 1, 1, None).unwrap();
    session
}

#[tokio::test]
async fn test_empty_cart_checkout_creates_nothing() {
    let (store, service) = setup();
    let mut session = OrderingSession::new(Identity::guest());

    let err = service.checkout(&mut session, &catalog()).await.unwrap_err();
    assert!(matches!(err, OrderError::EmptyCart));
    assert!(store.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_snapshots_cart_with_post_tax_total() {
    let (_store, service) = setup();
    let catalog = catalog();
    let mut session = filled_session(&catalog);

    let order = service.checkout(&mut session, &catalog).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.user_id, Some(7));
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(order.items[1].special_request, "no onions");
    assert_eq!(order.total, 201.6);

    assert!(session.cart.is_empty());
    assert_eq!(session.budget_cap(), None);

    let stored = service.get_order(order.id).await.unwrap();
    assert_eq!(stored, order);
}

#[tokio::test]
async fn test_over_budget_checkout_keeps_cart() {
    let (store, service) = setup();
    let catalog = catalog();
    let mut session = OrderingSession::new(Identity::diner(1));
    session.cart.add_line(&catalog, 1, 3, None).unwrap();
    session.set_budget(100.0).unwrap();

    let err = service.checkout(&mut session, &catalog).await.unwrap_err();
    let report = err.budget_report().unwrap();
    assert_eq!(report.total, 150.0);
    assert_eq!(report.excess, 50.0);
    assert_eq!(report.lines.len(), 1);

    assert_eq!(session.cart.subtotal(), 150.0);
    assert_eq!(session.budget_cap(), None);
    assert!(store.list_orders().await.unwrap().is_empty());

    // Proceeding anyway
    let order = service.checkout(&mut session, &catalog).await.unwrap();
    assert_eq!(order.total, 168.0);
}

#[tokio::test]
async fn test_restored_cart_checked_on_real_lines_only() {
    let (store, service) = setup();
    let catalog = catalog();
    let mut session = OrderingSession::new(Identity::diner(3));
    session.cart = serde_json::from_str::<Cart>(
        r#"[
            {"id": 1, "name": "A", "price": 50, "quantity": 3, "subtotal": 150},
            {"id": 1, "name": "A", "price": 50, "quantity": -2, "subtotal": -100}
        ]"#,
    )
    .unwrap();
    session.set_budget(100.0).unwrap();

    let err = service.checkout(&mut session, &catalog).await.unwrap_err();
    let report = err.budget_report().unwrap();
    assert_eq!(report.total, 150.0);
    assert_eq!(report.excess, 50.0);
    assert_eq!(report.lines.len(), 1);
    assert!(store.list_orders().await.unwrap().is_empty());

    let order = service.checkout(&mut session, &catalog).await.unwrap();
    assert_eq!(order.total, 168.0);
    assert!(order.items.iter().all(|l| l.quantity > 0));
}

#[tokio::test]
async fn test_budget_rechecked_after_cart_grows() {
    let (_store, service) = setup();
    let catalog = catalog();
    let mut session = OrderingSession::new(Identity::guest());
    session.set_budget(100.0).unwrap();
    session.cart.add_line(&catalog, 1, 2, None).unwrap();
    session.cart.add_line(&catalog, 2, 1, None).unwrap();

    let err = service.checkout(&mut session, &catalog).await.unwrap_err();
    assert_eq!(err.budget_report().unwrap().excess, 30.0);
}

#[tokio::test]
async fn test_budget_at_exact_cap_passes() {
    let (_store, service) = setup();
    let catalog = catalog();
    let mut session = OrderingSession::new(Identity::guest());
    session.set_budget(100.0).unwrap();
    session.cart.add_line(&catalog, 1, 2, None).unwrap();

    let order = service.checkout(&mut session, &catalog).await.unwrap();
    assert_eq!(order.total, 112.0);
}

#[tokio::test]
async fn test_checkout_occupies_selected_table() {
    let (store, service) = setup();
    let catalog = catalog();
    let table_id = add_table(&store, 5).await;
    let mut session = filled_session(&catalog);
    session.select_table(table_id);

    let order = service.checkout(&mut session, &catalog).await.unwrap();
    assert_eq!(order.table_id, Some(table_id));
    let table = store.get_table(table_id).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(session.selected_table(), None);
}

#[tokio::test]
async fn test_checkout_skips_unknown_table() {
    let (_store, service) = setup();
    let catalog = catalog();
    let mut session = filled_session(&catalog);
    session.select_table(404);

    let order = service.checkout(&mut session, &catalog).await.unwrap();
    assert_eq!(order.table_id, None);
}

#[tokio::test]
async fn test_completed_order_rejects_every_target() {
    let (_store, service) = setup();
    let catalog = catalog();
    let order = service
        .checkout(&mut filled_session(&catalog), &catalog)
        .await
        .unwrap();
    service.advance_status(order.id, "completed").await.unwrap();

    for target in OrderStatus::ALL {
        let err = service
            .advance_status(order.id, target.as_str())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidTransition {
                current: Some(OrderStatus::Completed),
                ..
            }
        ));
    }
    let err = service.advance_status(order.id, "bogus").await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
    assert_eq!(
        service.get_order(order.id).await.unwrap().status,
        OrderStatus::Completed
    );
}

#[tokio::test]
async fn test_unrecognized_status_writes_nothing() {
    let (_store, service) = setup();
    let catalog = catalog();
    let order = service
        .checkout(&mut filled_session(&catalog), &catalog)
        .await
        .unwrap();

    let err = service.advance_status(order.id, "served").await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidTransition { current: None, .. }
    ));
    assert_eq!(
        service.get_order(order.id).await.unwrap().status,
        OrderStatus::Pending
    );
}

#[tokio::test]
async fn test_loose_override_is_allowed() {
    let (_store, service) = setup();
    let catalog = catalog();
    let order = service
        .checkout(&mut filled_session(&catalog), &catalog)
        .await
        .unwrap();

    let order = service.advance_status(order.id, "Completed ").await.unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
}

#[tokio::test]
async fn test_preparing_back_to_pending_is_allowed() {
    let (_store, service) = setup();
    let catalog = catalog();
    let order = service
        .checkout(&mut filled_session(&catalog), &catalog)
        .await
        .unwrap();

    service.advance_status(order.id, "preparing").await.unwrap();
    let order = service.advance_status(order.id, "pending").await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_closing_order_leaves_table_occupied() {
    let (store, service) = setup();
    let catalog = catalog();
    let table_id = add_table(&store, 3).await;
    let mut session = filled_session(&catalog);
    session.select_table(table_id);
    let order = service.checkout(&mut session, &catalog).await.unwrap();

    let order = service.advance_status(order.id, "cancelled").await.unwrap();
    assert_eq!(order.table_id, Some(table_id));
    let table = store.get_table(table_id).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
}

#[tokio::test]
async fn test_late_close_does_not_free_reseated_table() {
    let (store, service) = setup();
    let tables = TableService::new(store.clone());
    let catalog = catalog();
    let table_id = add_table(&store, 6).await;

    let first = service
        .checkout(&mut filled_session(&catalog), &catalog)
        .await
        .unwrap();
    let second = service
        .checkout(&mut filled_session(&catalog), &catalog)
        .await
        .unwrap();

    assert!(tables.bind_to_order(table_id, first.id).await.unwrap());
    assert!(tables.release(table_id).await.unwrap());
    assert!(tables.bind_to_order(table_id, second.id).await.unwrap());

    service.advance_status(first.id, "cancelled").await.unwrap();
    let table = tables.get_table(table_id).await.unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(
        service.get_order(second.id).await.unwrap().status,
        OrderStatus::Pending
    );
}

#[tokio::test]
async fn test_missing_order() {
    let (_store, service) = setup();
    assert!(matches!(
        service.advance_status(42, "preparing").await,
        Err(OrderError::OrderNotFound(42))
    ));
    assert!(matches!(
        service.get_order(42).await,
        Err(OrderError::OrderNotFound(42))
    ));
}

#[tokio::test]
async fn test_list_by_status() {
    let (_store, service) = setup();
    let catalog = catalog();
    let first = service
        .checkout(&mut filled_session(&catalog), &catalog)
        .await
        .unwrap();
    let second = service
        .checkout(&mut filled_session(&catalog), &catalog)
        .await
        .unwrap();
    service.advance_status(first.id, "preparing").await.unwrap();

    let preparing = service
        .list_orders_by_status(OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(preparing.len(), 1);
    assert_eq!(preparing[0].id, first.id);

    let pending = service
        .list_orders_by_status(OrderStatus::Pending)
        .await
        .unwrap();
    assert_eq!(pending[0].id, second.id);
    assert_eq!(service.list_orders().await.unwrap().len(), 2);
}

#[test]
fn test_regular_steps() {
    assert!(is_regular_step(OrderStatus::Pending, OrderStatus::Preparing));
    assert!(is_regular_step(OrderStatus::Preparing, OrderStatus::Cancelled));
    assert!(!is_regular_step(OrderStatus::Pending, OrderStatus::Completed));
    assert!(!is_regular_step(OrderStatus::Preparing, OrderStatus::Pending));
}
