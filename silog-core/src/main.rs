use shared::models::OrderStatus;
use silog_core::catalog::{self, Catalog};
use silog_core::seed::generate_demo_orders;
use silog_core::{OrderService, SqliteStore, Store, TableService, setup_environment};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment()?;

    tracing::info!(environment = %config.environment, "Silog ordering core starting...");

    // 2. 打开数据库并执行迁移
    let store: Arc<dyn Store> = Arc::new(SqliteStore::open(&config.database_path).await?);

    // 3. 首次运行: 菜单和默认餐桌
    catalog::seed_menu_if_empty(store.as_ref()).await?;
    let tables = TableService::new(store.clone());
    tables.seed_default_tables().await?;

    // 4. 可选: 演示订单
    if config.seed_demo_orders > 0 {
        let menu = Catalog::load(store.as_ref()).await?;
        generate_demo_orders(store.as_ref(), &menu, &[], config.seed_demo_orders).await?;
    }

    // 5. 汇总
    let all_tables = tables.list_tables().await?;
    let occupied = all_tables
        .iter()
        .filter(|t| t.status == shared::models::TableStatus::Occupied)
        .count();
    tracing::info!(total = all_tables.len(), occupied, "Tables");

    let orders = OrderService::new(store.clone());
    for status in OrderStatus::ALL {
        let count = orders.list_orders_by_status(status).await?.len();
        tracing::info!(%status, count, "Orders");
    }

    Ok(())
}
