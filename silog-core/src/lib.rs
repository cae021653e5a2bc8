//! Silog ordering core - 小餐馆点单核心
//!
//! # 架构概述
//!
//! 点单流程从菜单到餐桌：
//!
//! - **购物车** (`cart`): 按 `(item_id, special_request)` 合并明细，计算小计/税/总额
//! - **预算** (`budget`): 按消费上限筛选菜单、校验选择
//! - **会话** (`session`): 每位顾客自己的购物车、预算和所选餐桌
//! - **订单** (`orders`): 结账生成订单，推进订单状态
//! - **餐桌** (`tables`): 绑定订单、占用和释放餐桌
//! - **数据库** (`db`): `Store` 接口，SQLite 与内存两种实现
//!
//! # 模块结构
//!
//! ```text
//! silog-core/src/
//! ├── core/          # 配置
//! ├── utils/         # 错误、日志、校验
//! ├── order_money/   # 金额计算 (rust_decimal)
//! ├── catalog/       # 菜单目录
//! ├── cart/          # 购物车
//! ├── budget/        # 预算校验
//! ├── session.rs     # 点单会话
//! ├── orders/        # 订单生命周期
//! ├── tables/        # 餐桌分配
//! ├── seed.rs        # 演示数据
//! └── db/            # 数据库层
//! ```

pub mod budget;
pub mod cart;
pub mod catalog;
pub mod core;
pub mod db;
pub mod order_money;
pub mod orders;
pub mod seed;
pub mod session;
pub mod tables;
pub mod utils;

// Re-export 公共类型
pub use cart::Cart;
pub use catalog::{Catalog, MenuCatalog};
pub use core::Config;
pub use db::{MemoryStore, SqliteStore, Store};
pub use orders::OrderService;
pub use session::OrderingSession;
pub use tables::TableService;
pub use utils::{AppError, AppResult, BudgetReport, OrderError, OrderResult};

// Re-export unified error types from shared
pub use utils::{ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 `.env`，读取配置，初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    // .env 不存在时忽略
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )?;
    Ok(config)
}
