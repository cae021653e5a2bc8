//! 核心模块 - 服务配置
//!
//! # 模块结构
//!
//! - [`Config`] - 服务配置 (环境变量)

pub mod config;

pub use config::Config;
