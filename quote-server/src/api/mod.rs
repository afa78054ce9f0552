//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`catalog`] - 价目表上传与检索
//! - [`quote`] - 报价会话 (行编辑、模式切换、合计)
//! - [`pricing`] - 无状态单行计算
//! - [`tariff`] - 托盘 / 拼车运费计算

use axum::Router;

use crate::core::ServerState;

pub mod catalog;
pub mod health;
pub mod pricing;
pub mod quote;
pub mod tariff;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// 合并所有路由
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(catalog::router())
        .merge(quote::router())
        .merge(pricing::router())
        .merge(tariff::router())
}
