//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 (含数据集状态) |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "environment": "development",
//!   "tariffs_loaded": true,
//!   "datasets": { "articles": 12, "regions": 3, "pallet_regions": 3, "groupage_buckets": 9 },
//!   "catalog_entries": 0,
//!   "quote_lines": 0
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::tariff::DatasetCounts;

/// 健康检查路由 - 公共路由
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | degraded)
    status: &'static str,
    /// 版本号
    version: &'static str,
    environment: String,
    /// 运费数据集是否已加载
    tariffs_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    datasets: Option<DatasetCounts>,
    catalog_entries: usize,
    quote_lines: usize,
}

/// GET /health - 健康检查
///
/// 运费数据集缺失时状态为 degraded，报价功能仍可用。
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let datasets = state.tariffs().ok().map(|store| store.counts());
    let catalog_entries = state.catalog.read().len();
    let quote_lines = state.session.read().lines().len();

    Json(HealthResponse {
        status: if datasets.is_some() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        tariffs_loaded: datasets.is_some(),
        datasets,
        catalog_entries,
        quote_lines,
    })
}
