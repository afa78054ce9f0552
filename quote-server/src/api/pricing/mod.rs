//! Pricing API 模块 - 无状态单行计算

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::{RowPricingRequest, RowPricingResponse};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/pricing/row", post(handler::price_row))
}
