//! Catalog API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::{CatalogQuery, CatalogSummary, CatalogUpload};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/catalog", get(handler::search).put(handler::upload))
}
