//! Quote API 模块
//!
//! 报价会话为单写者：所有修改接口持写锁，返回修改后的完整快照。

mod handler;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::core::ServerState;

pub use handler::{
    AddCatalogLine, EditLine, FreightRequest, FreightResponse, SetMode, UpdateSettings,
};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/quote", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::snapshot))
        .route("/lines/catalog", post(handler::add_catalog_line))
        .route("/lines/manual", post(handler::add_manual_line))
        .route(
            "/lines/{id}",
            patch(handler::edit_line).delete(handler::remove_line),
        )
        .route("/lines/{id}/freight", post(handler::freight))
        .route("/mode", put(handler::set_mode))
        .route("/settings", put(handler::update_settings))
}
