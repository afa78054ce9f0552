//! Tariff API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/tariff/pallet | POST | 整托运费 |
//! | /api/tariff/groupage | POST | 拼车运费 |
//! | /api/tariff/province/{code} | GET | 省份 → 分组 / 区域 |

mod handler;
pub(crate) mod request;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub use handler::ProvinceResolution;
pub use request::{GroupageRequest, PalletRequest};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tariff", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/pallet", post(handler::pallet))
        .route("/groupage", post(handler::groupage))
        .route("/province/{code}", get(handler::province))
}
