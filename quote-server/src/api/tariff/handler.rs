//! Tariff API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::models::TariffQuote;

use super::request::{GroupageRequest, PalletRequest, ShipmentDefaults};
use crate::core::ServerState;
use crate::tariff::{TariffError, normalize_province};
use crate::utils::AppResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProvinceResolution {
    pub province: String,
    /// Groupage bucket key
    pub bucket: Option<String>,
    /// Pallet rate region
    pub region: Option<String>,
}

/// POST /api/tariff/pallet - 整托运费
pub async fn pallet(
    State(state): State<ServerState>,
    Json(payload): Json<PalletRequest>,
) -> AppResult<Json<TariffQuote>> {
    let store = state.tariffs()?;
    let quote = payload.quote(&store, &ShipmentDefaults::default())?;
    Ok(Json(quote))
}

/// POST /api/tariff/groupage - 拼车运费
pub async fn groupage(
    State(state): State<ServerState>,
    Json(payload): Json<GroupageRequest>,
) -> AppResult<Json<TariffQuote>> {
    let store = state.tariffs()?;
    let quote = payload.quote(&store, &ShipmentDefaults::default())?;
    Ok(Json(quote))
}

/// GET /api/tariff/province/{code} - 省份解析
pub async fn province(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<ProvinceResolution>> {
    let store = state.tariffs()?;
    let bucket = store.resolve_bucket(&code).ok().map(|b| b.key.clone());
    let region = store.region_of(&code).map(str::to_string);

    if bucket.is_none() && region.is_none() {
        return Err(TariffError::TariffNotFound {
            province: normalize_province(&code),
        }
        .into());
    }

    Ok(Json(ProvinceResolution {
        province: normalize_province(&code),
        bucket,
        region,
    }))
}
