//! Quote API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{PricingMode, QuoteSnapshot, TariffQuote};

use crate::api::tariff::request::{GroupageRequest, PalletRequest, ShipmentDefaults};
use crate::core::ServerState;
use crate::money::RawNumber;
use crate::pricing::{LineField, ManualLineInput};
use crate::tariff::logistic_fallback;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct AddCatalogLine {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct EditLine {
    pub field: LineField,
    pub value: RawNumber,
}

#[derive(Debug, Deserialize)]
pub struct SetMode {
    pub mode: PricingMode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSettings {
    pub auto_services: Option<bool>,
    pub vat_rate: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FreightRequest {
    Pallet(PalletRequest),
    Groupage(GroupageRequest),
}

#[derive(Debug, Serialize)]
pub struct FreightResponse {
    pub quote: TariffQuote,
    pub snapshot: QuoteSnapshot,
}

/// GET /api/quote - 获取报价快照
pub async fn snapshot(State(state): State<ServerState>) -> Json<QuoteSnapshot> {
    Json(state.session.read().snapshot())
}

/// POST /api/quote/lines/catalog - 从价目表添加行
pub async fn add_catalog_line(
    State(state): State<ServerState>,
    Json(payload): Json<AddCatalogLine>,
) -> AppResult<Json<QuoteSnapshot>> {
    let catalog = state.catalog.read();
    let mut session = state.session.write();
    session.add_from_catalog(&catalog, payload.code.trim())?;
    Ok(Json(session.snapshot()))
}

/// POST /api/quote/lines/manual - 添加手工行
pub async fn add_manual_line(
    State(state): State<ServerState>,
    Json(payload): Json<ManualLineInput>,
) -> Json<QuoteSnapshot> {
    let mut session = state.session.write();
    session.add_manual(payload);
    Json(session.snapshot())
}

/// PATCH /api/quote/lines/{id} - 修改单个字段
pub async fn edit_line(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EditLine>,
) -> AppResult<Json<QuoteSnapshot>> {
    let mut session = state.session.write();
    session.edit_line(&id, payload.field, &payload.value)?;
    Ok(Json(session.snapshot()))
}

/// DELETE /api/quote/lines/{id} - 删除行
pub async fn remove_line(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<QuoteSnapshot>> {
    let mut session = state.session.write();
    session.remove_line(&id)?;
    Ok(Json(session.snapshot()))
}

/// PUT /api/quote/mode - 切换定价模式
pub async fn set_mode(
    State(state): State<ServerState>,
    Json(payload): Json<SetMode>,
) -> Json<QuoteSnapshot> {
    let mut session = state.session.write();
    session.set_mode(payload.mode);
    Json(session.snapshot())
}

/// PUT /api/quote/settings - 修改服务费自动填充 / 增值税率
pub async fn update_settings(
    State(state): State<ServerState>,
    Json(payload): Json<UpdateSettings>,
) -> Json<QuoteSnapshot> {
    let catalog = state.catalog.read();
    let mut session = state.session.write();
    if let Some(enabled) = payload.auto_services {
        session.set_auto_services(enabled, &catalog);
    }
    if let Some(vat_rate) = &payload.vat_rate {
        session.set_vat_rate(vat_rate);
    }
    Json(session.snapshot())
}

/// POST /api/quote/lines/{id}/freight - 计算运费并写入行的运输费
///
/// 请求中缺省的托盘类型、托数和重量取自行对应商品的包装信息
/// (先按编码查找，再按物流编码映射查找)。
pub async fn freight(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FreightRequest>,
) -> AppResult<Json<FreightResponse>> {
    let store = state.tariffs()?;

    let defaults = {
        let session = state.session.read();
        let line = session.line(&id)?;
        let query = format!("{} {}", line.code, line.description);
        store
            .find_article(&line.code, logistic_fallback(&query))
            .map(|article| ShipmentDefaults::from_article(article, line.quantity))
            .unwrap_or_default()
    };

    let quote = match &payload {
        FreightRequest::Pallet(request) => request.quote(&store, &defaults)?,
        FreightRequest::Groupage(request) => request.quote(&store, &defaults)?,
    };

    let mut session = state.session.write();
    session.apply_freight(&id, quote.cost)?;
    Ok(Json(FreightResponse {
        quote,
        snapshot: session.snapshot(),
    }))
}
