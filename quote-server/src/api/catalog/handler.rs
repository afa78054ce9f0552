//! Catalog API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::CatalogEntry;

use crate::catalog::{CatalogRecord, build_catalog};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};

/// 已解析的 CSV 行 (列名 → 单元格文本)
#[derive(Debug, Deserialize)]
pub struct CatalogUpload {
    #[serde(default)]
    pub source_name: Option<String>,
    pub records: Vec<CatalogRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub source_name: Option<String>,
    pub loaded_at: i64,
    pub entries: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// PUT /api/catalog - 替换价目表
///
/// 已在报价中的行不受影响 (行是价目条目的副本)。
pub async fn upload(
    State(state): State<ServerState>,
    Json(payload): Json<CatalogUpload>,
) -> AppResult<Json<CatalogSummary>> {
    let catalog = build_catalog(payload.source_name, &payload.records);
    if catalog.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::CatalogEmpty,
            "The uploaded catalog has no usable rows",
        ));
    }

    let summary = CatalogSummary {
        source_name: catalog.source_name.clone(),
        loaded_at: catalog.loaded_at,
        entries: catalog.len(),
    };
    *state.catalog.write() = catalog;
    Ok(Json(summary))
}

/// GET /api/catalog?q= - 按编码或描述检索
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<CatalogEntry>> {
    let catalog = state.catalog.read();
    let entries = catalog
        .search(query.q.as_deref().unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();
    Json(entries)
}
