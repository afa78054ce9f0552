//! Pricing API Handlers

use axum::Json;
use serde::{Deserialize, Serialize};
use shared::models::{LinePricing, OrderLine, PricingMode, RowPricing};

use crate::pricing::{ManualLineInput, calculate_row, equivalent_client_discount};

#[derive(Debug, Deserialize)]
pub struct RowPricingRequest {
    #[serde(default)]
    pub mode: PricingMode,
    #[serde(flatten)]
    pub line: ManualLineInput,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RowPricingResponse {
    pub line: OrderLine,
    pub result: RowPricing,
    /// Single discount giving the same sell price as the line's standard terms
    pub equivalent_client_discount: f64,
}

/// POST /api/pricing/row - 按指定模式计算单行 (不修改报价会话)
///
/// ClientDiscount 模式下使用请求中的 client_discount，
/// 而不是由 discount1/discount2/margin 推算的等效折扣。
pub async fn price_row(Json(payload): Json<RowPricingRequest>) -> Json<RowPricingResponse> {
    let mut line = payload.line.into_line(PricingMode::Standard);
    let terms = line.standard_terms();
    let equivalent = equivalent_client_discount(line.gross_price, &terms);

    if payload.mode == PricingMode::ClientDiscount {
        line.pricing = LinePricing::ClientDiscount {
            client_discount: line.client_discount(),
            backup: terms,
        };
    }

    let result = calculate_row(&line, payload.mode);
    Json(RowPricingResponse {
        line,
        result,
        equivalent_client_discount: equivalent,
    })
}
