//! Pricing result models
//!
//! Numbers consumed by the report and UI collaborators.

use serde::{Deserialize, Serialize};

use super::order_line::{OrderLine, PricingMode};

/// Default VAT percentage of a new quote
pub const DEFAULT_VAT_RATE: f64 = 22.0;

/// Per-line pricing result
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RowPricing {
    /// Net unit price (pre-margin, pre-service)
    pub net_unit: f64,
    /// Customer-facing unit price
    pub sell_unit: f64,
    /// Transport + installation per unit
    pub service_unit: f64,
    /// Quantity actually applied (≥ 1)
    pub quantity: u32,
    /// (sell + service) × quantity
    pub line_total: f64,
    /// line_total / quantity
    pub unit_total: f64,
    /// sold price − line total
    pub variance: f64,
}

/// Order-level totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Σ sell × quantity
    pub net_without_services: f64,
    /// Σ line total
    pub total_with_services: f64,
    pub total_sold: f64,
    pub total_variance: f64,
    /// Taxable base ("imponibile")
    pub taxable_base: f64,
    pub vat_rate: f64,
    pub tax: f64,
    /// taxable base + tax
    pub total: f64,
    /// Order-level single discount reproducing Σ sell from Σ gross
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equivalent_discount: Option<f64>,
}

/// Order-level toggles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Populate transport/installation from the catalog and count them in
    /// the taxable base
    pub auto_services: bool,
    /// VAT percentage (0-100)
    pub vat_rate: f64,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            auto_services: true,
            vat_rate: DEFAULT_VAT_RATE,
        }
    }
}

/// A line together with its computed prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
    pub line: OrderLine,
    pub result: RowPricing,
}

/// Full view of a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub mode: PricingMode,
    pub settings: QuoteSettings,
    pub lines: Vec<PricedLine>,
    pub totals: OrderTotals,
}
