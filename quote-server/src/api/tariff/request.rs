//! Tariff request bodies
//!
//! Shared by the standalone tariff endpoints and the quote freight endpoint.
//! Fields left out fall back to the article packaging metadata when the
//! request is tied to a quote line.

use serde::Deserialize;
use shared::models::{Article, TariffQuote};

use crate::money::{RawNumber, clamp_amount, coerce_quantity};
use crate::tariff::{GroupageMeasures, TariffStore};
use crate::utils::{AppError, AppResult};

/// Defaults taken from the article behind a quote line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentDefaults {
    pub pallet_type: Option<String>,
    pub pallets: Option<f64>,
    pub quintals: Option<f64>,
}

impl ShipmentDefaults {
    /// Pallet type from the pack, one pallet per unit, weight in quintals
    pub fn from_article(article: &Article, quantity: u32) -> Self {
        let Some(pack) = &article.pack else {
            return Self::default();
        };
        let pallet_type = pack
            .pallet_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let pallets = pallet_type.as_ref().map(|_| f64::from(quantity));
        let quintals = pack
            .weight_kg
            .filter(|w| w.is_finite() && *w > 0.0)
            .map(|w| w * f64::from(quantity) / 100.0);

        Self {
            pallet_type,
            pallets,
            quintals,
        }
    }
}

/// Blank text reads as "not measured"
fn measure(raw: &Option<RawNumber>) -> Option<f64> {
    match raw {
        None => None,
        Some(RawNumber::Text(text)) if text.trim().is_empty() => None,
        Some(raw) => Some(clamp_amount(raw.as_f64())),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PalletRequest {
    /// Rate region; takes precedence over `province`
    pub region: Option<String>,
    pub province: Option<String>,
    pub pallet_type: Option<String>,
    pub pallets: Option<RawNumber>,
    pub insured: bool,
}

impl PalletRequest {
    pub fn quote(
        &self,
        store: &TariffStore,
        defaults: &ShipmentDefaults,
    ) -> AppResult<TariffQuote> {
        let pallet_type = non_blank(&self.pallet_type)
            .or(defaults.pallet_type.as_deref())
            .ok_or_else(|| AppError::validation("pallet_type is required"))?;
        let pallets = measure(&self.pallets).or(defaults.pallets).unwrap_or(1.0);
        let pallets = f64::from(coerce_quantity(pallets));

        let quote = match (non_blank(&self.region), non_blank(&self.province)) {
            (Some(region), _) => store.pallet_quote(region, pallet_type, pallets, self.insured)?,
            (None, Some(province)) => {
                store.pallet_quote_for_province(province, pallet_type, pallets, self.insured)?
            }
            (None, None) => return Err(AppError::validation("region or province is required")),
        };
        Ok(quote)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupageRequest {
    pub province: String,
    pub linear_meters: Option<RawNumber>,
    pub quintals: Option<RawNumber>,
    pub pallets: Option<RawNumber>,
    pub insured: bool,
}

impl GroupageRequest {
    pub fn measures(&self, defaults: &ShipmentDefaults) -> GroupageMeasures {
        GroupageMeasures {
            linear_meters: measure(&self.linear_meters),
            quintals: measure(&self.quintals).or(defaults.quintals),
            pallets: measure(&self.pallets).or(defaults.pallets),
        }
    }

    pub fn quote(
        &self,
        store: &TariffStore,
        defaults: &ShipmentDefaults,
    ) -> AppResult<TariffQuote> {
        if self.province.trim().is_empty() {
            return Err(AppError::validation("province is required"));
        }
        let measures = self.measures(defaults);
        Ok(store.groupage_quote(&self.province, &measures, self.insured)?)
    }
}
