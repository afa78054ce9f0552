//! Pallet Tariff Calculator
//!
//! Full-pallet shipments: flat rate per pallet type and region, times the
//! pallet count, plus the optional insurance surcharge.

use rust_decimal::prelude::*;
use shared::models::{PalletRates, TariffQuote};

use super::error::TariffError;
use super::insurance::apply_insurance;
use crate::money::{clamp_amount, coerce_quantity, to_decimal, to_f64};

/// Cost of `pallet_count` pallets of `pallet_type` shipped to `region`.
///
/// The count is floored and at least 1.
pub fn calculate_pallet(
    rates: &PalletRates,
    region: &str,
    pallet_type: &str,
    pallet_count: f64,
    insured: bool,
) -> Result<TariffQuote, TariffError> {
    let region_rates = rates
        .rates
        .get(region)
        .ok_or_else(|| TariffError::RegionNotConfigured {
            region: region.to_string(),
        })?;
    let rate = *region_rates
        .get(pallet_type)
        .ok_or_else(|| TariffError::RateNotFound {
            region: region.to_string(),
            pallet_type: pallet_type.to_string(),
        })?;

    let rate = clamp_amount(rate);
    let count = coerce_quantity(pallet_count);
    let base = to_decimal(rate) * Decimal::from(count);
    let pct = rates.meta.insurance_pct;
    let surcharged = apply_insurance(base, insured, pct);

    let mut explanation = format!(
        "{} {}: {:.2} € × {} pallet{} = {:.2} €",
        region,
        pallet_type,
        rate,
        count,
        if count == 1 { "" } else { "s" },
        to_f64(base)
    );
    if insured {
        explanation.push_str(&format!(
            " + insurance {}% ({:.2} €)",
            pct,
            to_f64(surcharged.amount)
        ));
    }

    Ok(TariffQuote {
        cost: to_f64(surcharged.total),
        insured,
        insurance_amount: to_f64(surcharged.amount),
        explanation,
        candidates: Vec::new(),
    })
}
