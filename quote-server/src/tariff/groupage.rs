//! Groupage Tariff Calculator
//!
//! Partial-load shipments are priced by up to three competing measures
//! (linear meters, quintals, pallet count) looked up in the province
//! bucket's band tables. The candidates are then combined by the configured
//! selection policy.

use shared::models::{
    GroupageRates, Measure, SelectionPolicy, TariffBucket, TariffCandidate, TariffQuote,
};

use super::bucket::resolve_bucket;
use super::error::TariffError;
use super::insurance::apply_insurance;
use super::range::lookup_range_price;
use crate::money::{clamp_amount, to_decimal, to_f64};

/// Shipment measures; `None` means "not measured"
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupageMeasures {
    pub linear_meters: Option<f64>,
    pub quintals: Option<f64>,
    pub pallets: Option<f64>,
}

/// Candidate prices in priority order (linear meters, quintals, pallets)
pub fn collect_candidates(
    bucket: &TariffBucket,
    measures: &GroupageMeasures,
) -> Vec<TariffCandidate> {
    [
        (Measure::LinearMeters, measures.linear_meters, &bucket.linear_meters),
        (Measure::Quintals, measures.quintals, &bucket.quintals),
        (Measure::Pallets, measures.pallets, &bucket.pallets),
    ]
    .into_iter()
    .filter_map(|(measure, quantity, bands)| {
        let quantity = quantity?;
        let price = lookup_range_price(bands, quantity)?;
        Some(TariffCandidate {
            measure,
            quantity,
            price,
        })
    })
    .collect()
}

/// Combine the candidates under `policy`; `None` when there are none
pub fn select_candidate(
    candidates: &[TariffCandidate],
    policy: SelectionPolicy,
) -> Option<&TariffCandidate> {
    match policy {
        SelectionPolicy::First => candidates.first(),
        SelectionPolicy::Max => candidates
            .iter()
            .reduce(|best, c| if c.price > best.price { c } else { best }),
        SelectionPolicy::Min => candidates
            .iter()
            .reduce(|best, c| if c.price < best.price { c } else { best }),
    }
}

/// Groupage cost to `province`
pub fn calculate_groupage(
    rates: &GroupageRates,
    province: &str,
    measures: &GroupageMeasures,
    insured: bool,
) -> Result<TariffQuote, TariffError> {
    let bucket = resolve_bucket(&rates.provinces, province)?;
    let candidates = collect_candidates(bucket, measures);
    let policy = rates.meta.selection_mode;

    let selected = select_candidate(&candidates, policy).ok_or_else(|| {
        TariffError::InsufficientMeasures {
            bucket: bucket.key.clone(),
        }
    })?;

    let pct = rates.meta.insurance_pct;
    let surcharged = apply_insurance(to_decimal(clamp_amount(selected.price)), insured, pct);

    let listed = candidates
        .iter()
        .map(|c| format!("{} {} → {:.2} €", c.measure.label(), c.quantity, c.price))
        .collect::<Vec<_>>()
        .join(", ");
    let mut explanation = format!(
        "Groupage [{}]: {}; {} → {:.2} € ({})",
        bucket.key,
        listed,
        policy,
        selected.price,
        selected.measure.label()
    );
    if insured {
        explanation.push_str(&format!(
            " + insurance {}% ({:.2} €)",
            pct,
            to_f64(surcharged.amount)
        ));
    }

    tracing::debug!(
        bucket = %bucket.key,
        policy = %policy,
        candidates = candidates.len(),
        price = selected.price,
        "Groupage tariff resolved"
    );

    Ok(TariffQuote {
        cost: to_f64(surcharged.total),
        insured,
        insurance_amount: to_f64(surcharged.amount),
        explanation,
        candidates,
    })
}
