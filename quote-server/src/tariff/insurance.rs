//! Insurance surcharge shared by the pallet and groupage calculators

use rust_decimal::prelude::*;

use crate::money::{clamp_percent, to_decimal};

/// Result of applying (or not) the surcharge to a base cost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surcharged {
    /// Base cost plus surcharge
    pub total: Decimal,
    /// Surcharge alone (zero when not insured)
    pub amount: Decimal,
}

/// `cost + cost × pct/100` when insured; `pct` is a percentage (3 = 3 %),
/// clamped to 0-100
pub fn apply_insurance(cost: Decimal, insured: bool, pct: f64) -> Surcharged {
    let amount = if insured {
        cost * to_decimal(clamp_percent(pct)) / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    Surcharged {
        total: cost + amount,
        amount,
    }
}
