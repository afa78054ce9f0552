//! Client-Discount Equivalence Solver
//!
//! Finds the single discount on gross that reproduces a line's Standard sell
//! price, and uses it to move lines between pricing strategies without
//! changing what the customer pays.

use rust_decimal::prelude::*;
use shared::models::{LinePricing, OrderLine, PricingMode, StandardTerms};

use super::row_calculator::standard_unit_prices;
use crate::money::{clamp_amount, clamp_percent, to_decimal};

/// Discount percentage that turns `gross_price` into the Standard sell price
/// of `terms`.
///
/// `clamp((1 - sell/gross) × 100, 0, 100)`; 0 when gross ≤ 0. A margin
/// markup that lifts sell above gross clamps to 0.
pub fn equivalent_client_discount(gross_price: f64, terms: &StandardTerms) -> f64 {
    if gross_price <= 0.0 || !gross_price.is_finite() {
        return 0.0;
    }
    let gross_price = clamp_amount(gross_price);
    let (_, sell) = standard_unit_prices(gross_price, terms);
    let gross = to_decimal(gross_price);
    let equivalent = (Decimal::ONE - sell / gross) * Decimal::ONE_HUNDRED;
    clamp_percent(equivalent.to_f64().unwrap_or_default())
}

/// Move one line to the `target` strategy.
///
/// To ClientDiscount: the current terms are backed up unless a backup
/// already exists, the equivalent discount becomes the active input and the
/// Standard terms read as zero.
///
/// To Standard: the terms come back from the backup; the last client
/// discount stays on the line as inert memory.
///
/// Returns `false` when the line already carries the target strategy.
pub fn switch_line(line: &mut OrderLine, target: PricingMode) -> bool {
    if line.mode() == target {
        return false;
    }

    line.pricing = match (&line.pricing, target) {
        (LinePricing::Standard { terms, backup, .. }, PricingMode::ClientDiscount) => {
            LinePricing::ClientDiscount {
                client_discount: equivalent_client_discount(line.gross_price, terms),
                backup: backup.unwrap_or(*terms),
            }
        }
        (
            LinePricing::ClientDiscount {
                client_discount,
                backup,
            },
            PricingMode::Standard,
        ) => LinePricing::Standard {
            terms: *backup,
            client_discount: *client_discount,
            backup: Some(*backup),
        },
        (current, _) => current.clone(),
    };
    true
}
