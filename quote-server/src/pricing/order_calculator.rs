//! Order-Level Totals
//!
//! Sums per-line results into the order subtotals, the taxable base and VAT.
//! Consumes only the row calculator's output.

use rust_decimal::prelude::*;
use shared::models::{OrderLine, OrderTotals, PricingMode, QuoteSettings};

use super::row_calculator::calculate_row;
use crate::money::{clamp, clamp_amount, clamp_percent, to_decimal, to_f64};

/// Bound of the displayed order-level equivalent discount
const EQUIVALENT_DISCOUNT_LIMIT: f64 = 9999.0;

/// Calculate order totals
///
/// # Calculation Steps
/// 1. Σ sell × qty (without services), Σ line total (with services),
///    Σ sold price, Σ variance
/// 2. Taxable base: the with-services sum when services are auto-populated,
///    the without-services sum otherwise
/// 3. Tax = base × vat/100 (vat clamped 0-100), total = base + tax
/// 4. Equivalent discount: `(1 - Σ sell×qty / Σ gross×qty) × 100`
pub fn calculate_totals(
    lines: &[OrderLine],
    mode: PricingMode,
    settings: &QuoteSettings,
) -> OrderTotals {
    let mut without_services = Decimal::ZERO;
    let mut with_services = Decimal::ZERO;
    let mut sold = Decimal::ZERO;
    let mut variance = Decimal::ZERO;
    let mut gross_base = Decimal::ZERO;

    for line in lines {
        let row = calculate_row(line, mode);
        let qty = Decimal::from(row.quantity);

        without_services += to_decimal(row.sell_unit) * qty;
        with_services += to_decimal(row.line_total);
        sold += to_decimal(clamp_amount(line.sold_price));
        variance += to_decimal(row.variance);
        gross_base += to_decimal(clamp_amount(line.gross_price)) * qty;
    }

    let taxable = if settings.auto_services {
        with_services
    } else {
        without_services
    };
    // round the base first: tax is computed on the displayed amount
    let taxable = to_decimal(to_f64(taxable));
    let vat_rate = clamp_percent(settings.vat_rate);
    let tax = to_decimal(to_f64(taxable * to_decimal(vat_rate) / Decimal::ONE_HUNDRED));
    let total = taxable + tax;

    OrderTotals {
        net_without_services: to_f64(without_services),
        total_with_services: to_f64(with_services),
        total_sold: to_f64(sold),
        total_variance: to_f64(variance),
        taxable_base: to_f64(taxable),
        vat_rate,
        tax: to_f64(tax),
        total: to_f64(total),
        equivalent_discount: equivalent_order_discount(gross_base, without_services),
    }
}

/// `None` when there is no gross base to compare against
fn equivalent_order_discount(gross_base: Decimal, sell_total: Decimal) -> Option<f64> {
    let base = to_decimal(to_f64(gross_base));
    if base <= Decimal::ZERO {
        return None;
    }
    let sell = to_decimal(to_f64(sell_total));
    let equivalent = (Decimal::ONE - sell / base) * Decimal::ONE_HUNDRED;
    Some(clamp(
        to_f64(equivalent),
        -EQUIVALENT_DISCOUNT_LIMIT,
        EQUIVALENT_DISCOUNT_LIMIT,
    ))
}
