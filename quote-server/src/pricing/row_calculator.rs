//! Row Price Calculator
//!
//! Turn one order line into its unit prices, line total and variance under a
//! given pricing mode:
//! - Standard: discount1 × discount2 on gross, then margin markup on net
//! - ClientDiscount: a single discount on gross, no margin
//!
//! Every stage is rounded to cents (half away from zero) before it feeds the
//! next one, so cent-level results are reproducible.

use rust_decimal::prelude::*;
use shared::models::{OrderLine, PricingMode, RowPricing, StandardTerms};

use crate::money::{
    MAX_QUANTITY, clamp_amount, clamp_margin, clamp_percent, round_money, to_decimal, to_f64,
};

/// `1 - percent/100`
#[inline]
fn remaining_share(percent: f64) -> Decimal {
    Decimal::ONE - to_decimal(percent) / Decimal::ONE_HUNDRED
}

/// Standard-mode unit prices.
///
/// Returns `(net, sell)`:
/// - net = round2(gross × (1 - d1/100) × (1 - d2/100))
/// - sell = round2(net / (1 - margin/100))
pub fn standard_unit_prices(gross_price: f64, terms: &StandardTerms) -> (Decimal, Decimal) {
    let gross = to_decimal(clamp_amount(gross_price));
    let d1 = clamp_percent(terms.discount1);
    let d2 = clamp_percent(terms.discount2);
    let margin = clamp_margin(terms.margin);

    let net = round_money(gross * remaining_share(d1) * remaining_share(d2));
    let sell = round_money(net / remaining_share(margin));
    (net, sell)
}

/// ClientDiscount-mode unit price: round2(gross × (1 - discount/100))
pub fn client_discount_unit_price(gross_price: f64, client_discount: f64) -> Decimal {
    let gross = to_decimal(clamp_amount(gross_price));
    round_money(gross * remaining_share(clamp_percent(client_discount)))
}

/// Price one line under `mode`.
///
/// The mode is an explicit parameter: probing the Standard price of a line
/// while the quote runs in ClientDiscount mode is just a call with
/// `PricingMode::Standard`.
pub fn calculate_row(line: &OrderLine, mode: PricingMode) -> RowPricing {
    let quantity = line.quantity.clamp(1, MAX_QUANTITY);

    let (net, sell) = match mode {
        PricingMode::ClientDiscount => {
            let sell = client_discount_unit_price(line.gross_price, line.client_discount());
            (sell, sell)
        }
        PricingMode::Standard => standard_unit_prices(line.gross_price, &line.standard_terms()),
    };

    let service = round_money(
        to_decimal(clamp_amount(line.transport_cost))
            + to_decimal(clamp_amount(line.installation_cost)),
    );
    let qty = Decimal::from(quantity);
    let line_total = round_money((sell + service) * qty);
    let variance = round_money(to_decimal(clamp_amount(line.sold_price)) - line_total);
    let unit_total = line_total / qty;

    RowPricing {
        net_unit: to_f64(net),
        sell_unit: to_f64(sell),
        service_unit: to_f64(service),
        quantity,
        line_total: to_f64(line_total),
        unit_total: to_f64(unit_total),
        variance: to_f64(variance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::MAX_AMOUNT;
    use shared::models::{CatalogEntry, LinePricing};

    fn line(gross: f64, d1: f64, d2: f64, margin: f64) -> OrderLine {
        let mut line = OrderLine::from_entry(&CatalogEntry {
            code: "T1".to_string(),
            description: "Test".to_string(),
            gross_price: gross,
            transport_cost: 0.0,
            installation_cost: 0.0,
        });
        line.pricing = LinePricing::Standard {
            terms: StandardTerms {
                discount1: d1,
                discount2: d2,
                margin,
            },
            client_discount: 0.0,
            backup: None,
        };
        line
    }

    #[test]
    fn test_standard_discount_then_margin() {
        let row = calculate_row(&line(100.0, 10.0, 0.0, 20.0), PricingMode::Standard);
        assert_eq!(row.net_unit, 90.0);
        assert_eq!(row.sell_unit, 112.5);
        assert_eq!(row.line_total, 112.5);
    }

    #[test]
    fn test_standard_two_stage_discount() {
        // 250 × 0.8 × 0.95 = 190
        let row = calculate_row(&line(250.0, 20.0, 5.0, 0.0), PricingMode::Standard);
        assert_eq!(row.net_unit, 190.0);
        assert_eq!(row.sell_unit, 190.0);
    }

    #[test]
    fn test_net_is_rounded_before_margin() {
        // net = round2(33.333) = 33.33, sell = round2(33.33 / 0.9) = 37.03
        let row = calculate_row(&line(100.0, 66.667, 0.0, 10.0), PricingMode::Standard);
        assert_eq!(row.net_unit, 33.33);
        assert_eq!(row.sell_unit, 37.03);
    }

    #[test]
    fn test_extreme_amounts_are_capped() {
        // gross above the Decimal range would otherwise read as 0
        let row = calculate_row(&line(1e30, 0.0, 0.0, 0.0), PricingMode::Standard);
        assert_eq!(row.sell_unit, MAX_AMOUNT);

        let mut big = line(1e27, 0.0, 0.0, 99.99);
        big.quantity = u32::MAX;
        big.transport_cost = f64::INFINITY;
        let row = calculate_row(&big, PricingMode::Standard);
        assert_eq!(row.quantity, MAX_QUANTITY);
        assert_eq!(row.net_unit, MAX_AMOUNT);
        assert_eq!(row.sell_unit, 1e13);
        assert_eq!(row.service_unit, MAX_AMOUNT);
        assert!(row.line_total.is_finite() && row.line_total > 0.0);

        let row = calculate_row(&big, PricingMode::ClientDiscount);
        assert_eq!(row.sell_unit, MAX_AMOUNT);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let row = calculate_row(&line(100.0, 150.0, -10.0, 0.0), PricingMode::Standard);
        assert_eq!(row.net_unit, 0.0);

        // margin above 99.99 behaves as 99.99
        let capped = calculate_row(&line(10.0, 0.0, 0.0, 250.0), PricingMode::Standard);
        let at_max = calculate_row(&line(10.0, 0.0, 0.0, 99.99), PricingMode::Standard);
        assert_eq!(capped.sell_unit, at_max.sell_unit);
        assert_eq!(at_max.sell_unit, 100000.0);
    }

    #[test]
    fn test_client_discount_mode_ignores_standard_terms() {
        let mut l = line(80.0, 0.0, 0.0, 0.0);
        l.pricing = LinePricing::ClientDiscount {
            client_discount: 12.5,
            backup: StandardTerms {
                discount1: 50.0,
                discount2: 0.0,
                margin: 30.0,
            },
        };
        let row = calculate_row(&l, PricingMode::ClientDiscount);
        assert_eq!(row.net_unit, 70.0);
        assert_eq!(row.sell_unit, 70.0);

        // probing Standard on a ClientDiscount line reads zero terms
        let probe = calculate_row(&l, PricingMode::Standard);
        assert_eq!(probe.sell_unit, 80.0);
    }

    #[test]
    fn test_services_quantity_and_variance() {
        let mut l = line(100.0, 10.0, 0.0, 0.0);
        l.transport_cost = 12.345;
        l.installation_cost = 7.5;
        l.quantity = 3;
        l.sold_price = 300.0;

        let row = calculate_row(&l, PricingMode::Standard);
        assert_eq!(row.service_unit, 19.85);
        // (90 + 19.85) × 3
        assert_eq!(row.line_total, 329.55);
        assert_eq!(row.unit_total, 109.85);
        assert_eq!(row.variance, -29.55);
    }

    #[test]
    fn test_negative_costs_and_zero_quantity() {
        let mut l = line(50.0, 0.0, 0.0, 0.0);
        l.transport_cost = -5.0;
        l.installation_cost = -1.0;
        l.quantity = 0;

        let row = calculate_row(&l, PricingMode::Standard);
        assert_eq!(row.service_unit, 0.0);
        assert_eq!(row.quantity, 1);
        assert_eq!(row.line_total, 50.0);
    }
}
