//! Range Price Lookup

use shared::models::RangeBand;

/// Price of the first band with `min ≤ quantity ≤ max`.
///
/// Quantities beyond every band fall back to the last band: tables list
/// their top band as open-ended. `None` only for an empty table or a
/// non-finite quantity.
pub fn lookup_range_price(bands: &[RangeBand], quantity: f64) -> Option<f64> {
    if !quantity.is_finite() {
        return None;
    }
    bands
        .iter()
        .find(|band| band.contains(quantity))
        .or_else(|| bands.last())
        .map(|band| band.price)
}
