//! Numeric Normalizer
//!
//! Every value that reaches the pricing and tariff engines passes through
//! here first:
//! - locale-flexible parsing ("60,43", " 60.43 ", "" → 0)
//! - money rounding (2 decimal places, half away from zero)
//! - clamping into the valid domain of each field
//!
//! Malformed input is never rejected. It is coerced to the nearest valid
//! value so that half-typed user entries keep the quote computable.

use std::num::IntErrorKind;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Money precision
pub const DECIMAL_PLACES: u32 = 2;

/// Upper bound of the margin percentage (keeps `1 - margin/100` away from zero)
pub const MAX_MARGIN: f64 = 99.99;

/// Largest accepted price, cost or measure.
///
/// With [`MAX_MARGIN`] and [`MAX_QUANTITY`] a line total stays below 1e18,
/// well inside the `Decimal` range.
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Largest accepted line quantity
pub const MAX_QUANTITY: u32 = 99_999;

// ==================== Conversion Helpers ====================

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round a Decimal to money precision, staying in Decimal
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round an f64 money value to cents
#[inline]
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

// ==================== Parsing ====================

/// Parse a user-entered decimal.
///
/// Whitespace is ignored anywhere, the first comma is read as the decimal
/// separator, and the longest numeric prefix wins ("12,5 €" → 12.5).
/// Anything without a numeric prefix reads as 0.
pub fn parse_decimal(raw: &str) -> f64 {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = compact.replacen(',', ".", 1);
    let prefix = numeric_prefix(&normalized);
    prefix
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Parse a quantity: leading integer digits, clamped to `[1, MAX_QUANTITY]`
pub fn parse_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    match trimmed[..digits_end].parse::<i64>() {
        Ok(n) => quantity_from_i64(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_QUANTITY,
        Err(_) => 1,
    }
}

/// Coerce a numeric quantity: truncated toward zero, then clamped to
/// `[1, MAX_QUANTITY]`
pub fn coerce_quantity(value: f64) -> u32 {
    if !value.is_finite() {
        return 1;
    }
    quantity_from_i64(value.trunc() as i64)
}

fn quantity_from_i64(n: i64) -> u32 {
    let capped = n.clamp(1, i64::from(MAX_QUANTITY));
    u32::try_from(capped).unwrap_or(MAX_QUANTITY)
}

/// Longest prefix of `s` that reads as a decimal literal
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut has_digits = i > int_start;
    if has_digits {
        end = i;
    }

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i > frac_start {
            has_digits = true;
            end = i;
        } else if has_digits {
            // "12." is still 12
            end = i;
        }
    }

    if has_digits && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    &s[..end]
}

// ==================== Clamping ====================

/// Clamp into `[min, max]`; NaN reads as `min`
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Discount percentages: [0, 100]
#[inline]
pub fn clamp_percent(value: f64) -> f64 {
    clamp(value, 0.0, 100.0)
}

/// Margin percentage: [0, 99.99]
#[inline]
pub fn clamp_margin(value: f64) -> f64 {
    clamp(value, 0.0, MAX_MARGIN)
}

/// Prices, costs and measures: [0, MAX_AMOUNT]
#[inline]
pub fn clamp_amount(value: f64) -> f64 {
    clamp(value, 0.0, MAX_AMOUNT)
}

// ==================== Raw input ====================

/// A value as it arrives from user entry: either already numeric or raw text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(n) if n.is_finite() => *n,
            Self::Number(_) => 0.0,
            Self::Text(s) => parse_decimal(s),
        }
    }

    pub fn as_quantity(&self) -> u32 {
        match self {
            Self::Number(n) => coerce_quantity(*n),
            Self::Text(s) => parse_quantity(s),
        }
    }
}

impl Default for RawNumber {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
