//! Catalog ingestion boundary
//!
//! CSV bytes are parsed upstream; this module receives the parsed records
//! (column name → cell text) and maps them onto [`CatalogEntry`] values.
//! Column names are case-sensitive.

use std::collections::HashMap;

use shared::models::{Catalog, CatalogEntry};

use crate::money::{clamp_amount, parse_decimal};

pub const COLUMN_CODE: &str = "Codice";
pub const COLUMN_DESCRIPTION: &str = "Descrizione";
pub const COLUMN_GROSS_PRICE: &str = "PrezzoLordo";
pub const COLUMN_TRANSPORT_COST: &str = "CostoTrasporto";
pub const COLUMN_INSTALLATION_COST: &str = "CostoInstallazione";

/// One parsed CSV row
pub type CatalogRecord = HashMap<String, String>;

fn text(record: &CatalogRecord, column: &str) -> String {
    record
        .get(column)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn amount(record: &CatalogRecord, column: &str) -> f64 {
    record
        .get(column)
        .map(|v| clamp_amount(parse_decimal(v)))
        .unwrap_or(0.0)
}

/// Map parsed records onto catalog entries.
///
/// Missing text reads as "", missing or non-numeric amounts as 0, negative
/// amounts are clamped to 0. Records with every cell blank are skipped.
pub fn normalize_records(records: &[CatalogRecord]) -> Vec<CatalogEntry> {
    records
        .iter()
        .filter(|record| record.values().any(|v| !v.trim().is_empty()))
        .map(|record| CatalogEntry {
            code: text(record, COLUMN_CODE),
            description: text(record, COLUMN_DESCRIPTION),
            gross_price: amount(record, COLUMN_GROSS_PRICE),
            transport_cost: amount(record, COLUMN_TRANSPORT_COST),
            installation_cost: amount(record, COLUMN_INSTALLATION_COST),
        })
        .collect()
}

/// Build a catalog from parsed records
pub fn build_catalog(source_name: Option<String>, records: &[CatalogRecord]) -> Catalog {
    let entries = normalize_records(records);
    tracing::info!(
        source = source_name.as_deref().unwrap_or("-"),
        records = records.len(),
        entries = entries.len(),
        "Catalog loaded"
    );
    Catalog::new(source_name, entries)
}
