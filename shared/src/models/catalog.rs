//! Catalog Model
//!
//! The price list an order is built from. Entries are read-only once loaded;
//! order lines copy them.

use serde::{Deserialize, Serialize};

use crate::util::now_millis;

/// One price-list row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Article code, unique within a catalog
    pub code: String,
    pub description: String,
    /// Undiscounted unit price
    pub gross_price: f64,
    /// Per-unit transport cost
    pub transport_cost: f64,
    /// Per-unit installation cost
    pub installation_cost: f64,
}

/// A loaded price list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Name of the source (usually the uploaded file name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    /// Load time (Unix millis)
    pub loaded_at: i64,
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(source_name: Option<String>, entries: Vec<CatalogEntry>) -> Self {
        Self {
            source_name,
            loaded_at: now_millis(),
            entries,
        }
    }

    /// Exact lookup by article code
    pub fn find(&self, code: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// Case-insensitive substring match on code or description.
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&CatalogEntry> {
        let needle = term.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.code.to_lowercase().contains(&needle)
                    || e.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
