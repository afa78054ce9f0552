//! Order Line Model
//!
//! A mutable copy of a catalog entry plus the pricing inputs the user edits.
//! The Standard-mode fields and the client-discount field never coexist as
//! active inputs: [`LinePricing`] carries whichever strategy is in force.

use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use crate::util::new_line_id;

/// Process-wide pricing mode of a quote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// discount1 × discount2 on gross, then margin markup
    #[default]
    Standard,
    /// single discount on gross, no margin
    ClientDiscount,
}

/// Standard-mode inputs, all percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardTerms {
    /// First discount stage (0-100)
    pub discount1: f64,
    /// Second discount stage (0-100), multiplicative with the first
    pub discount2: f64,
    /// Markup on net (0-99.99)
    pub margin: f64,
}

/// Active pricing strategy of a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LinePricing {
    Standard {
        terms: StandardTerms,
        /// Equivalent single discount: a preview while Standard is active,
        /// the last computed value after a switch back from ClientDiscount
        client_discount: f64,
        /// Terms saved by the first switch to ClientDiscount
        #[serde(default, skip_serializing_if = "Option::is_none")]
        backup: Option<StandardTerms>,
    },
    ClientDiscount {
        client_discount: f64,
        /// Terms restored when the quote goes back to Standard
        backup: StandardTerms,
    },
}

impl Default for LinePricing {
    fn default() -> Self {
        Self::Standard {
            terms: StandardTerms::default(),
            client_discount: 0.0,
            backup: None,
        }
    }
}

/// One line of a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub code: String,
    pub description: String,
    pub gross_price: f64,
    pub transport_cost: f64,
    pub installation_cost: f64,
    /// Integer ≥ 1
    pub quantity: u32,
    /// Externally recorded actual sale price, for variance reporting
    pub sold_price: f64,
    pub pricing: LinePricing,
}

impl OrderLine {
    /// New line copied from a catalog entry: no discounts, quantity 1
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            id: new_line_id(),
            code: entry.code.clone(),
            description: entry.description.clone(),
            gross_price: entry.gross_price,
            transport_cost: entry.transport_cost,
            installation_cost: entry.installation_cost,
            quantity: 1,
            sold_price: 0.0,
            pricing: LinePricing::default(),
        }
    }

    /// Strategy currently carried by the line
    pub fn mode(&self) -> PricingMode {
        match self.pricing {
            LinePricing::Standard { .. } => PricingMode::Standard,
            LinePricing::ClientDiscount { .. } => PricingMode::ClientDiscount,
        }
    }

    /// Standard-mode inputs as they apply to pricing.
    /// Under ClientDiscount they read as zero.
    pub fn standard_terms(&self) -> StandardTerms {
        match self.pricing {
            LinePricing::Standard { terms, .. } => terms,
            LinePricing::ClientDiscount { .. } => StandardTerms::default(),
        }
    }

    pub fn client_discount(&self) -> f64 {
        match self.pricing {
            LinePricing::Standard {
                client_discount, ..
            }
            | LinePricing::ClientDiscount {
                client_discount, ..
            } => client_discount,
        }
    }

    pub fn backup(&self) -> Option<StandardTerms> {
        match self.pricing {
            LinePricing::Standard { backup, .. } => backup,
            LinePricing::ClientDiscount { backup, .. } => Some(backup),
        }
    }
}
