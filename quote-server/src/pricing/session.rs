//! Quote Session
//!
//! The context object every pricing operation runs against: the active
//! pricing mode, the order lines and the order-level settings. The engines
//! themselves hold no state; the session owns it and is owned by its caller.

use serde::{Deserialize, Serialize};
use shared::models::{
    Catalog, LinePricing, OrderLine, OrderTotals, PricedLine, PricingMode, QuoteSettings,
    QuoteSnapshot, StandardTerms,
};
use shared::util::new_line_id;

use super::equivalence::{equivalent_client_discount, switch_line};
use super::error::SessionError;
use super::order_calculator::calculate_totals;
use super::row_calculator::calculate_row;
use crate::money::{RawNumber, clamp_amount, clamp_margin, clamp_percent};

/// Editable numeric field of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineField {
    GrossPrice,
    Discount1,
    Discount2,
    ClientDiscount,
    Margin,
    TransportCost,
    InstallationCost,
    Quantity,
    SoldPrice,
}

/// Manually entered line, every field as typed by the user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManualLineInput {
    pub code: String,
    pub description: String,
    pub gross_price: RawNumber,
    pub discount1: RawNumber,
    pub discount2: RawNumber,
    pub client_discount: RawNumber,
    pub margin: RawNumber,
    pub transport_cost: RawNumber,
    pub installation_cost: RawNumber,
    pub quantity: RawNumber,
    pub sold_price: RawNumber,
}

impl ManualLineInput {
    /// Build a line carrying the strategy of `mode`.
    ///
    /// Under ClientDiscount the entered discount1/discount2/margin become the
    /// backup and the active client discount is their equivalent.
    pub fn into_line(self, mode: PricingMode) -> OrderLine {
        let terms = StandardTerms {
            discount1: clamp_percent(self.discount1.as_f64()),
            discount2: clamp_percent(self.discount2.as_f64()),
            margin: clamp_margin(self.margin.as_f64()),
        };
        let gross_price = clamp_amount(self.gross_price.as_f64());

        let pricing = match mode {
            PricingMode::Standard => LinePricing::Standard {
                terms,
                client_discount: clamp_percent(self.client_discount.as_f64()),
                backup: None,
            },
            PricingMode::ClientDiscount => LinePricing::ClientDiscount {
                client_discount: equivalent_client_discount(gross_price, &terms),
                backup: terms,
            },
        };

        OrderLine {
            id: new_line_id(),
            code: self.code.trim().to_string(),
            description: self.description.trim().to_string(),
            gross_price,
            transport_cost: clamp_amount(self.transport_cost.as_f64()),
            installation_cost: clamp_amount(self.installation_cost.as_f64()),
            quantity: self.quantity.as_quantity(),
            sold_price: clamp_amount(self.sold_price.as_f64()),
            pricing,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuoteSession {
    mode: PricingMode,
    lines: Vec<OrderLine>,
    settings: QuoteSettings,
}

impl QuoteSession {
    pub fn new(settings: QuoteSettings) -> Self {
        Self {
            mode: PricingMode::Standard,
            lines: Vec::new(),
            settings: QuoteSettings {
                auto_services: settings.auto_services,
                vat_rate: clamp_percent(settings.vat_rate),
            },
        }
    }

    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn settings(&self) -> &QuoteSettings {
        &self.settings
    }

    pub fn line(&self, id: &str) -> Result<&OrderLine, SessionError> {
        self.lines
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| SessionError::LineNotFound(id.to_string()))
    }

    fn line_mut(&mut self, id: &str) -> Result<&mut OrderLine, SessionError> {
        self.lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| SessionError::LineNotFound(id.to_string()))
    }

    // ==================== Lines ====================

    /// Copy a catalog entry into a new line
    pub fn add_from_catalog(
        &mut self,
        catalog: &Catalog,
        code: &str,
    ) -> Result<&OrderLine, SessionError> {
        let entry = catalog
            .find(code)
            .ok_or_else(|| SessionError::CatalogEntryNotFound(code.to_string()))?;

        let mut line = OrderLine::from_entry(entry);
        if !self.settings.auto_services {
            line.transport_cost = 0.0;
            line.installation_cost = 0.0;
        }
        switch_line(&mut line, self.mode);

        tracing::debug!(line_id = %line.id, code = %line.code, "Line added from catalog");
        Ok(self.push(line))
    }

    /// Add a manually entered line; every field is coerced into its domain
    pub fn add_manual(&mut self, input: ManualLineInput) -> &OrderLine {
        let line = input.into_line(self.mode);
        tracing::debug!(line_id = %line.id, code = %line.code, "Manual line added");
        self.push(line)
    }

    fn push(&mut self, line: OrderLine) -> &OrderLine {
        self.lines.push(line);
        &self.lines[self.lines.len() - 1]
    }

    pub fn remove_line(&mut self, id: &str) -> Result<OrderLine, SessionError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| SessionError::LineNotFound(id.to_string()))?;
        tracing::debug!(line_id = %id, "Line removed");
        Ok(self.lines.remove(index))
    }

    /// Single-field edit from raw user input.
    ///
    /// Values are coerced, never rejected. While Standard is active, edits to
    /// discount1/discount2/margin refresh the client-discount preview; while
    /// ClientDiscount is active they land in the backup and take effect on
    /// the way back to Standard.
    pub fn edit_line(
        &mut self,
        id: &str,
        field: LineField,
        raw: &RawNumber,
    ) -> Result<&OrderLine, SessionError> {
        let line = self.line_mut(id)?;

        match field {
            LineField::GrossPrice => line.gross_price = clamp_amount(raw.as_f64()),
            LineField::TransportCost => line.transport_cost = clamp_amount(raw.as_f64()),
            LineField::InstallationCost => line.installation_cost = clamp_amount(raw.as_f64()),
            LineField::SoldPrice => line.sold_price = clamp_amount(raw.as_f64()),
            LineField::Quantity => line.quantity = raw.as_quantity(),
            LineField::ClientDiscount => {
                let value = clamp_percent(raw.as_f64());
                match &mut line.pricing {
                    LinePricing::Standard {
                        client_discount, ..
                    }
                    | LinePricing::ClientDiscount {
                        client_discount, ..
                    } => *client_discount = value,
                }
            }
            LineField::Discount1 | LineField::Discount2 | LineField::Margin => {
                let gross_price = line.gross_price;
                let apply = |terms: &mut StandardTerms| match field {
                    LineField::Discount1 => terms.discount1 = clamp_percent(raw.as_f64()),
                    LineField::Discount2 => terms.discount2 = clamp_percent(raw.as_f64()),
                    _ => terms.margin = clamp_margin(raw.as_f64()),
                };
                match &mut line.pricing {
                    LinePricing::Standard {
                        terms,
                        client_discount,
                        backup,
                    } => {
                        apply(terms);
                        // a later switch restores the backup: keep it current
                        if let Some(saved) = backup {
                            *saved = *terms;
                        }
                        *client_discount = equivalent_client_discount(gross_price, terms);
                    }
                    LinePricing::ClientDiscount { backup, .. } => apply(backup),
                }
            }
        }

        tracing::debug!(line_id = %id, field = ?field, "Line edited");
        Ok(&*line)
    }

    /// Write a freight cost into the line's transport cost
    pub fn apply_freight(&mut self, id: &str, cost: f64) -> Result<&OrderLine, SessionError> {
        let line = self.line_mut(id)?;
        line.transport_cost = clamp_amount(cost);
        tracing::debug!(line_id = %id, cost = line.transport_cost, "Freight applied");
        Ok(&*line)
    }

    // ==================== Order level ====================

    /// Switch the pricing mode of the whole quote.
    ///
    /// Every line is moved to the matching strategy with its sell price
    /// unchanged. Returns `false` when `mode` is already active.
    pub fn set_mode(&mut self, mode: PricingMode) -> bool {
        if self.mode == mode {
            return false;
        }
        for line in &mut self.lines {
            switch_line(line, mode);
        }
        self.mode = mode;
        tracing::info!(mode = ?mode, lines = self.lines.len(), "Pricing mode switched");
        true
    }

    /// Enabled: service costs come back from the catalog (0 when the code is
    /// no longer there). Disabled: service costs are zeroed.
    pub fn set_auto_services(&mut self, enabled: bool, catalog: &Catalog) {
        self.settings.auto_services = enabled;
        for line in &mut self.lines {
            let entry = catalog.find(&line.code).filter(|_| enabled);
            line.transport_cost = entry.map(|e| e.transport_cost).unwrap_or(0.0);
            line.installation_cost = entry.map(|e| e.installation_cost).unwrap_or(0.0);
        }
        tracing::info!(enabled, "Auto services toggled");
    }

    pub fn set_vat_rate(&mut self, raw: &RawNumber) {
        self.settings.vat_rate = clamp_percent(raw.as_f64());
    }

    pub fn priced_lines(&self) -> Vec<PricedLine> {
        self.lines
            .iter()
            .map(|line| PricedLine {
                line: line.clone(),
                result: calculate_row(line, self.mode),
            })
            .collect()
    }

    pub fn totals(&self) -> OrderTotals {
        calculate_totals(&self.lines, self.mode, &self.settings)
    }

    pub fn snapshot(&self) -> QuoteSnapshot {
        QuoteSnapshot {
            mode: self.mode,
            settings: self.settings,
            lines: self.priced_lines(),
            totals: self.totals(),
        }
    }
}
