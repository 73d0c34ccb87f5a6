//! Document line items.

use folio_shared::types::{AdjustmentId, CurrencyCode, LineItemId};
use serde::{Deserialize, Serialize};

use super::error::DocumentError;

/// A priced line on an invoice or bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier. Line identity survives reordering.
    pub id: LineItemId,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Number of units.
    pub quantity: u32,
    /// Price per unit in minor units.
    pub unit_price_cents: i64,
    /// Currency of the unit price. Must match the document's.
    pub currency: CurrencyCode,
    /// Taxes applied to this line.
    #[serde(default)]
    pub tax_adjustment_ids: Vec<AdjustmentId>,
    /// Discounts applied to this line when the document discounts per line.
    #[serde(default)]
    pub discount_adjustment_ids: Vec<AdjustmentId>,
}

impl LineItem {
    /// Creates a line with no adjustments.
    #[must_use]
    pub fn new(quantity: u32, unit_price_cents: i64, currency: CurrencyCode) -> Self {
        Self {
            id: LineItemId::new(),
            description: String::new(),
            quantity,
            unit_price_cents,
            currency,
            tax_adjustment_ids: Vec::new(),
            discount_adjustment_ids: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a tax reference.
    #[must_use]
    pub fn with_tax(mut self, id: AdjustmentId) -> Self {
        self.tax_adjustment_ids.push(id);
        self
    }

    /// Adds a discount reference.
    #[must_use]
    pub fn with_discount(mut self, id: AdjustmentId) -> Self {
        self.discount_adjustment_ids.push(id);
        self
    }

    /// `quantity * unit_price_cents`.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the product does not fit in `i64`.
    pub fn line_subtotal_cents(&self) -> Result<i64, DocumentError> {
        self.unit_price_cents
            .checked_mul(i64::from(self.quantity))
            .ok_or(DocumentError::Overflow)
    }
}
