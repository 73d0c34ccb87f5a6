//! Document and totals types.

use folio_shared::types::{CurrencyCode, DocumentId, LineItemId, Money};
use serde::{Deserialize, Serialize};

use super::diff::{LineDiff, LineSync};
use super::line_item::LineItem;
use crate::adjustment::AdjustmentRate;
use crate::currency::{CurrencyConverter, CurrencyError, CurrencyTable};

/// Whether a document is a sale or a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Sales invoice (money owed to us).
    Invoice,
    /// Vendor bill (money we owe).
    Bill,
}

/// How discounts are computed on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMethod {
    /// Each line's own discounts, summed.
    PerLineItem,
    /// One discount on the document subtotal.
    PerDocument,
}

/// Discount method together with the document-level rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountPolicy {
    /// Use each line's `discount_adjustment_ids`.
    #[default]
    PerLineItem,
    /// Apply this rate once to the subtotal. Per-line discount ids are ignored.
    PerDocument(AdjustmentRate),
}

impl DiscountPolicy {
    /// The discount method.
    #[must_use]
    pub const fn discount_method(&self) -> DiscountMethod {
        match self {
            Self::PerLineItem => DiscountMethod::PerLineItem,
            Self::PerDocument(_) => DiscountMethod::PerDocument,
        }
    }
}

/// An invoice or bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,
    /// Invoice or bill.
    pub kind: DocumentKind,
    /// Currency of every line and of the totals.
    pub currency: CurrencyCode,
    /// Lines, in display order.
    #[serde(default)]
    pub lines: Vec<LineItem>,
    /// Discount policy.
    #[serde(default)]
    pub discount: DiscountPolicy,
}

impl Document {
    /// Creates an empty document with per-line discounts.
    #[must_use]
    pub fn new(kind: DocumentKind, currency: CurrencyCode) -> Self {
        Self {
            id: DocumentId::new(),
            kind,
            currency,
            lines: Vec::new(),
            discount: DiscountPolicy::PerLineItem,
        }
    }

    /// Sets the discount policy.
    #[must_use]
    pub fn with_discount(mut self, discount: DiscountPolicy) -> Self {
        self.discount = discount;
        self
    }

    /// Appends a line.
    #[must_use]
    pub fn with_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// The discount method.
    #[must_use]
    pub const fn discount_method(&self) -> DiscountMethod {
        self.discount.discount_method()
    }

    /// Replaces the line collection, returning which lines were removed,
    /// added and retained (by identity).
    pub fn replace_lines(&mut self, lines: Vec<LineItem>) -> LineDiff {
        let diff = LineSync::diff(&self.lines, &lines);
        self.lines = lines;
        diff
    }
}

/// Per-line share of the document totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    /// The line.
    pub line_id: LineItemId,
    /// `quantity * unit_price`.
    pub subtotal_cents: i64,
    /// Taxes on this line.
    pub tax_cents: i64,
    /// Recoverable part of `tax_cents`.
    pub recoverable_tax_cents: i64,
    /// Discount on this line, or its share of the document discount.
    pub discount_cents: i64,
    /// `subtotal + tax - discount`.
    pub total_cents: i64,
}

/// Authoritative document totals.
///
/// `grand_total = subtotal + tax_total - discount_total` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line subtotals.
    pub subtotal: Money,
    /// Sum of line taxes.
    pub tax_total: Money,
    /// Document discount.
    pub discount_total: Money,
    /// What the counterparty pays.
    pub grand_total: Money,
    /// Part of `tax_total` that can be reclaimed.
    pub recoverable_tax: Money,
    /// Per-line breakdown. Sums exactly to the document figures.
    /// Empty on converted totals.
    #[serde(default)]
    pub lines: Vec<LineTotals>,
}

impl Totals {
    /// Currency of every figure.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.grand_total.currency
    }

    /// Converts into `target`.
    ///
    /// Subtotal, tax, discount and recoverable tax are converted one by one
    /// and the grand total is derived from them, so the decomposition still
    /// holds after rounding. The per-line breakdown is dropped.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` or `Overflow`.
    pub fn convert_to(&self, target: CurrencyCode, table: &CurrencyTable) -> Result<Self, CurrencyError> {
        if self.currency() == target {
            return Ok(self.clone());
        }

        let subtotal = CurrencyConverter::convert(self.subtotal, target, table)?;
        let tax_total = CurrencyConverter::convert(self.tax_total, target, table)?;
        let discount_total = CurrencyConverter::convert(self.discount_total, target, table)?;
        let recoverable_tax = CurrencyConverter::convert(self.recoverable_tax, target, table)?;
        let grand_total = subtotal.checked_add(&tax_total)?.checked_sub(&discount_total)?;

        Ok(Self {
            subtotal,
            tax_total,
            discount_total,
            grand_total,
            recoverable_tax,
            lines: Vec::new(),
        })
    }
}
