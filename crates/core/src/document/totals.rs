//! Document totals calculation.
//!
//! Order of operations:
//! 1. `subtotal` = sum of line subtotals
//! 2. `tax_total` = taxes applied to each line subtotal, summed
//! 3. `discount_total` = per-line discounts summed, or one document
//!    discount applied to `subtotal`
//! 4. `grand_total = subtotal + tax_total - discount_total`
//!
//! Tax and discount both use the pre-adjustment subtotal as their base.
//! Neither is computed on top of the other.

use folio_shared::types::{CurrencyCode, Money, MoneyError};
use tracing::debug;

use super::error::DocumentError;
use super::line_item::LineItem;
use super::types::{DiscountPolicy, Document, LineTotals, Totals};
use crate::adjustment::{AdjustmentCatalog, AdjustmentCategory, RateCalculator};
use crate::context::CalcContext;
use crate::currency::{AllocationUtil, CurrencyTable};

/// Stateless calculator for document totals.
pub struct DocumentTotalsCalculator;

impl DocumentTotalsCalculator {
    /// Computes the totals of `document`.
    ///
    /// # Errors
    ///
    /// See [`DocumentTotalsCalculator::compute`].
    pub fn compute_document(
        document: &Document,
        catalog: &AdjustmentCatalog,
        ctx: &CalcContext,
    ) -> Result<Totals, DocumentError> {
        Self::compute(
            document.currency,
            &document.lines,
            document.discount,
            catalog,
            ctx,
        )
    }

    /// Computes the totals of `document` and expresses them in `target`.
    ///
    /// # Errors
    ///
    /// See [`DocumentTotalsCalculator::compute`], plus `Currency` when a
    /// code is missing from `table` or the converted amounts overflow.
    pub fn compute_converted(
        document: &Document,
        catalog: &AdjustmentCatalog,
        ctx: &CalcContext,
        target: CurrencyCode,
        table: &CurrencyTable,
    ) -> Result<Totals, DocumentError> {
        let totals = Self::compute_document(document, catalog, ctx)?;
        Ok(totals.convert_to(target, table)?)
    }

    /// Computes totals for `lines` in `currency`.
    ///
    /// Only adjustments active on `ctx.as_of` contribute. With a
    /// per-document discount, line discount ids are not looked at and the
    /// discount is shared out to lines by subtotal so the per-line
    /// breakdown adds up. A document without lines still carries its
    /// per-document discount, with an empty breakdown.
    ///
    /// # Errors
    ///
    /// - `Money(CurrencyMismatch)` if a line is in another currency
    /// - `Adjustment(UnknownAdjustment | CategoryMismatch)` for bad references
    /// - `Overflow` if any sum leaves the `i64` range
    pub fn compute(
        currency: CurrencyCode,
        lines: &[LineItem],
        discount: DiscountPolicy,
        catalog: &AdjustmentCatalog,
        ctx: &CalcContext,
    ) -> Result<Totals, DocumentError> {
        let mut breakdown = Vec::with_capacity(lines.len());
        for line in lines {
            breakdown.push(Self::line_totals(currency, line, discount, catalog, ctx)?);
        }

        let subtotal = sum(breakdown.iter().map(|l| l.subtotal_cents))?;
        let tax_total = sum(breakdown.iter().map(|l| l.tax_cents))?;
        let recoverable_tax = sum(breakdown.iter().map(|l| l.recoverable_tax_cents))?;

        let discount_total = match discount {
            DiscountPolicy::PerLineItem => sum(breakdown.iter().map(|l| l.discount_cents))?,
            DiscountPolicy::PerDocument(rate) => {
                let amount = RateCalculator::apply_rate(rate, subtotal)?;
                let weights: Vec<i64> = breakdown.iter().map(|l| l.subtotal_cents).collect();
                let shares = AllocationUtil::allocate_by_weights(amount, &weights);
                for (line, share) in breakdown.iter_mut().zip(shares) {
                    line.discount_cents = share;
                }
                amount
            }
        };

        for line in &mut breakdown {
            line.total_cents = net(line.subtotal_cents, line.tax_cents, line.discount_cents)?;
        }
        let grand_total = net(subtotal, tax_total, discount_total)?;

        debug!(
            %currency,
            lines = lines.len(),
            discount_method = ?discount.discount_method(),
            subtotal,
            tax_total,
            discount_total,
            grand_total,
            "Computed document totals"
        );

        Ok(Totals {
            subtotal: Money::new(subtotal, currency),
            tax_total: Money::new(tax_total, currency),
            discount_total: Money::new(discount_total, currency),
            grand_total: Money::new(grand_total, currency),
            recoverable_tax: Money::new(recoverable_tax, currency),
            lines: breakdown,
        })
    }

    fn line_totals(
        currency: CurrencyCode,
        line: &LineItem,
        discount: DiscountPolicy,
        catalog: &AdjustmentCatalog,
        ctx: &CalcContext,
    ) -> Result<LineTotals, DocumentError> {
        if line.currency != currency {
            return Err(MoneyError::CurrencyMismatch {
                left: currency,
                right: line.currency,
            }
            .into());
        }

        let subtotal = line.line_subtotal_cents()?;

        let taxes = catalog.resolve(&line.tax_adjustment_ids, AdjustmentCategory::Tax)?;
        let tax = RateCalculator::apply_all(taxes.iter().copied(), subtotal, ctx.as_of)?;
        let recoverable_tax = RateCalculator::apply_all(
            taxes.iter().copied().filter(|t| t.recoverable),
            subtotal,
            ctx.as_of,
        )?;

        // Per-document discounts are filled in once the subtotal is known.
        let discount_cents = match discount {
            DiscountPolicy::PerLineItem => {
                let discounts =
                    catalog.resolve(&line.discount_adjustment_ids, AdjustmentCategory::Discount)?;
                RateCalculator::apply_all(discounts, subtotal, ctx.as_of)?
            }
            DiscountPolicy::PerDocument(_) => 0,
        };

        Ok(LineTotals {
            line_id: line.id,
            subtotal_cents: subtotal,
            tax_cents: tax,
            recoverable_tax_cents: recoverable_tax,
            discount_cents,
            total_cents: 0,
        })
    }
}

fn sum(mut values: impl Iterator<Item = i64>) -> Result<i64, DocumentError> {
    values.try_fold(0_i64, |acc, v| acc.checked_add(v).ok_or(DocumentError::Overflow))
}

fn net(subtotal: i64, tax: i64, discount: i64) -> Result<i64, DocumentError> {
    subtotal
        .checked_add(tax)
        .and_then(|v| v.checked_sub(discount))
        .ok_or(DocumentError::Overflow)
}
