//! Applying adjustment rates to a base amount.
//!
//! Percentages are applied in integer arithmetic:
//! `round_half_up(base * raw / (100 * SCALE))`, where half-up rounds
//! midpoints away from zero. Fixed adjustments ignore the base entirely.

use chrono::NaiveDate;
use tracing::debug;

use super::error::AdjustmentError;
use super::types::{Adjustment, AdjustmentRate, ScaledRate};

/// Stateless calculator for adjustment amounts.
pub struct RateCalculator;

impl RateCalculator {
    /// Amount produced by `adjustment` on `base_cents`.
    ///
    /// The result has the same sign as the base for percentages. Fixed
    /// adjustments always yield their configured amount.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_core::adjustment::{Adjustment, RateCalculator};
    /// use rust_decimal_macros::dec;
    ///
    /// let vat = Adjustment::percentage_tax("VAT", dec!(12.345)).unwrap();
    /// // 1000 * 12.345% = 123.45 -> 123
    /// assert_eq!(RateCalculator::apply(&vat, 1_000).unwrap(), 123);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the result does not fit in `i64`.
    pub fn apply(adjustment: &Adjustment, base_cents: i64) -> Result<i64, AdjustmentError> {
        Self::apply_rate(adjustment.rate, base_cents)
    }

    /// Same as [`RateCalculator::apply`] for a bare rate.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the result does not fit in `i64`.
    pub fn apply_rate(rate: AdjustmentRate, base_cents: i64) -> Result<i64, AdjustmentError> {
        match rate {
            AdjustmentRate::Fixed(amount) => Ok(amount.cents()),
            AdjustmentRate::Percentage(rate) => Self::percent_of(base_cents, rate),
        }
    }

    /// `base * rate`, rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the result does not fit in `i64`.
    pub fn percent_of(base_cents: i64, rate: ScaledRate) -> Result<i64, AdjustmentError> {
        let numerator = i128::from(base_cents) * i128::from(rate.raw());
        let rounded = div_round_half_away(numerator, i128::from(ScaledRate::HUNDRED_PERCENT));
        i64::try_from(rounded).map_err(|_| AdjustmentError::Overflow)
    }

    /// Sum of every adjustment active on `as_of`, each applied to `base_cents`.
    ///
    /// Adjustments whose validity window excludes `as_of` contribute zero.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if any amount or the running sum overflows.
    pub fn apply_all<'a>(
        adjustments: impl IntoIterator<Item = &'a Adjustment>,
        base_cents: i64,
        as_of: NaiveDate,
    ) -> Result<i64, AdjustmentError> {
        let mut total: i64 = 0;
        for adjustment in adjustments {
            if !adjustment.is_active_on(as_of) {
                debug!(
                    adjustment_id = %adjustment.id,
                    name = %adjustment.name,
                    %as_of,
                    "Skipping adjustment outside its validity window"
                );
                continue;
            }
            let amount = Self::apply(adjustment, base_cents)?;
            total = total.checked_add(amount).ok_or(AdjustmentError::Overflow)?;
        }
        Ok(total)
    }
}

/// Integer division rounding the midpoint away from zero. `denominator` must be positive.
pub(crate) fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    }
}
