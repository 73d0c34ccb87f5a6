//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Scale minor units to major units exactly (no truncation)
//! - Multiply by the cross rate and round to the target's decimal places,
//!   half-up (midpoint away from zero)
//! - Scale back to minor units and round again
//!
//! The two rounding steps are deliberate and must not be merged into one.

use folio_shared::types::{CurrencyCode, Money};
use rust_decimal::prelude::*;

use super::error::CurrencyError;
use super::table::CurrencyTable;

/// Converts money between currencies of a [`CurrencyTable`].
pub struct CurrencyConverter;

impl CurrencyConverter {
    /// Converts `money` into `target`.
    ///
    /// Same-currency conversion returns the amount untouched without
    /// consulting the table.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_core::currency::{CurrencyConverter, CurrencyInfo, CurrencyTable};
    /// use folio_shared::types::{CurrencyCode, Money};
    /// use rust_decimal_macros::dec;
    ///
    /// let usd = CurrencyCode::new("USD").unwrap();
    /// let jpy = CurrencyCode::new("JPY").unwrap();
    /// let table = CurrencyTable::new(
    ///     usd,
    ///     [
    ///         CurrencyInfo::new(usd, dec!(1), 2, "$"),
    ///         CurrencyInfo::new(jpy, dec!(151.37), 0, "¥"),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// // $10.00 -> 1513.7 JPY -> 1514 yen
    /// let yen = CurrencyConverter::convert(Money::new(1_000, usd), jpy, &table).unwrap();
    /// assert_eq!(yen, Money::new(1_514, jpy));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` for codes missing from the table and
    /// `Overflow` when the result does not fit in `i64` minor units.
    pub fn convert(
        money: Money,
        target: CurrencyCode,
        table: &CurrencyTable,
    ) -> Result<Money, CurrencyError> {
        if money.currency == target {
            return Ok(money);
        }

        let from = table.get(money.currency)?;
        let to = table.get(target)?;

        let major_from = Decimal::new(money.amount_cents, u32::from(from.precision));

        // Multiply before dividing so a base-currency source stays exact.
        let major_to = major_from
            .checked_mul(to.rate)
            .and_then(|v| v.checked_div(from.rate))
            .ok_or(CurrencyError::Overflow)?
            .round_dp_with_strategy(
                u32::from(to.precision),
                RoundingStrategy::MidpointAwayFromZero,
            );

        let minor_to = to
            .subunit()
            .and_then(|subunit| major_to.checked_mul(Decimal::from(subunit)))
            .ok_or(CurrencyError::Overflow)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        let cents = minor_to.to_i64().ok_or(CurrencyError::Overflow)?;
        Ok(Money::new(cents, target))
    }

    /// Converts into the table's base currency.
    ///
    /// # Errors
    ///
    /// See [`CurrencyConverter::convert`].
    pub fn to_base(money: Money, table: &CurrencyTable) -> Result<Money, CurrencyError> {
        Self::convert(money, table.base(), table)
    }
}
