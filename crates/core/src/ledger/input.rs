//! Normalization of raw amount text into minor units.
//!
//! Amount fields are edited keystroke by keystroke, so the text passes
//! through states like `"12."` or `"-"`. Those partial inputs are read as
//! zero instead of being rejected.

use rust_decimal::prelude::*;

use super::error::LedgerError;
use crate::currency::CurrencyInfo;

/// Parses user-typed amounts with a currency's separators and precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountInput {
    decimal_mark: char,
    thousands_separator: char,
    precision: u8,
}

impl AmountInput {
    /// Creates a parser with explicit separators.
    #[must_use]
    pub const fn new(decimal_mark: char, thousands_separator: char, precision: u8) -> Self {
        Self {
            decimal_mark,
            thousands_separator,
            precision,
        }
    }

    /// Creates a parser using a currency's separators and precision.
    #[must_use]
    pub const fn for_currency(info: &CurrencyInfo) -> Self {
        Self::new(info.decimal_mark, info.thousands_separator, info.precision)
    }

    /// Returns true if `raw` is an unfinished edit that counts as zero.
    #[must_use]
    pub fn is_partial(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.is_empty()
            || trimmed == "-"
            || trimmed == "+"
            || trimmed.ends_with(self.decimal_mark)
    }

    /// Converts `raw` into minor units.
    ///
    /// Thousands separators are ignored. Digits beyond the currency's
    /// precision are rounded half away from zero.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_core::ledger::AmountInput;
    ///
    /// let eur = AmountInput::new(',', '.', 2);
    /// assert_eq!(eur.to_cents("1.234,56").unwrap(), 123_456);
    /// assert_eq!(eur.to_cents("12,").unwrap(), 0);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the text is not a number and `Overflow` if
    /// it (or the precision's `10^precision`) does not fit in `i64` minor
    /// units.
    pub fn to_cents(&self, raw: &str) -> Result<i64, LedgerError> {
        if self.is_partial(raw) {
            return Ok(0);
        }

        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| *c != self.thousands_separator && !c.is_whitespace())
            .map(|c| if c == self.decimal_mark { '.' } else { c })
            .collect();

        let unsigned = normalized.strip_prefix(['-', '+']).unwrap_or(&normalized);
        if unsigned.is_empty()
            || !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
            || unsigned.matches('.').count() > 1
        {
            return Err(LedgerError::InvalidAmount(raw.to_string()));
        }

        let negative = normalized.starts_with('-');
        let digits = if unsigned.starts_with('.') {
            format!("0{unsigned}")
        } else {
            unsigned.to_string()
        };
        let magnitude =
            Decimal::from_str(&digits).map_err(|_| LedgerError::InvalidAmount(raw.to_string()))?;
        let value = if negative { -magnitude } else { magnitude };
        let subunit = 10_i64
            .checked_pow(u32::from(self.precision))
            .map(Decimal::from)
            .ok_or(LedgerError::Overflow)?;

        value
            .round_dp_with_strategy(u32::from(self.precision), RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(subunit)
            .and_then(|minor| minor.to_i64())
            .ok_or(LedgerError::Overflow)
    }
}

impl Default for AmountInput {
    fn default() -> Self {
        Self::new('.', ',', 2)
    }
}
