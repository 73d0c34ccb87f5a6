//! Money type with integer minor units and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are whole numbers of the currency's minor unit (cents for USD,
//! yen for JPY). Scaling to major units only happens inside explicit,
//! documented rounding steps (see `folio_core::currency`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by money arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Arithmetic between two different currencies without a conversion step.
    #[error("Currency mismatch: cannot combine {left} with {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: CurrencyCode,
        /// Currency of the right operand.
        right: CurrencyCode,
    },

    /// The result does not fit in a signed 64-bit count of minor units.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// The text is not a three-letter currency code.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),
}

impl MoneyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::Overflow => "OVERFLOW",
            Self::InvalidCurrencyCode(_) => "INVALID_CURRENCY_CODE",
        }
    }
}

/// A three-letter ISO 4217 style currency code, stored upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Parses a currency code, accepting any ASCII letter case.
    pub fn new(code: &str) -> Result<Self, MoneyError> {
        let bytes = code.trim().as_bytes();
        match bytes {
            [a, b, c] if bytes.iter().all(u8::is_ascii_alphabetic) => Ok(Self([
                a.to_ascii_uppercase(),
                b.to_ascii_uppercase(),
                c.to_ascii_uppercase(),
            ])),
            _ => Err(MoneyError::InvalidCurrencyCode(code.to_string())),
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

/// Represents a monetary amount with currency.
///
/// The amount is a signed count of minor units. Two `Money` values only
/// combine when their currencies match; everything else goes through an
/// explicit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// The amount in the smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// Currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount_cents: i64, currency: CurrencyCode) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self::new(0, currency)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Adds two amounts of the same currency.
    pub fn checked_add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Self::new(cents, self.currency))
            .ok_or(MoneyError::Overflow)
    }

    /// Subtracts an amount of the same currency.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(|cents| Self::new(cents, self.currency))
            .ok_or(MoneyError::Overflow)
    }

    /// Multiplies by a whole quantity.
    pub fn checked_mul(&self, quantity: i64) -> Result<Self, MoneyError> {
        self.amount_cents
            .checked_mul(quantity)
            .map(|cents| Self::new(cents, self.currency))
            .ok_or(MoneyError::Overflow)
    }

    /// Negates the amount.
    pub fn checked_neg(&self) -> Result<Self, MoneyError> {
        self.amount_cents
            .checked_neg()
            .map(|cents| Self::new(cents, self.currency))
            .ok_or(MoneyError::Overflow)
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            })
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Raw minor units; display formatting belongs to the host.
        write!(f, "{} {}", self.amount_cents, self.currency)
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
