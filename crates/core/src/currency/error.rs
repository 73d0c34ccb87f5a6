//! Currency table and conversion errors.

use folio_shared::types::{CurrencyCode, MoneyError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while building a currency table or converting money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The currency is not present in the table.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(CurrencyCode),

    /// The configured base currency has no table entry.
    #[error("Base currency {0} is missing from the currency table")]
    MissingBase(CurrencyCode),

    /// The base currency must have a rate of exactly 1.
    #[error("Base currency {code} must have rate 1, got {rate}")]
    InvalidBaseRate {
        /// Base currency code.
        code: CurrencyCode,
        /// The offending rate.
        rate: Decimal,
    },

    /// Exchange rates must be strictly positive.
    #[error("Exchange rate for {code} must be positive, got {rate}")]
    InvalidRate {
        /// Currency code.
        code: CurrencyCode,
        /// The offending rate.
        rate: Decimal,
    },

    /// Minor-unit precision is out of the supported range.
    #[error("Precision {precision} for {code} exceeds the supported maximum")]
    InvalidPrecision {
        /// Currency code.
        code: CurrencyCode,
        /// The offending precision.
        precision: u8,
    },

    /// The same code appears twice in the table.
    #[error("Currency {0} is defined more than once")]
    DuplicateCurrency(CurrencyCode),

    /// A conversion result does not fit in 64-bit minor units.
    #[error("Arithmetic overflow during currency conversion")]
    Overflow,

    /// Money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl CurrencyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::MissingBase(_) => "MISSING_BASE_CURRENCY",
            Self::InvalidBaseRate { .. } => "INVALID_BASE_RATE",
            Self::InvalidRate { .. } => "INVALID_EXCHANGE_RATE",
            Self::InvalidPrecision { .. } => "INVALID_PRECISION",
            Self::DuplicateCurrency(_) => "DUPLICATE_CURRENCY",
            Self::Overflow => "OVERFLOW",
            Self::Money(err) => err.error_code(),
        }
    }
}
