//! Document computation errors.

use folio_shared::types::MoneyError;
use thiserror::Error;

use crate::adjustment::AdjustmentError;
use crate::currency::CurrencyError;
use crate::ledger::LedgerError;

/// Errors that can occur while computing or posting a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A line or totals value is in a different currency than the document.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Currency table lookup or conversion failed.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// An adjustment could not be resolved or applied.
    #[error(transparent)]
    Adjustment(#[from] AdjustmentError),

    /// Building the journal transaction failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Integer overflow while summing line amounts.
    #[error("Arithmetic overflow while computing document totals")]
    Overflow,
}

impl DocumentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Money(err) => err.error_code(),
            Self::Currency(err) => err.error_code(),
            Self::Adjustment(err) => err.error_code(),
            Self::Ledger(err) => err.error_code(),
            Self::Overflow => "OVERFLOW",
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}
