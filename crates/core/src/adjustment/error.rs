//! Adjustment construction and lookup errors.

use chrono::NaiveDate;
use folio_shared::types::AdjustmentId;
use thiserror::Error;

use super::types::AdjustmentCategory;

/// Errors that can occur while building or applying adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjustmentError {
    /// Percentage outside `[0, 100]`, too many decimals, or a negative fixed amount.
    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    /// The validity window ends before it starts.
    #[error("Invalid validity window: {start} is after {end}")]
    InvalidWindow {
        /// First day the adjustment applies.
        start: NaiveDate,
        /// Last day the adjustment applies.
        end: NaiveDate,
    },

    /// No adjustment with this id is known.
    #[error("Unknown adjustment: {0}")]
    UnknownAdjustment(AdjustmentId),

    /// A tax slot references a discount or vice versa.
    #[error("Adjustment {id} is a {actual}, expected a {expected}")]
    CategoryMismatch {
        /// The adjustment id.
        id: AdjustmentId,
        /// The category the slot requires.
        expected: AdjustmentCategory,
        /// The adjustment's real category.
        actual: AdjustmentCategory,
    },

    /// Integer overflow while applying a rate.
    #[error("Arithmetic overflow while applying adjustment")]
    Overflow,
}

impl AdjustmentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::InvalidWindow { .. } => "INVALID_WINDOW",
            Self::UnknownAdjustment(_) => "UNKNOWN_ADJUSTMENT",
            Self::CategoryMismatch { .. } => "ADJUSTMENT_CATEGORY_MISMATCH",
            Self::Overflow => "OVERFLOW",
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Rate errors never succeed on retry without caller intervention.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}
