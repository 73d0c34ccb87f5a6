//! Ledger error types for validation and state errors.

use folio_shared::types::{LedgerEntryId, TransactionId};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Transaction is not balanced (debits != credits).
    #[error("Transaction is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedTransaction {
        /// Sum of debit buckets in minor units.
        debit: i64,
        /// Sum of credit buckets in minor units.
        credit: i64,
    },

    /// A transaction cannot be committed without entries.
    #[error("Transaction has no entries")]
    NoEntries,

    /// Entry must carry either a debit or a credit, not both.
    #[error("Entry {0} has both a debit and a credit amount")]
    BothSidesSet(LedgerEntryId),

    /// Entry must carry a nonzero debit or credit.
    #[error("Entry {0} has neither a debit nor a credit amount")]
    EmptyEntry(LedgerEntryId),

    /// Entry amount cannot be negative.
    #[error("Entry amount cannot be negative")]
    NegativeAmount,

    /// Raw amount text could not be read as a number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // ========== Account Errors ==========
    /// No account with this code exists in the chart of accounts.
    #[error("Account not found: {0}")]
    MissingAccount(String),

    /// Unrecognized account category.
    #[error("Invalid account category: {0}")]
    InvalidAccountCategory(String),

    // ========== Transaction State Errors ==========
    /// Committed transactions are immutable.
    #[error("Transaction {0} is already committed")]
    AlreadyCommitted(TransactionId),

    /// Entry is not part of the transaction.
    #[error("Entry not found: {0}")]
    EntryNotFound(LedgerEntryId),

    /// Integer overflow in bucket arithmetic.
    #[error("Arithmetic overflow in ledger amounts")]
    Overflow,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnbalancedTransaction { .. } => "UNBALANCED_TRANSACTION",
            Self::NoEntries => "NO_ENTRIES",
            Self::BothSidesSet(_) => "BOTH_SIDES_SET",
            Self::EmptyEntry(_) => "EMPTY_ENTRY",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::MissingAccount(_) => "ACCOUNT_NOT_FOUND",
            Self::InvalidAccountCategory(_) => "INVALID_ACCOUNT_CATEGORY",
            Self::AlreadyCommitted(_) => "ALREADY_COMMITTED",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::Overflow => "OVERFLOW",
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Every ledger error reflects the input, so none are.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}
