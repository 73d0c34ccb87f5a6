//! Ledger entry domain types.
//!
//! An entry holds two buckets, `debit_cents` and `credit_cents`. A
//! well-formed entry uses exactly one of them, but edits may pass through
//! states that use both; [`Transaction::commit`](super::Transaction::commit)
//! is where that is rejected.

use folio_shared::types::{AccountId, LedgerEntryId};
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Type of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

impl EntryType {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// A single ledger entry in a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// The account affected by this entry.
    pub account_id: AccountId,
    /// Debit bucket in minor units.
    pub debit_cents: i64,
    /// Credit bucket in minor units.
    pub credit_cents: i64,
    /// Optional description for this line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl LedgerEntry {
    /// Creates a debit entry.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `cents` is negative.
    pub fn debit(account_id: AccountId, cents: i64) -> Result<Self, LedgerError> {
        Self::with_side(account_id, EntryType::Debit, cents)
    }

    /// Creates a credit entry.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `cents` is negative.
    pub fn credit(account_id: AccountId, cents: i64) -> Result<Self, LedgerError> {
        Self::with_side(account_id, EntryType::Credit, cents)
    }

    /// Creates an entry with `cents` on `side`.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `cents` is negative.
    pub fn with_side(account_id: AccountId, side: EntryType, cents: i64) -> Result<Self, LedgerError> {
        let mut entry = Self {
            id: LedgerEntryId::new(),
            account_id,
            debit_cents: 0,
            credit_cents: 0,
            memo: None,
        };
        match side {
            EntryType::Debit => entry.set_debit(cents)?,
            EntryType::Credit => entry.set_credit(cents)?,
        }
        Ok(entry)
    }

    /// Attaches a memo.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Sets the debit bucket, leaving the credit bucket untouched.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `cents` is negative.
    pub fn set_debit(&mut self, cents: i64) -> Result<(), LedgerError> {
        if cents < 0 {
            return Err(LedgerError::NegativeAmount);
        }
        self.debit_cents = cents;
        Ok(())
    }

    /// Sets the credit bucket, leaving the debit bucket untouched.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `cents` is negative.
    pub fn set_credit(&mut self, cents: i64) -> Result<(), LedgerError> {
        if cents < 0 {
            return Err(LedgerError::NegativeAmount);
        }
        self.credit_cents = cents;
        Ok(())
    }

    /// Value of the bucket for `side`.
    #[must_use]
    pub const fn amount(&self, side: EntryType) -> i64 {
        match side {
            EntryType::Debit => self.debit_cents,
            EntryType::Credit => self.credit_cents,
        }
    }

    /// The side this entry is on, or `None` if both or neither bucket is used.
    #[must_use]
    pub const fn entry_type(&self) -> Option<EntryType> {
        match (self.debit_cents != 0, self.credit_cents != 0) {
            (true, false) => Some(EntryType::Debit),
            (false, true) => Some(EntryType::Credit),
            _ => None,
        }
    }

    /// Returns true if both buckets are nonzero.
    #[must_use]
    pub const fn has_both_sides(&self) -> bool {
        self.debit_cents != 0 && self.credit_cents != 0
    }

    /// Moves `amount` from the `from` bucket to the `to` bucket.
    ///
    /// Used when a line is reclassified from debit to credit or back. The
    /// total across both buckets is unchanged. A zero amount or `from == to`
    /// leaves the entry as is.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if a bucket overflows.
    pub fn change_entry_type(
        &mut self,
        from: EntryType,
        to: EntryType,
        amount: i64,
    ) -> Result<(), LedgerError> {
        if amount == 0 || from == to {
            return Ok(());
        }
        let (source, target) = match from {
            EntryType::Debit => (self.debit_cents, self.credit_cents),
            EntryType::Credit => (self.credit_cents, self.debit_cents),
        };
        let source = source.checked_sub(amount).ok_or(LedgerError::Overflow)?;
        let target = target.checked_add(amount).ok_or(LedgerError::Overflow)?;
        match from {
            EntryType::Debit => {
                self.debit_cents = source;
                self.credit_cents = target;
            }
            EntryType::Credit => {
                self.credit_cents = source;
                self.debit_cents = target;
            }
        }
        Ok(())
    }

    /// Adds `new - old` to the bucket for `side`.
    ///
    /// Called when the amount typed into a line changes from `old` to `new`,
    /// so the bucket tracks the edit without being recomputed from scratch.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the delta or the bucket overflows.
    pub fn adjust_for_amount_change(
        &mut self,
        side: EntryType,
        new: i64,
        old: i64,
    ) -> Result<(), LedgerError> {
        let delta = new.checked_sub(old).ok_or(LedgerError::Overflow)?;
        let bucket = match side {
            EntryType::Debit => &mut self.debit_cents,
            EntryType::Credit => &mut self.credit_cents,
        };
        *bucket = bucket.checked_add(delta).ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}
