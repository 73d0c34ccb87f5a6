//! Transaction aggregate.
//!
//! Debits must equal credits when a transaction is committed. While it is a
//! draft the entries may be out of balance.

use chrono::NaiveDate;
use folio_shared::types::{CompanyId, CurrencyCode, LedgerEntryId, TransactionId, UserId};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::entry::{EntryType, LedgerEntry};
use super::error::LedgerError;
use super::input::AmountInput;
use crate::context::CalcContext;

/// Transaction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Transaction is being drafted and can be modified.
    Draft,
    /// Transaction has been committed to the ledger (immutable).
    Committed,
}

/// A financial transaction consisting of ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Company this transaction belongs to.
    pub company_id: CompanyId,
    /// Currency of every entry.
    pub currency: CurrencyCode,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    status: TransactionStatus,
    entries: Vec<LedgerEntry>,
    committed_by: Option<UserId>,
    committed_on: Option<NaiveDate>,
}

impl Transaction {
    /// Creates an empty draft.
    #[must_use]
    pub fn new(company_id: CompanyId, currency: CurrencyCode) -> Self {
        Self {
            id: TransactionId::new(),
            company_id,
            currency,
            memo: None,
            status: TransactionStatus::Draft,
            entries: Vec::new(),
            committed_by: None,
            committed_on: None,
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Returns true if the transaction can be edited.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status == TransactionStatus::Draft
    }

    /// User who committed the transaction.
    #[must_use]
    pub const fn committed_by(&self) -> Option<UserId> {
        self.committed_by
    }

    /// Business date of the commit.
    #[must_use]
    pub const fn committed_on(&self) -> Option<NaiveDate> {
        self.committed_on
    }

    /// The entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Looks up an entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the entry is not part of this transaction.
    pub fn entry(&self, id: LedgerEntryId) -> Result<&LedgerEntry, LedgerError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(LedgerError::EntryNotFound(id))
    }

    /// Appends an entry and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCommitted` once the transaction is committed.
    pub fn add_entry(&mut self, entry: LedgerEntry) -> Result<LedgerEntryId, LedgerError> {
        self.ensure_editable()?;
        let id = entry.id;
        self.entries.push(entry);
        Ok(id)
    }

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCommitted` or `EntryNotFound`.
    pub fn remove_entry(&mut self, id: LedgerEntryId) -> Result<LedgerEntry, LedgerError> {
        self.ensure_editable()?;
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        Ok(self.entries.remove(index))
    }

    /// Sets an entry's debit bucket.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCommitted`, `EntryNotFound` or `NegativeAmount`.
    pub fn set_debit(&mut self, id: LedgerEntryId, cents: i64) -> Result<(), LedgerError> {
        self.entry_mut(id)?.set_debit(cents)
    }

    /// Sets an entry's credit bucket.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCommitted`, `EntryNotFound` or `NegativeAmount`.
    pub fn set_credit(&mut self, id: LedgerEntryId, cents: i64) -> Result<(), LedgerError> {
        self.entry_mut(id)?.set_credit(cents)
    }

    /// Reclassifies `amount` of an entry from one side to the other.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCommitted`, `EntryNotFound` or `Overflow`.
    pub fn change_entry_type(
        &mut self,
        id: LedgerEntryId,
        from: EntryType,
        to: EntryType,
        amount: i64,
    ) -> Result<(), LedgerError> {
        self.entry_mut(id)?.change_entry_type(from, to, amount)
    }

    /// Applies an amount edit from `old` to `new` on one side of an entry.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCommitted`, `EntryNotFound` or `Overflow`.
    pub fn adjust_for_amount_change(
        &mut self,
        id: LedgerEntryId,
        side: EntryType,
        new: i64,
        old: i64,
    ) -> Result<(), LedgerError> {
        self.entry_mut(id)?.adjust_for_amount_change(side, new, old)
    }

    /// Same as [`Transaction::adjust_for_amount_change`] for raw typed text.
    ///
    /// Partial input on either side (empty, a lone sign, or a trailing
    /// decimal mark) counts as zero before the difference is taken.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCommitted`, `EntryNotFound`, `InvalidAmount` or `Overflow`.
    pub fn adjust_for_amount_input(
        &mut self,
        id: LedgerEntryId,
        side: EntryType,
        new_raw: &str,
        old_raw: &str,
        input: &AmountInput,
    ) -> Result<(), LedgerError> {
        let new = input.to_cents(new_raw)?;
        let old = input.to_cents(old_raw)?;
        self.adjust_for_amount_change(id, side, new, old)
    }

    /// Sum of debit buckets.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the sum does not fit in `i64`.
    pub fn debit_total(&self) -> Result<i64, LedgerError> {
        self.total(EntryType::Debit)
    }

    /// Sum of credit buckets.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the sum does not fit in `i64`.
    pub fn credit_total(&self) -> Result<i64, LedgerError> {
        self.total(EntryType::Credit)
    }

    /// Returns true if debits equal credits.
    ///
    /// Sums are taken in 128 bits, so this never overflows.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let wide = |side: EntryType| -> i128 {
            self.entries
                .iter()
                .map(|e| i128::from(e.amount(side)))
                .sum()
        };
        wide(EntryType::Debit) == wide(EntryType::Credit)
    }

    /// Validates and commits the transaction.
    ///
    /// On success the transaction becomes immutable and is stamped with the
    /// context's user and date. On failure it stays a draft.
    ///
    /// # Errors
    ///
    /// - `AlreadyCommitted` if committed before
    /// - `NoEntries` if there is nothing to post
    /// - `NegativeAmount`, `BothSidesSet` or `EmptyEntry` for a malformed entry
    /// - `UnbalancedTransaction` if debits differ from credits
    pub fn commit(&mut self, ctx: &CalcContext) -> Result<(), LedgerError> {
        if let Err(err) = self.validate_for_commit() {
            warn!(
                transaction_id = %self.id,
                company_id = %self.company_id,
                user_id = %ctx.user_id,
                error_code = err.error_code(),
                error = %err,
                "Transaction commit rejected"
            );
            return Err(err);
        }

        self.status = TransactionStatus::Committed;
        self.committed_by = Some(ctx.user_id);
        self.committed_on = Some(ctx.as_of);
        Ok(())
    }

    fn validate_for_commit(&self) -> Result<(), LedgerError> {
        self.ensure_editable()?;
        if self.entries.is_empty() {
            return Err(LedgerError::NoEntries);
        }
        for entry in &self.entries {
            if entry.debit_cents < 0 || entry.credit_cents < 0 {
                return Err(LedgerError::NegativeAmount);
            }
            if entry.has_both_sides() {
                return Err(LedgerError::BothSidesSet(entry.id));
            }
            if entry.entry_type().is_none() {
                return Err(LedgerError::EmptyEntry(entry.id));
            }
        }
        let debit = self.debit_total()?;
        let credit = self.credit_total()?;
        if debit != credit {
            return Err(LedgerError::UnbalancedTransaction { debit, credit });
        }
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), LedgerError> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(LedgerError::AlreadyCommitted(self.id))
        }
    }

    fn entry_mut(&mut self, id: LedgerEntryId) -> Result<&mut LedgerEntry, LedgerError> {
        self.ensure_editable()?;
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LedgerError::EntryNotFound(id))
    }

    fn total(&self, side: EntryType) -> Result<i64, LedgerError> {
        self.entries.iter().try_fold(0_i64, |acc, e| {
            acc.checked_add(e.amount(side)).ok_or(LedgerError::Overflow)
        })
    }
}
