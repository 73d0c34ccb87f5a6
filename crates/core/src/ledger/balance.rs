//! Account balance calculations.
//!
//! - Asset/Expense: balance = debit - credit (debit-normal)
//! - Liability/Equity/Revenue: balance = credit - debit (credit-normal)

use folio_shared::types::{AccountId, CurrencyCode};
use serde::{Deserialize, Serialize};

use super::account::Account;
use super::entry::{EntryType, LedgerEntry};
use super::error::LedgerError;
use super::transaction::{Transaction, TransactionStatus};

/// Running balance of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// Side that increases the balance.
    pub normal_side: EntryType,
    /// Currency of the accumulated amounts.
    pub currency: CurrencyCode,
    /// Total debit amount.
    pub debit_total: i64,
    /// Total credit amount.
    pub credit_total: i64,
    /// Net balance on the normal side.
    pub balance: i64,
}

impl AccountBalance {
    /// Creates a zero balance for `account`.
    #[must_use]
    pub fn new(account: &Account, currency: CurrencyCode) -> Self {
        Self {
            account_id: account.id,
            normal_side: account.normal_side(),
            currency,
            debit_total: 0,
            credit_total: 0,
            balance: 0,
        }
    }

    /// Accumulates one entry. Entries for other accounts are ignored and
    /// reported as `false`.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if a total overflows. The balance is unchanged then.
    pub fn apply(&mut self, entry: &LedgerEntry) -> Result<bool, LedgerError> {
        if entry.account_id != self.account_id {
            return Ok(false);
        }

        let debit_total = self
            .debit_total
            .checked_add(entry.debit_cents)
            .ok_or(LedgerError::Overflow)?;
        let credit_total = self
            .credit_total
            .checked_add(entry.credit_cents)
            .ok_or(LedgerError::Overflow)?;
        let balance = match self.normal_side {
            EntryType::Debit => debit_total.checked_sub(credit_total),
            EntryType::Credit => credit_total.checked_sub(debit_total),
        }
        .ok_or(LedgerError::Overflow)?;

        self.debit_total = debit_total;
        self.credit_total = credit_total;
        self.balance = balance;
        Ok(true)
    }

    /// Accumulates every entry of a committed transaction. Drafts and
    /// transactions in another currency are skipped.
    ///
    /// Returns the number of entries applied.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if a total overflows.
    pub fn apply_transaction(&mut self, transaction: &Transaction) -> Result<usize, LedgerError> {
        if transaction.status() != TransactionStatus::Committed
            || transaction.currency != self.currency
        {
            return Ok(0);
        }
        let mut applied = 0;
        for entry in transaction.entries() {
            if self.apply(entry)? {
                applied += 1;
            }
        }
        Ok(applied)
    }
}
