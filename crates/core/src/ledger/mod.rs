//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Accounts and their normal balance side
//! - Ledger entries with separate debit and credit buckets
//! - Transaction aggregates that must balance to commit
//! - Account balances accumulated from committed entries
//! - Normalization of typed amounts

pub mod account;
pub mod balance;
pub mod entry;
pub mod error;
pub mod input;
pub mod transaction;

#[cfg(test)]
mod transaction_props;

pub use account::{Account, AccountCategory, find_by_code};
pub use balance::AccountBalance;
pub use entry::{EntryType, LedgerEntry};
pub use error::LedgerError;
pub use input::AmountInput;
pub use transaction::{Transaction, TransactionStatus};
