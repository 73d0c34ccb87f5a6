//! Chart-of-accounts types.

use std::str::FromStr;

use folio_shared::config::AccountConfig;
use folio_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use super::entry::EntryType;
use super::error::LedgerError;

/// Account category. Determines the normal balance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
    /// Owners' residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountCategory {
    /// The side that increases an account of this category.
    ///
    /// - Asset/Expense: debit-normal
    /// - Liability/Equity/Revenue: credit-normal
    #[must_use]
    pub const fn normal_side(self) -> EntryType {
        match self {
            Self::Asset | Self::Expense => EntryType::Debit,
            Self::Liability | Self::Equity | Self::Revenue => EntryType::Credit,
        }
    }
}

impl FromStr for AccountCategory {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" | "income" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            _ => Err(LedgerError::InvalidAccountCategory(s.to_string())),
        }
    }
}

/// A ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Account code (e.g. "1100").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Category.
    pub category: AccountCategory,
}

impl Account {
    /// Creates an account with a fresh id.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, category: AccountCategory) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
            category,
        }
    }

    /// Builds an account from configuration, generating an id if none is set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccountCategory` for an unknown category name.
    pub fn from_config(config: &AccountConfig) -> Result<Self, LedgerError> {
        Ok(Self {
            id: config.id.map_or_else(AccountId::new, AccountId::from_uuid),
            code: config.code.clone(),
            name: config.name.clone(),
            category: config.category.parse()?,
        })
    }

    /// The side that increases this account.
    #[must_use]
    pub const fn normal_side(&self) -> EntryType {
        self.category.normal_side()
    }
}

/// Finds an account by code.
///
/// # Errors
///
/// Returns `MissingAccount` if no account has this code.
pub fn find_by_code<'a>(accounts: &'a [Account], code: &str) -> Result<&'a Account, LedgerError> {
    accounts
        .iter()
        .find(|account| account.code == code)
        .ok_or_else(|| LedgerError::MissingAccount(code.to_string()))
}
