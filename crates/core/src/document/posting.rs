//! Journal posting of computed document totals.
//!
//! Invoice:
//! - Dr receivable (grand total), Dr sales discount (discount)
//! - Cr revenue (subtotal), Cr tax payable (tax)
//!
//! Bill:
//! - Cr payable (grand total), Cr purchase discount (discount)
//! - Dr expense (subtotal + non-recoverable tax), Dr tax receivable (recoverable tax)
//!
//! Zero amounts produce no entry. A negative amount is posted as its
//! absolute value on the opposite side, so the result always balances.

use folio_shared::config::PostingConfig;
use folio_shared::types::{AccountId, MoneyError};
use serde::{Deserialize, Serialize};

use super::error::DocumentError;
use super::types::{Document, DocumentKind, Totals};
use crate::context::CalcContext;
use crate::ledger::{Account, EntryType, LedgerEntry, LedgerError, Transaction, find_by_code};

/// Accounts a document posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingAccounts {
    /// Customer balances (asset).
    pub receivable: AccountId,
    /// Vendor balances (liability).
    pub payable: AccountId,
    /// Sales (revenue).
    pub revenue: AccountId,
    /// Purchases (expense).
    pub expense: AccountId,
    /// Tax collected on sales (liability).
    pub tax_payable: AccountId,
    /// Reclaimable tax paid on purchases (asset).
    pub tax_receivable: AccountId,
    /// Discounts granted (contra revenue).
    pub sales_discount: AccountId,
    /// Discounts received (contra expense).
    pub purchase_discount: AccountId,
}

impl PostingAccounts {
    /// Resolves configured account codes against a chart of accounts.
    ///
    /// # Errors
    ///
    /// Returns `MissingAccount` for the first code not in `accounts`.
    pub fn from_config(config: &PostingConfig, accounts: &[Account]) -> Result<Self, LedgerError> {
        let id = |code: &str| find_by_code(accounts, code).map(|a| a.id);
        Ok(Self {
            receivable: id(&config.receivable)?,
            payable: id(&config.payable)?,
            revenue: id(&config.revenue)?,
            expense: id(&config.expense)?,
            tax_payable: id(&config.tax_payable)?,
            tax_receivable: id(&config.tax_receivable)?,
            sales_discount: id(&config.sales_discount)?,
            purchase_discount: id(&config.purchase_discount)?,
        })
    }
}

/// Builds journal transactions from documents.
pub struct DocumentPosting;

impl DocumentPosting {
    /// Builds a draft transaction for `document` from its computed `totals`.
    ///
    /// The transaction is not committed; the caller commits it with the
    /// same context once it is ready.
    ///
    /// # Errors
    ///
    /// - `Money(CurrencyMismatch)` if the totals are not in the document currency
    /// - `Overflow` if bill expense plus tax overflows
    pub fn post(
        document: &Document,
        totals: &Totals,
        accounts: &PostingAccounts,
        ctx: &CalcContext,
    ) -> Result<Transaction, DocumentError> {
        if totals.currency() != document.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: document.currency,
                right: totals.currency(),
            }
            .into());
        }

        let grand = totals.grand_total.amount_cents;
        let subtotal = totals.subtotal.amount_cents;
        let tax = totals.tax_total.amount_cents;
        let discount = totals.discount_total.amount_cents;
        let recoverable = totals.recoverable_tax.amount_cents;

        let memo = match document.kind {
            DocumentKind::Invoice => format!("Invoice {}", document.id),
            DocumentKind::Bill => format!("Bill {}", document.id),
        };
        let mut tx = Transaction::new(ctx.company_id, document.currency).with_memo(memo);

        match document.kind {
            DocumentKind::Invoice => {
                push(&mut tx, accounts.receivable, EntryType::Debit, grand, "Receivable")?;
                push(&mut tx, accounts.sales_discount, EntryType::Debit, discount, "Sales discount")?;
                push(&mut tx, accounts.revenue, EntryType::Credit, subtotal, "Revenue")?;
                push(&mut tx, accounts.tax_payable, EntryType::Credit, tax, "Tax payable")?;
            }
            DocumentKind::Bill => {
                let expensed_tax = tax.checked_sub(recoverable).ok_or(DocumentError::Overflow)?;
                let expense = subtotal
                    .checked_add(expensed_tax)
                    .ok_or(DocumentError::Overflow)?;
                push(&mut tx, accounts.payable, EntryType::Credit, grand, "Payable")?;
                push(&mut tx, accounts.purchase_discount, EntryType::Credit, discount, "Purchase discount")?;
                push(&mut tx, accounts.expense, EntryType::Debit, expense, "Expense")?;
                push(&mut tx, accounts.tax_receivable, EntryType::Debit, recoverable, "Tax receivable")?;
            }
        }

        Ok(tx)
    }
}

fn push(
    tx: &mut Transaction,
    account_id: AccountId,
    side: EntryType,
    cents: i64,
    memo: &str,
) -> Result<(), DocumentError> {
    if cents == 0 {
        return Ok(());
    }
    let (side, cents) = if cents < 0 {
        (side.opposite(), cents.checked_neg().ok_or(DocumentError::Overflow)?)
    } else {
        (side, cents)
    };
    tx.add_entry(LedgerEntry::with_side(account_id, side, cents)?.with_memo(memo))?;
    Ok(())
}
