//! Property-based tests for the ledger balance engine.
//!
//! - Entry-type changes preserve magnitude
//! - Amount edits track the typed delta
//! - Commit succeeds exactly when no entry is empty and debits equal credits

use chrono::NaiveDate;
use folio_shared::types::{AccountId, CompanyId, CurrencyCode, UserId};
use proptest::prelude::*;

use super::entry::{EntryType, LedgerEntry};
use super::error::LedgerError;
use super::transaction::{Transaction, TransactionStatus};
use crate::context::CalcContext;

/// Strategy to generate entry amounts (0.01 to 1,000,000.00).
fn amount() -> impl Strategy<Value = i64> {
    1i64..100_000_000i64
}

/// Strategy to generate entry amounts that are sometimes zero.
fn amount_or_zero() -> impl Strategy<Value = i64> {
    prop_oneof![1 => Just(0i64), 4 => amount()]
}

fn entry_type() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

fn ctx() -> CalcContext {
    CalcContext::new(
        CompanyId::new(),
        UserId::new(),
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
    )
}

fn transaction(debits: &[i64], credits: &[i64]) -> Transaction {
    let mut tx = Transaction::new(CompanyId::new(), CurrencyCode::new("USD").unwrap());
    for cents in debits {
        tx.add_entry(LedgerEntry::debit(AccountId::new(), *cents).unwrap())
            .unwrap();
    }
    for cents in credits {
        tx.add_entry(LedgerEntry::credit(AccountId::new(), *cents).unwrap())
            .unwrap();
    }
    tx
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Moving an amount between buckets keeps their sum and shifts the net by twice the amount.
    #[test]
    fn prop_change_entry_type_preserves_magnitude(
        initial in amount(),
        moved in amount(),
        from in entry_type(),
    ) {
        let mut entry = LedgerEntry::with_side(AccountId::new(), from, initial).unwrap();
        let before = entry.clone();
        entry.change_entry_type(from, from.opposite(), moved).unwrap();

        prop_assert_eq!(
            entry.debit_cents + entry.credit_cents,
            before.debit_cents + before.credit_cents
        );
        prop_assert_eq!(entry.amount(from), initial - moved);
        prop_assert_eq!(entry.amount(from.opposite()), moved);
    }

    /// Flipping there and back restores the entry.
    #[test]
    fn prop_change_entry_type_round_trip(
        initial in amount(),
        from in entry_type(),
    ) {
        let mut entry = LedgerEntry::with_side(AccountId::new(), from, initial).unwrap();
        let before = entry.clone();
        entry.change_entry_type(from, from.opposite(), initial).unwrap();
        prop_assert_eq!(entry.entry_type(), Some(from.opposite()));
        entry.change_entry_type(from.opposite(), from, initial).unwrap();
        prop_assert_eq!(entry, before);
    }

    /// A chain of amount edits leaves the bucket at the last typed amount.
    #[test]
    fn prop_amount_edits_track_last_value(
        side in entry_type(),
        typed in prop::collection::vec(amount(), 1..10),
    ) {
        let mut entry = LedgerEntry::with_side(AccountId::new(), side, typed[0]).unwrap();
        for pair in typed.windows(2) {
            entry.adjust_for_amount_change(side, pair[1], pair[0]).unwrap();
        }
        prop_assert_eq!(entry.amount(side), *typed.last().unwrap());
        prop_assert_eq!(entry.amount(side.opposite()), 0);
    }

    /// Commit succeeds iff every entry is nonzero and the sums match, and a
    /// rejected commit leaves a draft.
    #[test]
    fn prop_commit_iff_balanced(
        debits in prop::collection::vec(amount_or_zero(), 1..6),
        credits in prop::collection::vec(amount_or_zero(), 1..6),
    ) {
        let mut tx = transaction(&debits, &credits);
        let debit: i64 = debits.iter().sum();
        let credit: i64 = credits.iter().sum();
        let first_empty = tx
            .entries()
            .iter()
            .find(|e| e.entry_type().is_none())
            .map(|e| e.id);

        match tx.commit(&ctx()) {
            Ok(()) => {
                prop_assert_eq!(first_empty, None);
                prop_assert_eq!(debit, credit);
                prop_assert_eq!(tx.status(), TransactionStatus::Committed);
            }
            Err(err) => {
                let expected = match first_empty {
                    Some(id) => LedgerError::EmptyEntry(id),
                    None => LedgerError::UnbalancedTransaction { debit, credit },
                };
                prop_assert_eq!(err, expected);
                prop_assert_eq!(tx.status(), TransactionStatus::Draft);
            }
        }
    }

    /// Mirrored debit and credit lines always commit, and stay balanced.
    #[test]
    fn prop_mirrored_transaction_commits(
        amounts in prop::collection::vec(amount(), 1..6),
    ) {
        let mut tx = transaction(&amounts, &amounts);
        prop_assert!(tx.is_balanced());
        prop_assert!(tx.commit(&ctx()).is_ok());
        prop_assert!(tx.is_balanced());
        prop_assert_eq!(tx.debit_total().unwrap(), tx.credit_total().unwrap());
    }
}
