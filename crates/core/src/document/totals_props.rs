//! Property-based tests for document totals and posting.
//!
//! - Totals decomposition is exact
//! - Per-line breakdown reconciles with document totals
//! - Posted transactions always balance

use chrono::NaiveDate;
use folio_shared::types::{AccountId, AdjustmentId, CompanyId, CurrencyCode, UserId};
use proptest::prelude::*;

use super::line_item::LineItem;
use super::posting::{DocumentPosting, PostingAccounts};
use super::totals::DocumentTotalsCalculator;
use super::types::{DiscountPolicy, Document, DocumentKind, Totals};
use crate::adjustment::{
    Adjustment, AdjustmentCatalog, AdjustmentCategory, AdjustmentRate, FixedAmount, RateCalculator,
    ScaledRate,
};
use crate::context::CalcContext;

fn usd() -> CurrencyCode {
    CurrencyCode::new("USD").unwrap()
}

fn ctx() -> CalcContext {
    CalcContext::new(
        CompanyId::new(),
        UserId::new(),
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
    )
}

fn accounts() -> PostingAccounts {
    PostingAccounts {
        receivable: AccountId::new(),
        payable: AccountId::new(),
        revenue: AccountId::new(),
        expense: AccountId::new(),
        tax_payable: AccountId::new(),
        tax_receivable: AccountId::new(),
        sales_discount: AccountId::new(),
        purchase_discount: AccountId::new(),
    }
}

/// Strategy to generate any valid adjustment rate.
fn rate() -> impl Strategy<Value = AdjustmentRate> {
    prop_oneof![
        (0i64..=ScaledRate::HUNDRED_PERCENT)
            .prop_map(|raw| AdjustmentRate::Percentage(ScaledRate::from_scaled(raw).unwrap())),
        (0i64..100_000).prop_map(|cents| AdjustmentRate::Fixed(FixedAmount::new(cents).unwrap())),
    ]
}

/// Strategy to generate a line: (quantity, unit price, tax picks, discount picks).
fn line_spec() -> impl Strategy<Value = (u32, i64, Vec<bool>, Vec<bool>)> {
    (
        0u32..100,
        -100_000i64..10_000_000,
        prop::collection::vec(any::<bool>(), 3),
        prop::collection::vec(any::<bool>(), 3),
    )
}

fn policy() -> impl Strategy<Value = DiscountPolicy> {
    prop_oneof![
        Just(DiscountPolicy::PerLineItem),
        rate().prop_map(DiscountPolicy::PerDocument),
    ]
}

struct Fixture {
    catalog: AdjustmentCatalog,
    taxes: Vec<AdjustmentId>,
    discounts: Vec<AdjustmentId>,
}

fn fixture(tax_rates: &[(AdjustmentRate, bool)], discount_rates: &[AdjustmentRate]) -> Fixture {
    let mut catalog = AdjustmentCatalog::new();
    let mut taxes = Vec::new();
    for (rate, recoverable) in tax_rates {
        let mut tax = Adjustment::new("Tax", AdjustmentCategory::Tax, *rate);
        tax.recoverable = *recoverable;
        taxes.push(tax.id);
        catalog.insert(tax).unwrap();
    }
    let mut discounts = Vec::new();
    for rate in discount_rates {
        let discount = Adjustment::new("Discount", AdjustmentCategory::Discount, *rate);
        discounts.push(discount.id);
        catalog.insert(discount).unwrap();
    }
    Fixture {
        catalog,
        taxes,
        discounts,
    }
}

fn build_lines(fixture: &Fixture, specs: &[(u32, i64, Vec<bool>, Vec<bool>)]) -> Vec<LineItem> {
    specs
        .iter()
        .map(|(quantity, price, tax_picks, discount_picks)| {
            let mut line = LineItem::new(*quantity, *price, usd());
            for (id, pick) in fixture.taxes.iter().zip(tax_picks) {
                if *pick {
                    line = line.with_tax(*id);
                }
            }
            for (id, pick) in fixture.discounts.iter().zip(discount_picks) {
                if *pick {
                    line = line.with_discount(*id);
                }
            }
            line
        })
        .collect()
}

fn assert_reconciles(totals: &Totals) -> Result<(), TestCaseError> {
    prop_assert_eq!(
        totals.grand_total.amount_cents,
        totals.subtotal.amount_cents + totals.tax_total.amount_cents
            - totals.discount_total.amount_cents
    );
    let lines = &totals.lines;
    if lines.is_empty() {
        prop_assert_eq!(totals.subtotal.amount_cents, 0);
        prop_assert_eq!(totals.tax_total.amount_cents, 0);
        return Ok(());
    }
    prop_assert_eq!(lines.iter().map(|l| l.subtotal_cents).sum::<i64>(), totals.subtotal.amount_cents);
    prop_assert_eq!(lines.iter().map(|l| l.tax_cents).sum::<i64>(), totals.tax_total.amount_cents);
    prop_assert_eq!(
        lines.iter().map(|l| l.recoverable_tax_cents).sum::<i64>(),
        totals.recoverable_tax.amount_cents
    );
    prop_assert_eq!(
        lines.iter().map(|l| l.discount_cents).sum::<i64>(),
        totals.discount_total.amount_cents
    );
    prop_assert_eq!(
        lines.iter().map(|l| l.total_cents).sum::<i64>(),
        totals.grand_total.amount_cents
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// grand = subtotal + tax - discount, and with lines present every per-line
    /// column sums to its total.
    #[test]
    fn prop_totals_decompose_and_reconcile(
        tax_rates in prop::collection::vec((rate(), any::<bool>()), 3),
        discount_rates in prop::collection::vec(rate(), 3),
        specs in prop::collection::vec(line_spec(), 0..8),
        policy in policy(),
    ) {
        let fixture = fixture(&tax_rates, &discount_rates);
        let lines = build_lines(&fixture, &specs);
        let totals = DocumentTotalsCalculator::compute(usd(), &lines, policy, &fixture.catalog, &ctx()).unwrap();

        assert_reconciles(&totals)?;
    }

    /// Percentage taxes on one line are summed against the same base, never compounded.
    #[test]
    fn prop_percentage_taxes_are_additive(
        first in 0i64..=ScaledRate::HUNDRED_PERCENT,
        second in 0i64..=ScaledRate::HUNDRED_PERCENT,
        price in 0i64..10_000_000,
    ) {
        let a = AdjustmentRate::Percentage(ScaledRate::from_scaled(first).unwrap());
        let b = AdjustmentRate::Percentage(ScaledRate::from_scaled(second).unwrap());
        let fixture = fixture(&[(a, false), (b, false)], &[]);
        let line = LineItem::new(1, price, usd())
            .with_tax(fixture.taxes[0])
            .with_tax(fixture.taxes[1]);

        let both = DocumentTotalsCalculator::compute(
            usd(), &[line], DiscountPolicy::PerLineItem, &fixture.catalog, &ctx(),
        ).unwrap();
        let only_a = RateCalculator::apply_rate(a, price).unwrap();
        let only_b = RateCalculator::apply_rate(b, price).unwrap();
        prop_assert_eq!(both.tax_total.amount_cents, only_a + only_b);
    }

    /// Invoices and bills post to balanced transactions that commit.
    #[test]
    fn prop_posted_transactions_balance(
        tax_rates in prop::collection::vec((rate(), any::<bool>()), 3),
        discount_rates in prop::collection::vec(rate(), 3),
        specs in prop::collection::vec(line_spec(), 1..6),
        policy in policy(),
        is_bill in any::<bool>(),
    ) {
        let fixture = fixture(&tax_rates, &discount_rates);
        let kind = if is_bill { DocumentKind::Bill } else { DocumentKind::Invoice };
        let mut document = Document::new(kind, usd()).with_discount(policy);
        document.lines = build_lines(&fixture, &specs);

        let ctx = ctx();
        let totals = DocumentTotalsCalculator::compute_document(&document, &fixture.catalog, &ctx).unwrap();
        let mut tx = DocumentPosting::post(&document, &totals, &accounts(), &ctx).unwrap();

        prop_assert!(tx.is_balanced());
        if !tx.entries().is_empty() {
            prop_assert!(tx.commit(&ctx).is_ok());
        }
    }
}
