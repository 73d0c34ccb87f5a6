//! Property-based tests for currency operations.
//!
//! - Conversion idempotence and determinism
//! - Bounded round-trip error
//! - Allocation sum invariant

use folio_shared::types::{CurrencyCode, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use super::allocation::AllocationUtil;
use super::conversion::CurrencyConverter;
use super::table::{CurrencyInfo, CurrencyTable};

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

fn table() -> CurrencyTable {
    CurrencyTable::new(
        code("USD"),
        [
            CurrencyInfo::new(code("USD"), dec!(1), 2, "$"),
            CurrencyInfo::new(code("EUR"), dec!(0.9215), 2, "€"),
            CurrencyInfo::new(code("JPY"), dec!(151.37), 0, "¥"),
            CurrencyInfo::new(code("KWD"), dec!(0.3071), 3, "KD"),
            CurrencyInfo::new(code("IDR"), dec!(15000.5), 2, "Rp"),
        ],
    )
    .unwrap()
}

/// Strategy to generate currency codes present in the table.
fn currency() -> impl Strategy<Value = CurrencyCode> {
    prop_oneof![
        Just(code("USD")),
        Just(code("EUR")),
        Just(code("JPY")),
        Just(code("KWD")),
        Just(code("IDR")),
    ]
}

/// Strategy to generate amounts (-10,000,000.00 to 10,000,000.00 in cents).
fn amount() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..1_000_000_000i64
}

/// Strategy to generate weights for allocation.
fn weights() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..1_000_000, 1..12)
}

fn pow10(precision: u8) -> Decimal {
    Decimal::from(10_i64.pow(u32::from(precision)))
}

/// Worst-case minor-unit error of converting A -> B -> A.
///
/// Half a minor unit of B expressed in minor units of A, plus half a minor
/// unit of A for the return trip, plus one unit of slack for the cross rate.
fn round_trip_bound(a: &CurrencyInfo, b: &CurrencyInfo) -> i64 {
    let first = dec!(0.5) * pow10(a.precision) / pow10(b.precision) * a.rate / b.rate;
    (first + dec!(0.5)).ceil().to_i64().unwrap() + 1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting to the same currency, any number of times, is a no-op.
    #[test]
    fn prop_same_currency_is_identity(
        cents in any::<i64>(),
        currency in currency(),
    ) {
        let money = Money::new(cents, currency);
        let once = CurrencyConverter::convert(money, currency, &table()).unwrap();
        let twice = CurrencyConverter::convert(once, currency, &table()).unwrap();
        prop_assert_eq!(once, money);
        prop_assert_eq!(twice, money);
    }

    /// Conversion is deterministic.
    #[test]
    fn prop_convert_is_deterministic(
        cents in amount(),
        from in currency(),
        to in currency(),
    ) {
        let money = Money::new(cents, from);
        let first = CurrencyConverter::convert(money, to, &table());
        let second = CurrencyConverter::convert(money, to, &table());
        prop_assert_eq!(first, second);
    }

    /// A -> B -> A differs from the original by at most two roundings.
    #[test]
    fn prop_round_trip_error_is_bounded(
        cents in amount(),
        from in currency(),
        to in currency(),
    ) {
        let table = table();
        let money = Money::new(cents, from);
        let there = CurrencyConverter::convert(money, to, &table).unwrap();
        let back = CurrencyConverter::convert(there, from, &table).unwrap();

        let bound = round_trip_bound(table.get(from).unwrap(), table.get(to).unwrap());
        let diff = (back.amount_cents - money.amount_cents).abs();
        prop_assert!(
            diff <= bound,
            "round trip {} -> {} -> {} drifted by {} (bound {})",
            money, there, back, diff, bound
        );
    }

    /// Conversion preserves sign.
    #[test]
    fn prop_conversion_preserves_sign(
        cents in amount(),
        from in currency(),
        to in currency(),
    ) {
        let result = CurrencyConverter::convert(Money::new(cents, from), to, &table()).unwrap();
        prop_assert!(result.amount_cents == 0 || result.amount_cents.signum() == cents.signum());
    }

    /// With equal precision, two-step rounding equals one integer half-up division.
    #[test]
    fn prop_base_to_same_precision_matches_integer_rounding(
        cents in 0i64..1_000_000_000,
    ) {
        // EUR rate 0.9215 = 9215 / 10000
        let result = CurrencyConverter::convert(Money::new(cents, code("USD")), code("EUR"), &table()).unwrap();
        let expected = (i128::from(cents) * 9215 + 5_000) / 10_000;
        prop_assert_eq!(i128::from(result.amount_cents), expected);
    }

    /// Weighted allocation sums exactly to the total.
    #[test]
    fn prop_allocate_by_weights_sum_invariant(
        total in amount(),
        weights in weights(),
    ) {
        let result = AllocationUtil::allocate_by_weights(total, &weights);
        prop_assert_eq!(result.len(), weights.len());
        prop_assert_eq!(result.iter().sum::<i64>(), total);
    }

    /// Every weighted part lies within one unit of its exact share.
    #[test]
    fn prop_allocate_by_weights_is_fair(
        total in 0i64..1_000_000_000,
        weights in weights(),
    ) {
        let weight_sum: i128 = weights.iter().map(|w| i128::from(*w)).sum();
        prop_assume!(weight_sum > 0);

        let result = AllocationUtil::allocate_by_weights(total, &weights);
        for (part, weight) in result.iter().zip(&weights) {
            let floor = i128::from(total) * i128::from(*weight) / weight_sum;
            let part = i128::from(*part);
            prop_assert!(part == floor || part == floor + 1);
        }
    }

    /// Equal allocation parts differ by at most one unit.
    #[test]
    fn prop_allocate_equal_parts_differ_by_at_most_one(
        total in amount(),
        count in 1usize..50,
    ) {
        let result = AllocationUtil::allocate_equal(total, count);
        let max = result.iter().max().unwrap();
        let min = result.iter().min().unwrap();
        prop_assert!(max - min <= 1);
        prop_assert_eq!(result.iter().sum::<i64>(), total);
    }
}
