//! Property-based tests for adjustment rates.

use chrono::NaiveDate;
use proptest::prelude::*;

use super::rate::RateCalculator;
use super::types::{Adjustment, AdjustmentCategory, AdjustmentRate, ScaledRate};

/// Strategy to generate any valid scaled rate (0% to 100%).
fn scaled_rate() -> impl Strategy<Value = ScaledRate> {
    (0i64..=ScaledRate::HUNDRED_PERCENT).prop_map(|raw| ScaledRate::from_scaled(raw).unwrap())
}

/// Strategy to generate amounts (-10,000,000.00 to 10,000,000.00 in cents).
fn amount() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..1_000_000_000i64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A percentage never exceeds the base in magnitude and keeps its sign.
    #[test]
    fn prop_percentage_bounded_by_base(base in amount(), rate in scaled_rate()) {
        let result = RateCalculator::percent_of(base, rate).unwrap();
        prop_assert!(result.abs() <= base.abs());
        prop_assert!(result == 0 || result.signum() == base.signum());
    }

    /// Negating the base negates the result (rounding is symmetric).
    #[test]
    fn prop_percentage_is_odd(base in amount(), rate in scaled_rate()) {
        let positive = RateCalculator::percent_of(base, rate).unwrap();
        let negative = RateCalculator::percent_of(-base, rate).unwrap();
        prop_assert_eq!(positive, -negative);
    }

    /// Splitting the base changes the result by at most one unit of rounding.
    #[test]
    fn prop_percentage_nearly_additive(
        a in 0i64..500_000_000,
        b in 0i64..500_000_000,
        rate in scaled_rate(),
    ) {
        let whole = RateCalculator::percent_of(a + b, rate).unwrap();
        let parts = RateCalculator::percent_of(a, rate).unwrap()
            + RateCalculator::percent_of(b, rate).unwrap();
        prop_assert!((whole - parts).abs() <= 1);
    }

    /// A larger base never yields a smaller percentage.
    #[test]
    fn prop_percentage_monotone(
        a in 0i64..1_000_000_000,
        delta in 0i64..1_000_000,
        rate in scaled_rate(),
    ) {
        let lower = RateCalculator::percent_of(a, rate).unwrap();
        let higher = RateCalculator::percent_of(a + delta, rate).unwrap();
        prop_assert!(higher >= lower);
    }

    /// Fixed adjustments do not depend on the base.
    #[test]
    fn prop_fixed_independent_of_base(
        fixed in 0i64..1_000_000,
        base in amount(),
    ) {
        let rate = AdjustmentRate::fixed(fixed).unwrap();
        prop_assert_eq!(RateCalculator::apply_rate(rate, base).unwrap(), fixed);
    }

    /// Decimal percent and raw scaled value describe the same rate.
    #[test]
    fn prop_percent_round_trip(rate in scaled_rate()) {
        let back = ScaledRate::from_percent(rate.as_percent()).unwrap();
        prop_assert_eq!(back, rate);
    }

    /// An adjustment outside its window contributes nothing.
    #[test]
    fn prop_inactive_contributes_zero(
        base in amount(),
        rate in scaled_rate(),
        days_after in 1i64..3650,
    ) {
        let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let adjustment = Adjustment::new("Expired", AdjustmentCategory::Tax, AdjustmentRate::Percentage(rate))
            .with_window(None, Some(end))
            .unwrap();
        let as_of = end + chrono::Duration::days(days_after);
        prop_assert_eq!(RateCalculator::apply_all([&adjustment], base, as_of).unwrap(), 0);
    }
}
