//! Amount allocation utilities using Largest Remainder Method.
//!
//! This module provides functions for allocating an integer amount of minor
//! units while ensuring the parts sum exactly to the original total (no cents
//! lost or gained).
//!
//! The Largest Remainder Method works by:
//! 1. Calculate exact allocations as fractions
//! 2. Round each down
//! 3. Calculate the remainder (total - sum of rounded)
//! 4. Give one unit each to the items with the largest fractional parts

/// Allocation utility for distributing minor-unit amounts.
pub struct AllocationUtil;

impl AllocationUtil {
    /// Allocate `total` equally across `count` recipients.
    ///
    /// The first `|total| % count` recipients receive one extra unit. Every
    /// part carries the sign of `total`.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_core::currency::AllocationUtil;
    ///
    /// // 10000 / 3 = [3334, 3333, 3333]
    /// assert_eq!(AllocationUtil::allocate_equal(10_000, 3), vec![3_334, 3_333, 3_333]);
    /// ```
    #[must_use]
    pub fn allocate_equal(total: i64, count: usize) -> Vec<i64> {
        if count == 0 {
            return vec![];
        }

        let magnitude = i128::from(total).abs();
        let count_wide = count as i128;
        let base = magnitude / count_wide;
        let extra = magnitude % count_wide;

        (0..count_wide)
            .map(|i| {
                let part = if i < extra { base + 1 } else { base };
                Self::with_sign(part, total)
            })
            .collect()
    }

    /// Allocate `total` proportionally to `weights`.
    ///
    /// Negative weights count as zero. When every weight is zero the amount
    /// is split equally. The result has one entry per weight and sums exactly
    /// to `total`.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_core::currency::AllocationUtil;
    ///
    /// // 500 split by line subtotals 60000 / 40000
    /// let parts = AllocationUtil::allocate_by_weights(500, &[60_000, 40_000]);
    /// assert_eq!(parts, vec![300, 200]);
    /// ```
    #[must_use]
    pub fn allocate_by_weights(total: i64, weights: &[i64]) -> Vec<i64> {
        if weights.is_empty() {
            return vec![];
        }

        let clamped: Vec<i128> = weights.iter().map(|w| i128::from(*w).max(0)).collect();
        let weight_sum: i128 = clamped.iter().sum();
        if weight_sum == 0 {
            return Self::allocate_equal(total, weights.len());
        }

        let magnitude = i128::from(total).abs();

        // Round down each exact share, remembering the fractional numerator.
        let mut parts: Vec<i128> = Vec::with_capacity(clamped.len());
        let mut remainders: Vec<(usize, i128)> = Vec::with_capacity(clamped.len());
        for (i, weight) in clamped.iter().enumerate() {
            let numerator = magnitude * weight;
            parts.push(numerator / weight_sum);
            remainders.push((i, numerator % weight_sum));
        }

        let allocated: i128 = parts.iter().sum();
        let units_to_distribute = usize::try_from(magnitude - allocated).unwrap_or(0);

        // Largest fractional part first; ties keep input order.
        remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (idx, _) in remainders.iter().take(units_to_distribute) {
            parts[*idx] += 1;
        }

        parts.into_iter().map(|p| Self::with_sign(p, total)).collect()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn with_sign(part: i128, total: i64) -> i64 {
        // |part| <= |total|, so the signed value always fits in i64.
        if total < 0 { (-part) as i64 } else { part as i64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // allocate_equal tests
    // =========================================================================

    #[test]
    fn test_allocate_equal_empty() {
        assert!(AllocationUtil::allocate_equal(10_000, 0).is_empty());
    }

    #[test]
    fn test_allocate_equal_single() {
        assert_eq!(AllocationUtil::allocate_equal(10_000, 1), vec![10_000]);
    }

    #[test]
    fn test_allocate_equal_thirds() {
        // First recipient gets the extra cent
        let result = AllocationUtil::allocate_equal(10_000, 3);
        assert_eq!(result, vec![3_334, 3_333, 3_333]);
    }

    #[test]
    fn test_allocate_equal_negative_total() {
        let result = AllocationUtil::allocate_equal(-100, 3);
        assert_eq!(result, vec![-34, -33, -33]);
        assert_eq!(result.iter().sum::<i64>(), -100);
    }

    #[test]
    fn test_allocate_equal_extreme_total() {
        let result = AllocationUtil::allocate_equal(i64::MIN, 1);
        assert_eq!(result, vec![i64::MIN]);
    }

    #[rstest]
    #[case(10_000, 3)]
    #[case(10_000, 7)]
    #[case(1, 3)]
    #[case(99_999, 7)]
    #[case(-5, 2)]
    fn test_allocate_equal_sum_invariant(#[case] total: i64, #[case] count: usize) {
        let result = AllocationUtil::allocate_equal(total, count);
        assert_eq!(result.len(), count);
        assert_eq!(result.iter().sum::<i64>(), total);
    }

    // =========================================================================
    // allocate_by_weights tests
    // =========================================================================

    #[test]
    fn test_allocate_by_weights_empty() {
        assert!(AllocationUtil::allocate_by_weights(100, &[]).is_empty());
    }

    #[test]
    fn test_allocate_by_weights_uneven() {
        // 100 split 50 / 30 / 20
        let result = AllocationUtil::allocate_by_weights(100, &[50, 30, 20]);
        assert_eq!(result, vec![50, 30, 20]);
    }

    #[test]
    fn test_allocate_by_weights_largest_remainder_wins() {
        // 10 by [1, 1, 1] -> 3.33 each, first gets the spare unit
        assert_eq!(AllocationUtil::allocate_by_weights(10, &[1, 1, 1]), vec![4, 3, 3]);
        // 10 by [1, 2] -> 3.33 / 6.67, the larger fraction gets the unit
        assert_eq!(AllocationUtil::allocate_by_weights(10, &[1, 2]), vec![3, 7]);
    }

    #[test]
    fn test_allocate_by_weights_zero_weights_split_equally() {
        assert_eq!(AllocationUtil::allocate_by_weights(5, &[0, 0]), vec![3, 2]);
    }

    #[test]
    fn test_allocate_by_weights_negative_weight_gets_nothing() {
        assert_eq!(AllocationUtil::allocate_by_weights(90, &[-50, 30, 60]), vec![0, 30, 60]);
    }

    #[rstest]
    #[case(5_000, vec![33_333, 33_333, 33_334])]
    #[case(1, vec![1, 1, 1, 1])]
    #[case(-7_777, vec![10, 20, 30, 40])]
    #[case(i64::MAX, vec![i64::MAX, 1])]
    fn test_allocate_by_weights_sum_invariant(#[case] total: i64, #[case] weights: Vec<i64>) {
        let result = AllocationUtil::allocate_by_weights(total, &weights);
        assert_eq!(result.len(), weights.len());
        assert_eq!(result.iter().map(|v| i128::from(*v)).sum::<i128>(), i128::from(total));
    }
}
