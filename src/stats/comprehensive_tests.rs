//! Property-based tests for the statistics functions

use super::{average, jitter, median, quantile};
use proptest::collection::vec;
use proptest::prelude::*;

fn samples() -> impl Strategy<Value = Vec<f64>> {
    vec(0.0f64..10_000.0, 1..64)
}

proptest! {
    #[test]
    fn prop_median_and_quantile_leave_input_untouched(values in samples(), p in 0.0f64..=1.0) {
        let before = values.clone();
        let _ = median(&values);
        let _ = quantile(&values, p);
        prop_assert_eq!(values, before);
    }

    #[test]
    fn prop_quantile_extremes_are_min_and_max(values in samples()) {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(quantile(&values, 0.0), min);
        prop_assert_eq!(quantile(&values, 1.0), max);
    }

    #[test]
    fn prop_quantile_stays_within_range(values in samples(), p in 0.0f64..=1.0) {
        let q = quantile(&values, p);
        let min = quantile(&values, 0.0);
        let max = quantile(&values, 1.0);
        prop_assert!(q >= min - 1e-9 && q <= max + 1e-9);
    }

    #[test]
    fn prop_quantile_is_monotonic_in_p(values in samples(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(quantile(&values, lo) <= quantile(&values, hi) + 1e-9);
    }

    #[test]
    fn prop_median_matches_half_quantile(values in samples()) {
        prop_assert!((median(&values) - quantile(&values, 0.5)).abs() < 1e-6);
    }

    #[test]
    fn prop_median_is_order_independent(mut values in samples()) {
        let before = median(&values);
        values.reverse();
        prop_assert_eq!(median(&values), before);
    }

    #[test]
    fn prop_jitter_is_non_negative_and_bounded(values in samples()) {
        let j = jitter(&values);
        let min = quantile(&values, 0.0);
        let max = quantile(&values, 1.0);
        prop_assert!(j >= 0.0);
        prop_assert!(j <= max - min + 1e-9);
    }

    #[test]
    fn prop_constant_series_has_no_jitter(value in 0.0f64..1000.0, n in 1usize..32) {
        let values = std::vec![value; n];
        prop_assert_eq!(jitter(&values), 0.0);
        prop_assert!((average(&values) - value).abs() < 1e-9);
    }
}

#[test]
fn test_jitter_is_order_sensitive() {
    assert_ne!(jitter(&[1.0, 5.0, 2.0]), jitter(&[1.0, 2.0, 5.0]));
}
