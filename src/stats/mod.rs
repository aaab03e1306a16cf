//! Statistical aggregation of speed test samples
//!
//! All functions are pure and take the samples by shared reference; the
//! ones that need ordering sort a private copy.

use crate::types::Sample;
use serde::{Deserialize, Serialize};

/// Arithmetic mean. NaN for an empty slice.
pub fn average(values: &[Sample]) -> f64 {
    let total: f64 = values.iter().sum();
    total / values.len() as f64
}

/// Middle value of the sorted samples, mean of the two middle values for an
/// even count. NaN for an empty slice.
pub fn median(values: &[Sample]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let sorted = sorted_copy(values);
    let half = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[half]
    } else {
        (sorted[half - 1] + sorted[half]) / 2.0
    }
}

/// Linear-interpolated quantile (type 7) for `p` in `[0, 1]`. 0 for an empty slice.
pub fn quantile(values: &[Sample], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sorted = sorted_copy(values);
    let pos = (sorted.len() - 1) as f64 * p;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;

    match sorted.get(base + 1) {
        Some(next) => sorted[base] + rest * (next - sorted[base]),
        None => sorted[base],
    }
}

/// Mean absolute difference between consecutive samples, in their original
/// order. 0 for fewer than two samples.
pub fn jitter(values: &[Sample]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let diffs: Vec<f64> = values
        .windows(2)
        .map(|pair| (pair[0] - pair[1]).abs())
        .collect();
    average(&diffs)
}

fn sorted_copy(values: &[Sample]) -> Vec<Sample> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Summary of one sample set used for display and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: usize,
    pub median: f64,
    pub p90: f64,
    pub jitter: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleSummary {
    /// Summarize a sample set; `None` when there is nothing to summarize
    pub fn from_samples(values: &[Sample]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        Some(Self {
            count: values.len(),
            median: median(values),
            p90: quantile(values, 0.9),
            jitter: jitter(values),
            min: quantile(values, 0.0),
            max: quantile(values, 1.0),
        })
    }
}

// Additional property-based tests in separate module
#[cfg(test)]
mod comprehensive_tests;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_average() {
        assert_close(average(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert!(average(&[]).is_nan());
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_close(median(&[1.0, 3.0, 2.0]), 2.0);
        assert_close(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_close(median(&[7.0]), 7.0);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_median_does_not_mutate_input() {
        let values = vec![5.0, 1.0, 4.0, 2.0];
        let _ = median(&values);
        assert_eq!(values, vec![5.0, 1.0, 4.0, 2.0]);
    }

    #[test]
    fn test_quantile_interpolation() {
        assert_close(quantile(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.9), 4.6);
        assert_close(quantile(&[5.0, 1.0, 3.0, 2.0, 4.0], 0.5), 3.0);
        assert_close(quantile(&[10.0, 20.0], 0.25), 12.5);
    }

    #[test]
    fn test_quantile_bounds() {
        let values = [3.0, 9.0, 1.0, 4.0];
        assert_close(quantile(&values, 0.0), 1.0);
        assert_close(quantile(&values, 1.0), 9.0);
    }

    #[test]
    fn test_quantile_empty_is_zero() {
        assert_eq!(quantile(&[], 0.0), 0.0);
        assert_eq!(quantile(&[], 0.9), 0.0);
        assert_eq!(quantile(&[], 1.0), 0.0);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_close(quantile(&[42.0], 0.3), 42.0);
    }

    #[test]
    fn test_jitter_degenerate() {
        assert_eq!(jitter(&[]), 0.0);
        assert_eq!(jitter(&[12.0]), 0.0);
    }

    #[test]
    fn test_jitter_uses_original_order() {
        // |1-5| + |5-2| = 7 over 2 pairs
        assert_close(jitter(&[1.0, 5.0, 2.0]), 3.5);
        // |1-2| + |2-5| = 4 over 2 pairs
        assert_close(jitter(&[1.0, 2.0, 5.0]), 2.0);
    }

    #[test]
    fn test_summary() {
        let summary = SampleSummary::from_samples(&[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_eq!(summary.count, 5);
        assert_close(summary.median, 3.0);
        assert_close(summary.p90, 4.6);
        assert_close(summary.min, 1.0);
        assert_close(summary.max, 5.0);

        assert!(SampleSummary::from_samples(&[]).is_none());
    }
}
