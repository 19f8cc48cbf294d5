//! Sorted samples and empirical percentiles
//!
//! A [`SortedSample`] holds the finite values of a sample in ascending order.
//! Percentiles use linear interpolation between order statistics: the value
//! at percentile `p` sits at fractional rank `p / 100 * (n - 1)`.
//!
//! # Example
//!
//! ```
//! use qdot_stats::SortedSample;
//!
//! let sample = SortedSample::from_data(&[4.0, 1.0, 3.0, 2.0]);
//! assert_eq!(sample.percentile(50.0), Some(2.5));
//! assert_eq!(sample.percentile_of_score(3.0), 75.0);
//! ```

use serde::{Deserialize, Serialize};

/// Finite sample values in ascending order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortedSample {
    /// Sorted finite values
    values: Vec<f64>,
    /// Number of non-finite values dropped on construction
    missing: usize,
}

impl SortedSample {
    /// Build a sorted sample from data, dropping NaN and infinite values
    ///
    /// Time complexity: O(n log n) for sorting
    pub fn from_data(data: &[f64]) -> Self {
        Self::from_iter_values(data.iter().copied())
    }

    /// Build a sorted sample from any iterator of values
    pub fn from_iter_values(data: impl IntoIterator<Item = f64>) -> Self {
        let mut missing = 0;
        let mut values: Vec<f64> = data
            .into_iter()
            .filter(|x| {
                let keep = x.is_finite();
                if !keep {
                    missing += 1;
                }
                keep
            })
            .collect();
        values.sort_by(f64::total_cmp);

        Self { values, missing }
    }

    /// Value at percentile `p` (0 to 100)
    ///
    /// Returns `None` for an empty sample or when `p` is outside [0, 100].
    /// Time complexity: O(1)
    pub fn percentile(&self, p: f64) -> Option<f64> {
        if self.values.is_empty() || !(0.0..=100.0).contains(&p) {
            return None;
        }

        let n = self.values.len();
        let rank = p / 100.0 * (n - 1) as f64;
        let lo = (rank.floor() as usize).min(n - 1);
        let hi = (lo + 1).min(n - 1);
        let t = rank - lo as f64;

        Some(lerp(self.values[lo], self.values[hi], t))
    }

    /// Evaluate several percentiles against the same sort
    ///
    /// Returns `None` if any probe is invalid.
    pub fn percentiles(&self, probes: &[f64]) -> Option<Vec<f64>> {
        probes.iter().map(|&p| self.percentile(p)).collect()
    }

    /// Value at quantile `q` (0 to 1)
    pub fn quantile(&self, q: f64) -> Option<f64> {
        self.percentile(q * 100.0)
    }

    /// Get the median
    pub fn median(&self) -> Option<f64> {
        self.percentile(50.0)
    }

    /// Percentile rank of a score, averaging over ties
    ///
    /// With `left` values strictly below `x` and `right` values at or below
    /// it, the rank is `(left + right + [left < right]) * 50 / n`.
    /// Returns 0 for an empty sample.
    pub fn percentile_of_score(&self, x: f64) -> f64 {
        let n = self.values.len();
        if n == 0 {
            return 0.0;
        }

        let left = self.values.partition_point(|&v| v < x);
        let right = self.values.partition_point(|&v| v <= x);
        let plus_one = usize::from(left < right);

        (left + right + plus_one) as f64 * (50.0 / n as f64)
    }

    /// Smallest finite value
    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Largest finite value
    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Number of finite values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no finite values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-finite values that were dropped
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Get the sorted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Interpolate from whichever endpoint is nearer so that `t == 1` lands
/// exactly on `b`. Falls back to a weighted sum when `b - a` overflows.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if !diff.is_finite() {
        a * (1.0 - t) + b * t
    } else if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}
