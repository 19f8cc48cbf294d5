//! Equal-width histograms
//!
//! Bins span the `[min, max]` range of the values. Every bin is half-open
//! `[left, right)` except the last, which also includes the maximum. When all
//! values are identical the range is widened by 0.5 on each side, so a
//! constant sample still yields bins of positive width.
//!
//! A range only a few ulps wide cannot be split into distinct edges, so
//! neighbouring edges (and the centers derived from them) may coincide.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Histogram with uniform bin width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, one more than the number of bins
    edges: Vec<f64>,
    /// Number of values in each bin
    counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their range
    ///
    /// Non-finite values are an error here; callers filter them first.
    pub fn equal_width(values: &[f64], bins: usize) -> StatsResult<Self> {
        if bins == 0 {
            return Err(StatsError::invalid("bins", "must be at least 1"));
        }
        if values.is_empty() {
            return Err(StatsError::EmptySample);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(StatsError::invalid("values", "must all be finite"));
        }

        let (mut first, mut last) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if first == last {
            first -= 0.5;
            last += 0.5;
        }
        let span = last - first;
        if !span.is_finite() {
            return Err(StatsError::invalid("values", "range exceeds f64"));
        }

        let edges = linear_edges(first, last, bins);
        let mut counts = vec![0usize; bins];

        for &v in values {
            counts[bin_index(&edges, v, first, span)] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// Bin edges (length = bins + 1)
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Count per bin
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Consume the histogram, returning (edges, counts)
    pub fn into_parts(self) -> (Vec<f64>, Vec<usize>) {
        (self.edges, self.counts)
    }

    /// Number of bins
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Width shared by every bin
    pub fn width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Midpoint of each bin: left edge plus half the width
    pub fn centers(&self) -> Vec<f64> {
        let half = 0.5 * self.width();
        self.edges[..self.bins()].iter().map(|e| e + half).collect()
    }

    /// Tallest bin
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Total number of binned values
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// `bins + 1` evenly spaced edges with the last pinned to `last`
fn linear_edges(first: f64, last: f64, bins: usize) -> Vec<f64> {
    let step = (last - first) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| i as f64 * step + first).collect();
    edges[bins] = last;
    edges
}

/// Locate the bin for `v`, correcting the scaled estimate against the
/// stored edges so rounding cannot put a value on the wrong side of one.
///
/// Dividing by `span` first keeps the fraction in [0, 1] for subnormal spans.
fn bin_index(edges: &[f64], v: f64, first: f64, span: f64) -> usize {
    let bins = edges.len() - 1;
    let mut idx = (((v - first) / span * bins as f64) as usize).min(bins - 1);

    if idx > 0 && v < edges[idx] {
        idx -= 1;
    } else if idx + 1 < bins && v >= edges[idx + 1] {
        idx += 1;
    }
    idx
}
