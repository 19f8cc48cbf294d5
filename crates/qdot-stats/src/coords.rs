//! Dot coordinates for a quantile dotplot
//!
//! Each bin with `k` dots becomes a column of `k` points at the bin center,
//! stacked at heights `0.5, 1.5, ..., k - 0.5` so the first dot's center sits
//! half a dot above the baseline.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Parallel x/y sequences, one entry per dot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DotCoordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl DotCoordinates {
    /// Number of dots
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (x, y) pairs in bin order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Height of the tallest column, measured to the top of its last dot
    pub fn max_height(&self) -> f64 {
        self.y.iter().copied().fold(0.0, f64::max) + if self.is_empty() { 0.0 } else { 0.5 }
    }
}

/// Expand parallel (centers, counts) into per-dot coordinates
pub fn expand_dots(centers: &[f64], counts: &[usize]) -> StatsResult<DotCoordinates> {
    if centers.len() != counts.len() {
        return Err(StatsError::LengthMismatch {
            centers: centers.len(),
            counts: counts.len(),
        });
    }
    Ok(expand_columns(centers.iter().copied().zip(counts.iter().copied())))
}

pub(crate) fn expand_columns(columns: impl Iterator<Item = (f64, usize)> + Clone) -> DotCoordinates {
    let total: usize = columns.clone().map(|(_, k)| k).sum();
    let mut x = Vec::with_capacity(total);
    let mut y = Vec::with_capacity(total);

    for (center, count) in columns {
        x.extend(std::iter::repeat(center).take(count));
        y.extend((0..count).map(|j| j as f64 + 0.5));
    }

    DotCoordinates { x, y }
}
