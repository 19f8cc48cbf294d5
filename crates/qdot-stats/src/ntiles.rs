//! Quantile-to-bin partitioning
//!
//! The sample is reduced to `dots` equal-probability quantiles, taken at
//! evenly spaced percentiles that stop half a step short of 0 and 100. Those
//! quantiles are then binned into equal-width histogram bins; each bin
//! becomes one column of dots in the plot.
//!
//! The bin count is either fixed or chosen adaptively: starting from one
//! bin, it grows until the tallest column is at least two dots shorter than
//! the number of columns.
//!
//! # Example
//!
//! ```
//! use qdot_stats::{compute_ntiles, HistBins};
//!
//! let data: Vec<f64> = (1..=10).map(f64::from).collect();
//! let ntiles = compute_ntiles(&data, 4, HistBins::Fixed(2)).unwrap();
//! assert_eq!(ntiles.counts, vec![2, 2]);
//! assert_eq!(ntiles.centers, vec![3.8125, 7.1875]);
//! ```

use std::fmt;
use std::str::FromStr;

use ndarray::{ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

use crate::coords::{expand_columns, DotCoordinates};
use crate::ecdf::SortedSample;
use crate::error::{StatsError, StatsResult};
use crate::histogram::Histogram;

/// How many histogram bins to lay the dots into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "HistBinsRepr", into = "HistBinsRepr")]
pub enum HistBins {
    /// Grow the bin count until the tallest column fits (see module docs)
    #[default]
    Auto,
    /// Exactly this many bins
    Fixed(usize),
}

impl HistBins {
    /// Check that a fixed bin count is positive
    pub fn validate(self) -> StatsResult<Self> {
        match self {
            HistBins::Fixed(0) => Err(StatsError::invalid("hist_bins", "must be at least 1")),
            other => Ok(other),
        }
    }
}

impl fmt::Display for HistBins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistBins::Auto => write!(f, "auto"),
            HistBins::Fixed(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for HistBins {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(HistBins::Auto);
        }
        let n: usize = s.parse().map_err(|_| {
            StatsError::invalid("hist_bins", format!("expected 'auto' or a positive integer, got '{}'", s))
        })?;
        HistBins::Fixed(n).validate()
    }
}

/// Wire form: the string "auto" or a bare integer
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum HistBinsRepr {
    Count(usize),
    Name(String),
}

impl TryFrom<HistBinsRepr> for HistBins {
    type Error = StatsError;

    fn try_from(repr: HistBinsRepr) -> Result<Self, Self::Error> {
        match repr {
            HistBinsRepr::Count(n) => HistBins::Fixed(n).validate(),
            HistBinsRepr::Name(s) => s.parse(),
        }
    }
}

impl From<HistBins> for HistBinsRepr {
    fn from(bins: HistBins) -> Self {
        match bins {
            HistBins::Auto => HistBinsRepr::Name("auto".to_string()),
            HistBins::Fixed(n) => HistBinsRepr::Count(n),
        }
    }
}

/// Result of partitioning a sample into dot columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ntiles {
    /// Bin centers, ascending and equally spaced
    pub centers: Vec<f64>,
    /// Dots per bin; sums to the requested dot count
    pub counts: Vec<usize>,
    /// The quantile set that was binned
    pub quantiles: Vec<f64>,
    /// Width shared by every bin
    pub bin_width: f64,
}

impl Ntiles {
    /// Number of bins
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of dots
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Tallest column
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Per-dot plot coordinates
    pub fn dots(&self) -> DotCoordinates {
        expand_columns(self.centers.iter().copied().zip(self.counts.iter().copied()))
    }
}

/// Percentile probes for `dots` quantiles
///
/// Spaced evenly from `50 / dots` to `100 - 50 / dots` inclusive, so no probe
/// sits on the sample minimum or maximum.
pub fn quantile_probes(dots: usize) -> StatsResult<Vec<f64>> {
    validate_dots(dots)?;
    Ok(percentile_grid(dots))
}

fn percentile_grid(dots: usize) -> Vec<f64> {
    let edge = (100.0 / dots as f64) / 2.0;
    let stop = 100.0 - edge;
    if dots == 1 {
        return vec![edge];
    }

    let step = (stop - edge) / (dots - 1) as f64;
    let mut probes: Vec<f64> = (0..dots).map(|i| i as f64 * step + edge).collect();
    probes[dots - 1] = stop;
    probes
}

/// Partition `data` into `dots` quantiles laid into histogram bins
///
/// Non-finite values are ignored. Fails when `dots` is zero, a fixed bin
/// count is zero, or the sample has no finite values.
pub fn compute_ntiles(data: &[f64], dots: usize, hist_bins: HistBins) -> StatsResult<Ntiles> {
    validate_dots(dots)?;
    hist_bins.validate()?;
    partition(&SortedSample::from_data(data), dots, hist_bins)
}

/// [`compute_ntiles`] over an n-dimensional array, flattened in logical order
pub fn compute_ntiles_nd<S, D>(
    data: &ArrayBase<S, D>,
    dots: usize,
    hist_bins: HistBins,
) -> StatsResult<Ntiles>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    validate_dots(dots)?;
    hist_bins.validate()?;
    partition(
        &SortedSample::from_iter_values(data.iter().copied()),
        dots,
        hist_bins,
    )
}

/// [`compute_ntiles`] for a sample that is already sorted
pub fn compute_ntiles_sorted(
    sample: &SortedSample,
    dots: usize,
    hist_bins: HistBins,
) -> StatsResult<Ntiles> {
    validate_dots(dots)?;
    hist_bins.validate()?;
    partition(sample, dots, hist_bins)
}

/// Shared body of the public entry points; arguments are already checked
fn partition(sample: &SortedSample, dots: usize, hist_bins: HistBins) -> StatsResult<Ntiles> {
    if sample.is_empty() {
        return Err(StatsError::EmptySample);
    }

    let probes = percentile_grid(dots);
    let quantiles = sample
        .percentiles(&probes)
        .ok_or_else(|| StatsError::invalid("dots", "produced a percentile outside [0, 100]"))?;

    let hist = match hist_bins {
        HistBins::Fixed(bins) => Histogram::equal_width(&quantiles, bins)?,
        HistBins::Auto => adaptive_histogram(&quantiles)?,
    };
    tracing::debug!(dots, bins = hist.bins(), mode = %hist_bins, "partitioned quantiles");

    let bin_width = hist.width();
    let centers = hist.centers();
    let (_, counts) = hist.into_parts();

    Ok(Ntiles {
        centers,
        counts,
        quantiles,
        bin_width,
    })
}

/// Grow the bin count from one until `max(counts) + 2 <= bins`
///
/// No bin can hold more than every quantile, so the rule is always met by
/// `quantiles.len() + 2` bins; the loop never goes past that.
fn adaptive_histogram(quantiles: &[f64]) -> StatsResult<Histogram> {
    let limit = quantiles.len() + 2;
    let mut bins = 1;
    let mut hist = Histogram::equal_width(quantiles, bins)?;

    while hist.max_count() + 2 > hist.bins() && bins < limit {
        bins += 1;
        hist = Histogram::equal_width(quantiles, bins)?;
    }
    Ok(hist)
}

fn validate_dots(dots: usize) -> StatsResult<()> {
    if dots == 0 {
        return Err(StatsError::invalid("dots", "must be at least 1"));
    }
    Ok(())
}
