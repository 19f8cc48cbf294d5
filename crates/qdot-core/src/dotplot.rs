//! Quantile dotplot geometry and style
//!
//! A [`Dotplot`] is everything a scatter renderer needs: one (x, y) point per
//! dot plus the marker styling. The style is carried along untouched and
//! never influences the geometry.

use serde::{Deserialize, Serialize};

use qdot_stats::{compute_ntiles_sorted, DotCoordinates, HistBins, Ntiles, SortedSample};

use crate::error::{CoreError, CoreResult};

/// Marker styling passed through to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotplotStyle {
    /// Marker outline color
    pub edge_color: String,
    /// Marker outline width
    pub line_width: f64,
    /// Marker area in points squared
    pub marker_size: f64,
}

impl Default for DotplotStyle {
    fn default() -> Self {
        Self {
            edge_color: "black".to_string(),
            line_width: 1.0,
            marker_size: 20.0,
        }
    }
}

/// Parameters for building a dotplot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotplotSettings {
    /// Number of dots (quantiles) to draw
    pub dots: usize,
    /// Bin count, or `auto`
    pub hist_bins: HistBins,
    /// Marker styling
    pub style: DotplotStyle,
}

impl Default for DotplotSettings {
    fn default() -> Self {
        Self {
            dots: 20,
            hist_bins: HistBins::Auto,
            style: DotplotStyle::default(),
        }
    }
}

impl DotplotSettings {
    /// Validate settings before any sample is touched
    pub fn validate(&self) -> CoreResult<()> {
        if self.dots == 0 {
            return Err(CoreError::InvalidConfig("dots must be at least 1".to_string()));
        }
        self.hist_bins.validate()?;
        if !(self.style.line_width.is_finite() && self.style.line_width >= 0.0) {
            return Err(CoreError::InvalidConfig(
                "line_width must be a non-negative number".to_string(),
            ));
        }
        if !(self.style.marker_size.is_finite() && self.style.marker_size > 0.0) {
            return Err(CoreError::InvalidConfig(
                "marker_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A computed quantile dotplot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dotplot {
    /// Bin centers, counts, and the underlying quantiles
    pub ntiles: Ntiles,
    /// One point per dot
    pub dots: DotCoordinates,
    /// Styling for the scatter call
    pub style: DotplotStyle,
}

impl Dotplot {
    /// Build a dotplot from raw sample data
    pub fn compute(data: &[f64], settings: &DotplotSettings) -> CoreResult<Self> {
        settings.validate()?;
        Self::build(&SortedSample::from_data(data), settings)
    }

    /// Build a dotplot from a sample that is already sorted
    pub fn from_sorted(sample: &SortedSample, settings: &DotplotSettings) -> CoreResult<Self> {
        settings.validate()?;
        Self::build(sample, settings)
    }

    fn build(sample: &SortedSample, settings: &DotplotSettings) -> CoreResult<Self> {
        let ntiles = compute_ntiles_sorted(sample, settings.dots, settings.hist_bins)?;
        let dots = ntiles.dots();

        Ok(Self {
            ntiles,
            dots,
            style: settings.style.clone(),
        })
    }

    /// Number of dots drawn
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Horizontal extent of the dots, padded by half a bin on each side
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let first = *self.ntiles.centers.first()?;
        let last = *self.ntiles.centers.last()?;
        let half = 0.5 * self.ntiles.bin_width;
        Some((first - half, last + half))
    }
}
