//! Risk/time explorer
//!
//! Each panel shows the dotplot of one uncertain duration (say, a bus
//! arrival time) with a vertical marker. The marker can be driven two ways:
//!
//! - by **risk**: "I accept a 20% chance of being late" places the marker at
//!   the 20th percentile of every panel's sample;
//! - by **time**: "I leave in 13 minutes" places the marker at 13 on every
//!   panel and reports the share of the sample at or below it.
//!
//! Times and risks are rounded to one decimal for display.
//!
//! In the density view each panel also carries its distribution's density
//! over the time axis.

use serde::Serialize;

use qdot_stats::{SortedSample, StatsError};

use crate::config::{ExplorerConfig, PanelView, QdotConfig};
use crate::dotplot::{Dotplot, DotplotSettings};
use crate::error::{CoreError, CoreResult};
use crate::sampling::{DensityCurve, Distribution};

/// Grid points per density curve
pub const DENSITY_POINTS: usize = 100;

/// Position of the marker on one panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    /// Time in minutes
    pub time: f64,
    /// Risk in percent
    pub risk: f64,
}

/// One distribution with its dotplot and marker
#[derive(Debug, Clone, Serialize)]
pub struct RiskPanel {
    pub name: String,
    #[serde(skip)]
    sample: SortedSample,
    pub dotplot: Dotplot,
    pub marker: Marker,
    /// Distribution the sample was drawn from, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<DensityCurve>,
}

impl RiskPanel {
    /// Build a panel from raw sample data; the marker starts at the median
    pub fn new(name: impl Into<String>, data: &[f64], settings: &DotplotSettings) -> CoreResult<Self> {
        let sample = SortedSample::from_data(data);
        let dotplot = Dotplot::from_sorted(&sample, settings)?;
        let mut panel = Self {
            name: name.into(),
            sample,
            dotplot,
            marker: Marker {
                time: 0.0,
                risk: 0.0,
            },
            distribution: None,
            density: None,
        };
        panel.reset()?;
        Ok(panel)
    }

    /// Record the distribution behind the sample
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = Some(distribution);
        self
    }

    /// Density of the panel's distribution on `[0, horizon_minutes]`
    pub fn density_curve(&self, horizon_minutes: f64) -> CoreResult<DensityCurve> {
        let distribution = self.distribution.as_ref().ok_or_else(|| {
            CoreError::InvalidConfig(format!("panel '{}' has no distribution", self.name))
        })?;
        distribution.density_curve(0.0, horizon_minutes, DENSITY_POINTS)
    }

    /// Time (minutes) at which `risk` percent of the sample has arrived
    pub fn time_at_risk(&self, risk: f64) -> CoreResult<f64> {
        let q = self
            .sample
            .quantile(risk / 100.0)
            .ok_or(StatsError::EmptySample)?;
        Ok(round_tenths(q))
    }

    /// Percent of the sample at or before time `t`, averaging over ties
    pub fn risk_at_time(&self, t: f64) -> f64 {
        round_tenths(self.sample.percentile_of_score(t))
    }

    /// Return the marker to the median and 50% risk
    pub fn reset(&mut self) -> CoreResult<()> {
        self.marker = Marker {
            time: self.time_at_risk(50.0)?,
            risk: 50.0,
        };
        Ok(())
    }

    /// The underlying sorted sample
    pub fn sample(&self) -> &SortedSample {
        &self.sample
    }
}

/// Several panels sharing one risk/time control
#[derive(Debug, Clone, Serialize)]
pub struct RiskExplorer {
    /// Upper end of the time axis in minutes
    pub horizon_minutes: f64,
    pub view: PanelView,
    pub panels: Vec<RiskPanel>,
}

impl RiskExplorer {
    pub fn new(horizon_minutes: f64, panels: Vec<RiskPanel>) -> CoreResult<Self> {
        if !(horizon_minutes.is_finite() && horizon_minutes > 0.0) {
            return Err(CoreError::InvalidConfig(
                "horizon_minutes must be positive".to_string(),
            ));
        }
        Ok(Self {
            horizon_minutes,
            view: PanelView::Quantile,
            panels,
        })
    }

    /// Switch views, filling or clearing each panel's density curve
    pub fn set_view(&mut self, view: PanelView) -> CoreResult<()> {
        let densities = self
            .panels
            .iter()
            .map(|panel| match view {
                PanelView::Pdf => panel.density_curve(self.horizon_minutes).map(Some),
                PanelView::Quantile => Ok(None),
            })
            .collect::<CoreResult<Vec<_>>>()?;

        for (panel, density) in self.panels.iter_mut().zip(densities) {
            panel.density = density;
        }
        self.view = view;
        tracing::debug!(%view, "switched panel view");
        Ok(())
    }

    /// Sample every configured distribution and build its panel
    ///
    /// Panel `i` is drawn with seed `explorer.seed + i`.
    pub fn from_config(config: &QdotConfig) -> CoreResult<Self> {
        config.validate()?;
        let ExplorerConfig {
            horizon_minutes,
            samples,
            seed,
            panels,
            view,
        } = &config.explorer;

        let panels = panels
            .iter()
            .enumerate()
            .map(|(i, panel)| {
                let data = panel
                    .distribution
                    .sample(*samples, seed.wrapping_add(i as u64))?;
                tracing::info!(panel = %panel.name, samples, "built panel");
                Ok(RiskPanel::new(panel.name.clone(), &data, &config.dotplot)?
                    .with_distribution(panel.distribution.clone()))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let mut explorer = Self::new(*horizon_minutes, panels)?;
        explorer.set_view(*view)?;
        Ok(explorer)
    }

    /// Move every marker to the time at which `risk` percent have arrived
    ///
    /// The quantile uses `risk` as given; only the reported risk is rounded.
    pub fn set_risk(&mut self, risk: f64) -> CoreResult<()> {
        check_range("risk", risk, 0.0, 100.0)?;
        let shown = round_tenths(risk);
        for panel in &mut self.panels {
            panel.marker = Marker {
                time: panel.time_at_risk(risk)?,
                risk: shown,
            };
        }
        tracing::debug!(risk = shown, "moved markers by risk");
        Ok(())
    }

    /// Move every marker to time `t` and recompute each panel's risk
    pub fn set_time(&mut self, t: f64) -> CoreResult<()> {
        check_range("time", t, 0.0, self.horizon_minutes)?;
        let time = round_tenths(t);
        for panel in &mut self.panels {
            panel.marker = Marker {
                time,
                risk: panel.risk_at_time(t),
            };
        }
        tracing::debug!(time, "moved markers by time");
        Ok(())
    }

    /// Return every marker to its median
    pub fn reset(&mut self) -> CoreResult<()> {
        self.panels.iter_mut().try_for_each(RiskPanel::reset)
    }

    /// Current markers in panel order
    pub fn markers(&self) -> Vec<Marker> {
        self.panels.iter().map(|p| p.marker).collect()
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> CoreResult<()> {
    if !(min..=max).contains(&value) {
        return Err(CoreError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn round_tenths(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
