//! Configuration for qdot
//!
//! Dotplot settings plus the explorer scenario. The defaults describe three
//! commute options: a lognormal around 12 minutes and two normals around
//! 14 and 16 minutes, on a 30-minute axis.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dotplot::DotplotSettings;
use crate::error::{CoreError, CoreResult};
use crate::sampling::Distribution;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QdotConfig {
    /// How each dotplot is built
    pub dotplot: DotplotSettings,
    /// The panels shown by the explorer
    pub explorer: ExplorerConfig,
}

/// Explorer scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Upper end of the time axis in minutes
    pub horizon_minutes: f64,
    /// Draws per panel
    pub samples: usize,
    /// Seed for the first panel; later panels add their index
    pub seed: u64,
    /// One entry per panel, top to bottom
    pub panels: Vec<PanelConfig>,
    /// What each panel shows alongside its marker
    pub view: PanelView,
}

/// Panel content: the quantile dotplot, or the dotplot plus the density
/// curve of the panel's distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelView {
    #[default]
    Quantile,
    Pdf,
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelView::Quantile => write!(f, "quantile"),
            PanelView::Pdf => write!(f, "pdf"),
        }
    }
}

impl FromStr for PanelView {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantile" => Ok(PanelView::Quantile),
            "pdf" => Ok(PanelView::Pdf),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown view '{}', expected 'quantile' or 'pdf'",
                other
            ))),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            horizon_minutes: 30.0,
            samples: 1_000_000,
            seed: 42,
            panels: vec![
                PanelConfig::new(
                    "lognormal",
                    Distribution::LogNormal {
                        mu: 12f64.ln(),
                        sigma: 0.2,
                    },
                ),
                PanelConfig::new(
                    "narrow normal",
                    Distribution::Normal {
                        mean: 14.0,
                        std_dev: 0.5,
                    },
                ),
                PanelConfig::new(
                    "wide normal",
                    Distribution::Normal {
                        mean: 16.0,
                        std_dev: 1.5,
                    },
                ),
            ],
            view: PanelView::Quantile,
        }
    }
}

/// A single explorer panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub name: String,
    pub distribution: Distribution,
}

impl PanelConfig {
    pub fn new(name: impl Into<String>, distribution: Distribution) -> Self {
        Self {
            name: name.into(),
            distribution,
        }
    }
}

impl QdotConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> CoreResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Default config location: `<config dir>/qdot/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qdot").join("config.toml"))
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load `path` if given, else the default path if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> CoreResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => Self::load(&default),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> CoreResult<()> {
        self.dotplot.validate()?;

        let explorer = &self.explorer;
        if !(explorer.horizon_minutes.is_finite() && explorer.horizon_minutes > 0.0) {
            return Err(CoreError::InvalidConfig(
                "horizon_minutes must be positive".to_string(),
            ));
        }
        if explorer.samples == 0 {
            return Err(CoreError::InvalidConfig(
                "samples must be at least 1".to_string(),
            ));
        }
        for panel in &explorer.panels {
            panel.distribution.validate()?;
        }

        Ok(())
    }
}
