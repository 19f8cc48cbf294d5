//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use qdot_core::{CoreError, CoreResult, Distribution, PanelView, QdotConfig};
use qdot_stats::HistBins;

#[derive(Debug, Parser)]
#[command(name = "qdot", version, about = "Quantile dotplot geometry for uncertain durations")]
pub struct Cli {
    /// Config file (defaults to <config dir>/qdot/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of dots, overriding the config
    #[arg(long, global = true)]
    pub dots: Option<usize>,

    /// Histogram bins: "auto" or a positive integer, overriding the config
    #[arg(long, global = true)]
    pub bins: Option<HistBins>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Draw a sample from one distribution and print its dotplot
    Dotplot(DotplotArgs),
    /// Build the configured panels and print their dotplots and markers
    Explore(ExploreArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DistKind {
    Normal,
    Lognormal,
    Uniform,
    Constant,
}

#[derive(Debug, Args)]
pub struct DotplotArgs {
    /// Distribution family
    #[arg(long, value_enum, default_value_t = DistKind::Normal)]
    pub dist: DistKind,

    /// Normal mean
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub mean: f64,

    /// Normal standard deviation
    #[arg(long, default_value_t = 1.0)]
    pub std_dev: f64,

    /// Lognormal: mean of the underlying normal
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub mu: f64,

    /// Lognormal: standard deviation of the underlying normal
    #[arg(long, default_value_t = 1.0)]
    pub sigma: f64,

    /// Uniform lower bound
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub low: f64,

    /// Uniform upper bound
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub high: f64,

    /// Constant value
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub value: f64,

    /// Number of draws
    #[arg(long, default_value_t = 100_000)]
    pub samples: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl DotplotArgs {
    pub fn distribution(&self) -> Distribution {
        match self.dist {
            DistKind::Normal => Distribution::Normal {
                mean: self.mean,
                std_dev: self.std_dev,
            },
            DistKind::Lognormal => Distribution::LogNormal {
                mu: self.mu,
                sigma: self.sigma,
            },
            DistKind::Uniform => Distribution::Uniform {
                low: self.low,
                high: self.high,
            },
            DistKind::Constant => Distribution::Constant { value: self.value },
        }
    }
}

#[derive(Debug, Args)]
pub struct ExploreArgs {
    /// Place every marker at this risk percentage
    #[arg(long, conflicts_with = "time")]
    pub risk: Option<f64>,

    /// Place every marker at this time in minutes
    #[arg(long)]
    pub time: Option<f64>,

    /// Panel content: "quantile" or "pdf", overriding the config
    #[arg(long)]
    pub view: Option<PanelView>,
}

impl Cli {
    /// Load the config and apply command-line overrides
    pub fn resolve_config(&self) -> CoreResult<QdotConfig> {
        let mut config = QdotConfig::load_or_default(self.config.as_deref())?;
        if let Some(dots) = self.dots {
            config.dotplot.dots = dots;
        }
        if let Some(bins) = self.bins {
            config.dotplot.hist_bins = bins;
        }
        config.validate()?;
        Ok(config)
    }

    /// Serialize output as JSON, pretty-printed on request
    pub fn to_json<T: serde::Serialize>(&self, value: &T) -> CoreResult<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(CoreError::from)
    }
}
