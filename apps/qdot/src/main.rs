//! qdot - quantile dotplot geometry
//!
//! Computes dot positions and risk markers and writes them to stdout as JSON
//! for an external renderer. Logs go to stderr; set `RUST_LOG=debug` to see
//! the chosen bin counts.

mod cli;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use qdot_core::{CoreResult, Dotplot, RiskExplorer};

use cli::{Cli, Command, DotplotArgs, ExploreArgs};

#[derive(Serialize)]
struct DistributionPlot<'a> {
    distribution: &'a qdot_core::Distribution,
    samples: usize,
    seed: u64,
    extent: Extent,
    dotplot: Dotplot,
}

/// Axis limits that fit every dot
#[derive(Debug, PartialEq, Serialize)]
struct Extent {
    x: Option<(f64, f64)>,
    height: f64,
}

impl Extent {
    fn of(dotplot: &Dotplot) -> Self {
        Self {
            x: dotplot.x_range(),
            height: dotplot.dots.max_height(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = run(&cli)?;
    println!("{}", output);
    Ok(())
}

fn run(cli: &Cli) -> CoreResult<String> {
    let config = cli.resolve_config()?;

    match &cli.command {
        Command::Dotplot(args) => dotplot(cli, &config.dotplot, args),
        Command::Explore(args) => explore(cli, &config, args),
        Command::Config => config.to_toml(),
    }
}

fn dotplot(
    cli: &Cli,
    settings: &qdot_core::DotplotSettings,
    args: &DotplotArgs,
) -> CoreResult<String> {
    let distribution = args.distribution();
    let data = distribution.sample(args.samples, args.seed)?;
    let dotplot = Dotplot::compute(&data, settings)?;
    tracing::info!(
        distribution = distribution.name(),
        bins = dotplot.ntiles.bins(),
        dots = dotplot.len(),
        "computed dotplot"
    );

    cli.to_json(&DistributionPlot {
        distribution: &distribution,
        samples: args.samples,
        seed: args.seed,
        extent: Extent::of(&dotplot),
        dotplot,
    })
}

fn explore(cli: &Cli, config: &qdot_core::QdotConfig, args: &ExploreArgs) -> CoreResult<String> {
    let mut explorer = RiskExplorer::from_config(config)?;
    if let Some(view) = args.view {
        explorer.set_view(view)?;
    }
    if let Some(risk) = args.risk {
        explorer.set_risk(risk)?;
    } else if let Some(time) = args.time {
        explorer.set_time(time)?;
    }

    for panel in &explorer.panels {
        tracing::info!(
            panel = %panel.name,
            time = panel.marker.time,
            risk = panel.marker.risk,
            "marker"
        );
    }

    cli.to_json(&explorer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdot_core::DotplotSettings;
    use qdot_stats::HistBins;

    #[test]
    fn test_extent_covers_dots() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let settings = DotplotSettings {
            dots: 4,
            hist_bins: HistBins::Fixed(2),
            ..Default::default()
        };
        let plot = Dotplot::compute(&data, &settings).unwrap();
        let extent = Extent::of(&plot);
        assert_eq!(extent.x, Some((2.125, 8.875)));
        assert_eq!(extent.height, 2.0);
    }

    #[test]
    fn test_explore_pdf_output() {
        let cli = Cli::parse_from(["qdot", "explore", "--view", "pdf"]);
        let mut config = qdot_core::QdotConfig::default();
        config.explorer.samples = 2_000;
        let args = match &cli.command {
            Command::Explore(args) => args,
            other => panic!("unexpected command {:?}", other),
        };
        let json: serde_json::Value =
            serde_json::from_str(&explore(&cli, &config, args).unwrap()).unwrap();
        assert_eq!(json["view"], "pdf");
        assert_eq!(json["panels"][0]["density"]["x"].as_array().unwrap().len(), 100);
    }
}
