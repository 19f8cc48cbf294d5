//! Explorer and configuration integration tests

use std::io::Write;

use qdot_core::{
    CoreError, Distribution, Dotplot, DotplotSettings, PanelView, QdotConfig, RiskExplorer,
    DENSITY_POINTS,
};
use qdot_stats::HistBins;

fn small_config() -> QdotConfig {
    let mut config = QdotConfig::default();
    config.explorer.samples = 20_000;
    config
}

#[test]
fn test_lognormal_auto_dotplot() {
    let data = Distribution::LogNormal {
        mu: 12f64.ln(),
        sigma: 0.2,
    }
    .sample(1_000_000, 2024)
    .unwrap();

    let plot = Dotplot::compute(&data, &DotplotSettings::default()).unwrap();
    let ntiles = &plot.ntiles;

    assert_eq!(ntiles.total(), 20);
    assert_eq!(plot.len(), 20);
    assert!(ntiles.max_count() + 2 <= ntiles.bins());

    // Quantiles of a lognormal around 12 stay well inside (6, 24)
    assert!(ntiles.quantiles.iter().all(|&q| q > 6.0 && q < 24.0));
    let median = (ntiles.quantiles[9] + ntiles.quantiles[10]) / 2.0;
    assert!((median - 12.0).abs() < 0.3, "median {}", median);
}

#[test]
fn test_explorer_from_default_scenario() {
    let mut explorer = RiskExplorer::from_config(&small_config()).unwrap();
    assert_eq!(explorer.panels.len(), 3);
    assert_eq!(explorer.horizon_minutes, 30.0);

    // Markers start at each sample median, close to the distribution median
    let expected = [12.0, 14.0, 16.0];
    for (marker, want) in explorer.markers().iter().zip(expected) {
        assert_eq!(marker.risk, 50.0);
        assert!((marker.time - want).abs() < 0.2, "{} vs {}", marker.time, want);
    }

    explorer.set_risk(90.0).unwrap();
    let late = explorer.markers();
    assert!(late.iter().all(|m| m.risk == 90.0));
    // Wider spread pushes the 90th percentile further past the median
    assert!(late[2].time - 16.0 > late[1].time - 14.0);

    explorer.set_time(15.0).unwrap();
    let at_15 = explorer.markers();
    assert!(at_15.iter().all(|m| m.time == 15.0));
    // Narrow normal (14, 0.5) > lognormal (12) > wide normal (16, 1.5)
    assert!(at_15[1].risk > at_15[0].risk);
    assert!(at_15[0].risk > at_15[2].risk);

    assert!(matches!(
        explorer.set_time(31.0),
        Err(CoreError::OutOfRange { .. })
    ));
}

#[test]
fn test_explorer_density_view() {
    let mut config = small_config();
    config.explorer.view = PanelView::Pdf;
    let explorer = RiskExplorer::from_config(&config).unwrap();
    assert_eq!(explorer.view, PanelView::Pdf);

    let peaks: Vec<f64> = explorer
        .panels
        .iter()
        .map(|panel| {
            let curve = panel.density.as_ref().unwrap();
            assert_eq!(curve.len(), DENSITY_POINTS);
            assert_eq!(curve.x[0], 0.0);
            assert_eq!(curve.x[DENSITY_POINTS - 1], 30.0);
            curve.mode().unwrap().0
        })
        .collect();

    // Each curve peaks within a grid step of its mode
    let step = 30.0 / (DENSITY_POINTS - 1) as f64;
    let mu = 12f64.ln();
    let lognormal_mode = (mu - 0.2 * 0.2).exp();
    assert!((peaks[0] - lognormal_mode).abs() <= step);
    assert!((peaks[1] - 14.0).abs() <= step);
    assert!((peaks[2] - 16.0).abs() <= step);

    // Markers behave the same in both views
    let quantile = RiskExplorer::from_config(&small_config()).unwrap();
    assert_eq!(explorer.markers(), quantile.markers());
    assert!(quantile.panels.iter().all(|p| p.density.is_none()));
}

#[test]
fn test_explorer_reproducible() {
    let a = RiskExplorer::from_config(&small_config()).unwrap();
    let b = RiskExplorer::from_config(&small_config()).unwrap();
    for (pa, pb) in a.panels.iter().zip(&b.panels) {
        assert_eq!(pa.dotplot, pb.dotplot);
    }
}

#[test]
fn test_explorer_fixed_bins() {
    let mut config = small_config();
    config.dotplot.dots = 30;
    config.dotplot.hist_bins = HistBins::Fixed(6);

    let explorer = RiskExplorer::from_config(&config).unwrap();
    for panel in &explorer.panels {
        assert_eq!(panel.dotplot.ntiles.bins(), 6);
        assert_eq!(panel.dotplot.ntiles.total(), 30);
    }
}

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[dotplot]
dots = 10

[dotplot.style]
edge_color = "navy"

[explorer]
horizon_minutes = 45.0
samples = 500

[[explorer.panels]]
name = "flat"
distribution = {{ kind = "uniform", low = 10.0, high = 40.0 }}
"#
    )
    .unwrap();

    let config = QdotConfig::load(file.path()).unwrap();
    assert_eq!(config.dotplot.dots, 10);
    assert_eq!(config.dotplot.style.edge_color, "navy");
    assert_eq!(config.dotplot.style.marker_size, 20.0);

    let explorer = RiskExplorer::from_config(&config).unwrap();
    assert_eq!(explorer.panels[0].dotplot.style.edge_color, "navy");
    assert_eq!(explorer.panels[0].dotplot.len(), 10);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        QdotConfig::load(&missing),
        Err(CoreError::ConfigRead { .. })
    ));
    assert!(QdotConfig::load_or_default(Some(&missing)).is_err());
}

#[test]
fn test_load_invalid_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[explorer]\nsamples = 0").unwrap();
    assert!(matches!(
        QdotConfig::load(file.path()),
        Err(CoreError::InvalidConfig(_))
    ));
}
