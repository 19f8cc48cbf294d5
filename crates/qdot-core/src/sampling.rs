//! Seeded sample generation
//!
//! Produces reproducible draws from a handful of parametric distributions, to
//! stand in for the empirical data a dotplot is normally built from. The
//! closed-form densities back the explorer's density view.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// A parametric distribution to draw samples from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    /// Gaussian with the given mean and standard deviation
    Normal { mean: f64, std_dev: f64 },
    /// exp(N(mu, sigma)); `mu` and `sigma` describe the underlying normal
    #[serde(rename = "lognormal")]
    LogNormal { mu: f64, sigma: f64 },
    /// Uniform on [low, high)
    Uniform { low: f64, high: f64 },
    /// Every draw equals `value`
    Constant { value: f64 },
}

impl Distribution {
    /// Short name used in logs and CLI arguments
    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Normal { .. } => "normal",
            Distribution::LogNormal { .. } => "lognormal",
            Distribution::Uniform { .. } => "uniform",
            Distribution::Constant { .. } => "constant",
        }
    }

    /// Check that the parameters describe a proper distribution
    pub fn validate(&self) -> CoreResult<()> {
        let ok = match *self {
            Distribution::Normal { mean, std_dev } => {
                mean.is_finite() && std_dev.is_finite() && std_dev >= 0.0
            }
            Distribution::LogNormal { mu, sigma } => {
                mu.is_finite() && sigma.is_finite() && sigma >= 0.0
            }
            Distribution::Uniform { low, high } => {
                low.is_finite() && high.is_finite() && low <= high
            }
            Distribution::Constant { value } => value.is_finite(),
        };
        if ok {
            Ok(())
        } else {
            Err(CoreError::InvalidDistribution(format!("{:?}", self)))
        }
    }

    /// Closed-form median
    pub fn median(&self) -> f64 {
        match *self {
            Distribution::Normal { mean, .. } => mean,
            Distribution::LogNormal { mu, .. } => mu.exp(),
            Distribution::Uniform { low, high } => 0.5 * (low + high),
            Distribution::Constant { value } => value,
        }
    }

    /// Probability density at `x`
    ///
    /// Degenerate cases have no density and return 0: `Constant`, a zero
    /// `std_dev` or `sigma`, and `low == high`. The uniform support includes
    /// both bounds.
    pub fn pdf(&self, x: f64) -> f64 {
        match *self {
            Distribution::Normal { mean, std_dev } => {
                if std_dev == 0.0 {
                    return 0.0;
                }
                let z = (x - mean) / std_dev;
                (-0.5 * z * z).exp() / (std_dev * SQRT_2PI)
            }
            Distribution::LogNormal { mu, sigma } => {
                if sigma == 0.0 || x <= 0.0 {
                    return 0.0;
                }
                let z = (x.ln() - mu) / sigma;
                (-0.5 * z * z).exp() / (x * sigma * SQRT_2PI)
            }
            Distribution::Uniform { low, high } => {
                if low < high && (low..=high).contains(&x) {
                    1.0 / (high - low)
                } else {
                    0.0
                }
            }
            Distribution::Constant { .. } => 0.0,
        }
    }

    /// Density evaluated on `points` evenly spaced values from `start` to
    /// `stop` inclusive
    pub fn density_curve(&self, start: f64, stop: f64, points: usize) -> CoreResult<DensityCurve> {
        self.validate()?;
        if points == 0 {
            return Err(CoreError::InvalidConfig(
                "density points must be at least 1".to_string(),
            ));
        }
        if !(start.is_finite() && stop.is_finite()) {
            return Err(CoreError::InvalidConfig(
                "density range must be finite".to_string(),
            ));
        }

        let x = linspace(start, stop, points);
        let density = x.iter().map(|&v| self.pdf(v)).collect();
        Ok(DensityCurve { x, density })
    }

    /// Draw `n` values; the same seed always yields the same draws
    pub fn sample(&self, n: usize, seed: u64) -> CoreResult<Vec<f64>> {
        self.validate()?;

        let mut rng = SeededRng::new(seed);
        let mut out = Vec::with_capacity(n);

        match *self {
            Distribution::Normal { mean, std_dev } => {
                fill_gaussian(&mut rng, &mut out, n, |z| mean + std_dev * z)
            }
            Distribution::LogNormal { mu, sigma } => {
                fill_gaussian(&mut rng, &mut out, n, |z| (mu + sigma * z).exp())
            }
            Distribution::Uniform { low, high } => {
                out.extend((0..n).map(|_| low + rng.next_f64() * (high - low)))
            }
            Distribution::Constant { value } => out.resize(n, value),
        }

        tracing::debug!(distribution = self.name(), n, seed, "drew samples");
        Ok(out)
    }
}

/// A density sampled on a grid, ready for a line plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCurve {
    pub x: Vec<f64>,
    pub density: Vec<f64>,
}

impl DensityCurve {
    /// Number of grid points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Grid point with the highest density
    pub fn mode(&self) -> Option<(f64, f64)> {
        self.x
            .iter()
            .copied()
            .zip(self.density.iter().copied())
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Evenly spaced grid with the last point pinned to `stop`
fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    if points == 1 {
        return vec![start];
    }
    let step = (stop - start) / (points - 1) as f64;
    let mut grid: Vec<f64> = (0..points).map(|i| i as f64 * step + start).collect();
    grid[points - 1] = stop;
    grid
}

fn fill_gaussian(rng: &mut SeededRng, out: &mut Vec<f64>, n: usize, map: impl Fn(f64) -> f64) {
    while out.len() < n {
        let (a, b) = box_muller(rng);
        out.push(map(a));
        if out.len() < n {
            out.push(map(b));
        }
    }
}

/// Splitmix-style generator for reproducible draws
struct SeededRng {
    state: u64,
}

impl SeededRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E3779B97F4A7C15),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1) with 53 bits of precision
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Two independent standard normals
fn box_muller(rng: &mut SeededRng) -> (f64, f64) {
    // 1 - u is in (0, 1], so ln never sees zero
    let u1 = 1.0 - rng.next_f64();
    let u2 = rng.next_f64();

    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * std::f64::consts::PI * u2;

    (r * theta.cos(), r * theta.sin())
}
