//! qdot-core - Quantile dotplot models
//!
//! Builds on `qdot-stats` to provide everything a renderer needs to draw
//! quantile dotplots for uncertain durations:
//!
//! - **Distribution**: seeded sample generation (normal, lognormal, ...)
//!   and closed-form densities
//! - **Dotplot**: dot geometry plus cosmetic style, ready for a scatter call
//! - **RiskExplorer**: panels with a shared risk/time marker, the model
//!   behind "how late am I willing to be?" sliders
//! - **QdotConfig**: TOML/JSON configuration
//!
//! Rendering, widgets, and color maps are left to the caller.

pub mod config;
pub mod dotplot;
pub mod error;
pub mod risk;
pub mod sampling;

pub use config::*;
pub use dotplot::*;
pub use error::{CoreError, CoreResult};
pub use risk::*;
pub use sampling::*;
