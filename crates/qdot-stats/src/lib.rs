//! qdot-stats - Statistical primitives for quantile dotplots
//!
//! A quantile dotplot shows a distribution as a small number of dots, one per
//! equal-probability quantile, stacked in histogram bins. This crate provides
//! the pieces needed to compute that geometry:
//!
//! - **SortedSample**: sorted finite values with linear-interpolation percentiles
//! - **Histogram**: equal-width binning over a value range
//! - **Ntiles**: the quantile-to-bin partition (bin centers and dot counts)
//! - **DotCoordinates**: one (x, y) point per dot, stacked in columns
//!
//! All functions are pure and recompute from scratch on every call.

pub mod coords;
pub mod ecdf;
pub mod error;
pub mod histogram;
pub mod ntiles;

pub use coords::*;
pub use ecdf::*;
pub use error::{StatsError, StatsResult};
pub use histogram::*;
pub use ntiles::*;
