//! Error types for qdot-core
//!
//! Provides error handling for:
//! - Statistical computation failures
//! - Configuration loading and validation
//! - Explorer inputs outside their range

use std::path::PathBuf;
use thiserror::Error;

use qdot_stats::StatsError;

/// Main error type for qdot operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid arguments to a statistical primitive
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Invalid distribution parameters
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A slider value outside its range
    #[error("{name} {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// TOML parsing errors
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("Failed to serialize TOML config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for qdot operations
pub type CoreResult<T> = Result<T, CoreError>;
