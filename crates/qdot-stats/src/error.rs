//! Error types for qdot-stats

use thiserror::Error;

/// Errors raised by the statistical primitives.
///
/// Every variant is an invalid-argument condition: the computations are pure
/// and have no transient failure modes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// A parameter is outside its valid domain
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// The sample has no finite values
    #[error("Sample contains no finite values")]
    EmptySample,

    /// Parallel centers/counts sequences differ in length
    #[error("Length mismatch: {centers} centers vs {counts} counts")]
    LengthMismatch { centers: usize, counts: usize },
}

impl StatsError {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        StatsError::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

/// Result type alias for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = StatsError::invalid("dots", "must be at least 1");
        let msg = err.to_string();
        assert!(msg.contains("dots"));
        assert!(msg.contains("at least 1"));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = StatsError::LengthMismatch {
            centers: 3,
            counts: 4,
        };
        assert!(err.to_string().contains("3 centers vs 4 counts"));
    }
}
