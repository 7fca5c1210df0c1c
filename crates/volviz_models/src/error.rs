//! Error types for the models layer.

use thiserror::Error;
use volviz_core::StatsError;

/// Model error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Invalid generator or study parameters
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Error from the numerical foundation
    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl ModelError {
    /// Create an invalid parameters error
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }
}

/// Result alias for the models layer.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::invalid_params("samples must be positive");
        assert_eq!(err.to_string(), "Invalid parameters: samples must be positive");
    }

    #[test]
    fn test_stats_passthrough() {
        let err: ModelError = StatsError::InsufficientData { got: 1, need: 2 }.into();
        assert_eq!(err.to_string(), "Insufficient data: got 1, need at least 2");
    }
}
