//! Error types for structured error handling.
//!
//! This module provides:
//! - `StatsError`: Errors from series construction, fitting and table validation
//! - `StatsResult`: Convenience alias for `Result<T, StatsError>`

use thiserror::Error;

/// Categorised errors for the numerical foundation.
///
/// Every failure is reported synchronously to the caller; nothing in this
/// crate retries or silently recovers.
///
/// # Variants
/// - `InsufficientData`: Fewer observations than the operation requires
/// - `DegenerateInput`: Input has no spread where spread is required
/// - `ShapeMismatch`: Lengths or grid dimensions disagree
/// - `InvalidParameter`: A scalar parameter is outside its valid range
/// - `Parse`: Tabular input could not be parsed
/// - `Io`: Underlying reader failed
///
/// # Examples
/// ```
/// use volviz_core::types::StatsError;
///
/// let err = StatsError::InsufficientData { got: 1, need: 2 };
/// assert_eq!(format!("{}", err), "Insufficient data: got 1, need at least 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Not enough paired observations.
    #[error("Insufficient data: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of usable observations
        got: usize,
        /// Minimum number required
        need: usize,
    },

    /// Input is degenerate (e.g. zero variance in the regressor).
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Dimensions disagree.
    #[error("Shape mismatch in {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// What was being checked
        context: String,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Parameter outside its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Tabular input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reader failure.
    #[error("IO error: {0}")]
    Io(String),
}

impl StatsError {
    /// Create a shape mismatch error.
    pub fn shape(context: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            got,
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

impl From<csv::Error> for StatsError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            StatsError::Io(err.to_string())
        } else {
            StatsError::Parse(err.to_string())
        }
    }
}

/// Result alias for foundation-layer operations.
pub type StatsResult<T> = Result<T, StatsError>;
