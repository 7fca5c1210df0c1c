//! Error types for figure construction and output.

use thiserror::Error;
use volviz_core::StatsError;

/// Render error type
#[derive(Debug, Error)]
pub enum RenderError {
    /// Input data failed validation
    #[error(transparent)]
    Data(#[from] StatsError),

    /// Unknown theme name
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Figure could not be serialised
    #[error("Serialisation error: {0}")]
    Serialise(#[from] serde_json::Error),

    /// IO error writing a figure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
