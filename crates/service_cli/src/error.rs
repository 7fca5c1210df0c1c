//! CLI error types.

use thiserror::Error;
use volviz_core::StatsError;
use volviz_models::error::ModelError;
use volviz_render::error::RenderError;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Study or generator failure
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Numerical or table validation failure
    #[error("Data error: {0}")]
    Stats(#[from] StatsError),

    /// Figure construction or output failure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
