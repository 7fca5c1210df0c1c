//! # volviz_cli: Command Line Entry Point
//!
//! Wires the numerical foundation, the study workflow and the figure
//! builders into the `volviz` binary.
//!
//! - [`config`]: TOML configuration with `VOLVIZ_*` environment overrides
//! - [`commands`]: One module per subcommand
//! - [`error`]: `CliError` and the crate `Result` alias

pub mod commands;
pub mod config;
pub mod error;

pub use config::{ConfigError, RenderConfig, VolvizConfig};
pub use error::{CliError, Result};
