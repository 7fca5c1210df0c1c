//! Shared types for the foundation layer.
//!
//! - [`error`]: `StatsError` and the `StatsResult` alias

pub mod error;

pub use error::{StatsError, StatsResult};
