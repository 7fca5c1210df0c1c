//! # volviz_models: Correlated Series and Study Workflow
//!
//! Builds on `volviz_core` to provide:
//! - [`generator`]: Correlated-Series Generator (bivariate normal daily returns)
//! - [`levels`]: Cumulative-product level paths anchored at starting values
//! - [`calendar`]: Business-day date index for charting
//! - [`study`]: The complete recipe: generate, compound, difference and fit
//! - [`error`]: `ModelError`
//!
//! ## Usage
//!
//! ```
//! use volviz_models::prelude::*;
//!
//! let study = SeriesStudy::new(StudyConfig::default()).unwrap();
//! let result = study.run_seeded(42).unwrap();
//! assert_eq!(result.levels.first.len(), 500);
//! assert!(result.fit.r_squared >= 0.0 && result.fit.r_squared <= 1.0);
//! ```

pub mod calendar;
pub mod error;
pub mod generator;
pub mod levels;
pub mod study;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::calendar::business_days;
    pub use crate::error::{ModelError, ModelResult};
    pub use crate::generator::{CorrelatedSeriesGenerator, CorrelatedSeriesParams, ReturnPair};
    pub use crate::levels::LevelPair;
    pub use crate::study::{SeriesStudy, StudyConfig, StudyResult};
    pub use volviz_core::math::{LinearFit, SeriesRng};
}
