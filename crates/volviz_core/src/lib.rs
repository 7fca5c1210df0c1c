//! # volviz_core: Numerical Foundation for Synthetic Series Studies
//!
//! ## Foundation Layer Role
//!
//! volviz_core is the bottom layer of the workspace, providing:
//! - Error types: `StatsError` (`types::error`)
//! - Seeded random number generation: `SeriesRng` (`math::rng`)
//! - Daily volatility scaling and the 2x2 covariance matrix (`math::covariance`)
//! - Cumulative level and difference transforms (`math::series`)
//! - Ordinary least-squares linear fit (`math::regression`)
//! - Implied volatility surface tables (`market_data::surface`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other volviz_* crates, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - rand / rand_distr: Seeded normal sampling
//! - chrono: Date labels for surface rows
//! - csv: Surface table loading
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use volviz_core::math::regression::fit_linear;
//! use volviz_core::math::series::{cumulative_levels, first_differences};
//!
//! let returns = [0.01_f64, -0.02, 0.015, 0.005];
//! let levels = cumulative_levels(&returns, 100.0);
//! assert!((levels[0] - 101.0).abs() < 1e-12);
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let y = [3.0, 5.0, 7.0, 9.0];
//! let fit = fit_linear(&x, &y).unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! assert_eq!(first_differences(&levels).len(), 3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `LinearFit`, `CovarianceMatrix2`
//!   and `VolSurfaceTable`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;

pub use types::{StatsError, StatsResult};
