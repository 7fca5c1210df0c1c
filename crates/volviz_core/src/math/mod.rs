//! Numerical building blocks.
//!
//! - [`rng`]: Seeded random number generator handle
//! - [`covariance`]: Daily volatility scaling and the 2x2 covariance matrix
//! - [`series`]: Cumulative level, difference and return transforms
//! - [`regression`]: Ordinary least-squares simple linear regression

pub mod covariance;
pub mod regression;
pub mod rng;
pub mod series;

pub use covariance::{daily_volatility, CovarianceFactor, CovarianceMatrix2, TRADING_DAYS_PER_YEAR};
pub use regression::{fit_linear, LinearFit};
pub use rng::SeriesRng;
pub use series::{cumulative_levels, first_differences, pct_change};
