//! Market data tables.
//!
//! - [`surface`]: Implied volatility surface indexed by date and moneyness

pub mod surface;

pub use surface::VolSurfaceTable;
