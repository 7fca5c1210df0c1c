//! Level paths built by compounding a [`ReturnPair`].

use serde::{Deserialize, Serialize};
use volviz_core::math::{cumulative_levels, first_differences};

use crate::generator::ReturnPair;

/// Two level series, each anchored at its own starting value.
///
/// Read-only after construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelPair {
    /// Level path of the first series
    pub first: Vec<f64>,
    /// Level path of the second series
    pub second: Vec<f64>,
    /// Starting values `[first, second]`
    pub starts: [f64; 2],
}

impl LevelPair {
    /// Compound each return series independently from its starting level.
    ///
    /// # Example
    ///
    /// ```
    /// use volviz_models::generator::ReturnPair;
    /// use volviz_models::levels::LevelPair;
    ///
    /// let returns = ReturnPair { first: vec![0.1, 0.1], second: vec![-0.5, 1.0] };
    /// let levels = LevelPair::from_returns(&returns, [0.2, 80.0]);
    /// assert!((levels.first[0] - 0.22).abs() < 1e-12);
    /// assert!((levels.second[1] - 80.0).abs() < 1e-12);
    /// ```
    pub fn from_returns(returns: &ReturnPair, starts: [f64; 2]) -> Self {
        Self {
            first: cumulative_levels(&returns.first, starts[0]),
            second: cumulative_levels(&returns.second, starts[1]),
            starts,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// Whether the paths are empty.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// First differences of both paths, leading undefined value dropped.
    pub fn differences(&self) -> (Vec<f64>, Vec<f64>) {
        (first_differences(&self.first), first_differences(&self.second))
    }
}
