//! Ordinary least-squares simple linear regression.
//!
//! Fits `y = intercept + slope * x` and reports the Pearson correlation,
//! the coefficient of determination and the standard error of the slope.
//!
//! ```text
//! slope     = Sxy / Sxx
//! intercept = mean(y) - slope * mean(x)
//! r         = Sxy / sqrt(Sxx * Syy)
//! se(slope) = sqrt(SSE / (n - 2) / Sxx)
//! ```

use crate::types::{StatsError, StatsResult};

/// Minimum number of paired observations for a fit.
const MIN_OBSERVATIONS: usize = 2;

/// Result of a simple linear regression of `y` on `x`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearFit {
    /// Slope of the fitted line
    pub slope: f64,
    /// Intercept of the fitted line
    pub intercept: f64,
    /// Pearson correlation coefficient
    pub r: f64,
    /// Coefficient of determination (`r²`)
    pub r_squared: f64,
    /// Standard error of the slope; `None` with only two observations
    pub standard_error: Option<f64>,
    /// Number of paired observations used
    pub n: usize,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Evaluate the fitted line at every point of `xs`.
    pub fn fitted_line(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Human-readable equation, e.g. `y = 2.0000x + 1.0000`.
    pub fn equation(&self, precision: usize) -> String {
        let sign = if self.intercept < 0.0 { '-' } else { '+' };
        format!(
            "y = {:.p$}x {} {:.p$}",
            self.slope,
            sign,
            self.intercept.abs(),
            p = precision
        )
    }
}

/// Fit `y` on `x` by ordinary least squares.
///
/// Pairs where either value is not finite are removed before fitting.
///
/// # Errors
///
/// - `StatsError::ShapeMismatch` if `x` and `y` have different lengths
/// - `StatsError::InsufficientData` if fewer than two pairs remain
/// - `StatsError::DegenerateInput` if the remaining `x` values have zero variance
///
/// # Examples
///
/// ```
/// use volviz_core::math::regression::fit_linear;
///
/// let x = [0.0, 1.0, 2.0, 3.0];
/// let y = [1.0, 3.0, 5.0, 7.0];
/// let fit = fit_linear(&x, &y).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// assert!((fit.r_squared - 1.0).abs() < 1e-12);
/// ```
pub fn fit_linear(x: &[f64], y: &[f64]) -> StatsResult<LinearFit> {
    if x.len() != y.len() {
        return Err(StatsError::shape("regression inputs", x.len(), y.len()));
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .unzip();

    let n = xs.len();
    if n < MIN_OBSERVATIONS {
        return Err(StatsError::InsufficientData {
            got: n,
            need: MIN_OBSERVATIONS,
        });
    }

    if xs.iter().all(|&v| v == xs[0]) {
        return Err(StatsError::DegenerateInput(
            "regressor has zero variance".to_string(),
        ));
    }

    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&a, &b) in xs.iter().zip(ys.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx <= 0.0 {
        return Err(StatsError::DegenerateInput(
            "regressor has zero variance".to_string(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r = if syy > 0.0 {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    let standard_error = if n > MIN_OBSERVATIONS {
        let sse: f64 = xs
            .iter()
            .zip(ys.iter())
            .map(|(&a, &b)| {
                let resid = b - (intercept + slope * a);
                resid * resid
            })
            .sum();
        Some((sse / (nf - 2.0) / sxx).sqrt())
    } else {
        None
    };

    Ok(LinearFit {
        slope,
        intercept,
        r,
        r_squared: r * r,
        standard_error,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line() {
        let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.37 - 4.0).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let fit = fit_linear(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-10);
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-10);
        assert_relative_eq!(fit.r, 1.0, epsilon = 1e-10);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-10);
        assert!(fit.standard_error.unwrap() < 1e-8);
        assert_eq!(fit.n, 50);
    }

    #[test]
    fn test_negative_relationship() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 8.1, 5.9, 4.2, 1.8];
        let fit = fit_linear(&x, &y).unwrap();
        assert!(fit.slope < 0.0);
        assert!(fit.r < -0.99);
        assert!(fit.r_squared > 0.98 && fit.r_squared <= 1.0);
    }

    #[test]
    fn test_known_standard_error() {
        // y residuals are (+1, -1, -1, +1) around y = 0x + 0
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, -1.0, -1.0, 1.0];
        let fit = fit_linear(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-12);
        // SSE = 4, n - 2 = 2, Sxx = 5
        assert_relative_eq!(fit.standard_error.unwrap(), (4.0_f64 / 2.0 / 5.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_variance_x_is_degenerate() {
        let x = [0.1, 0.1, 0.1, 0.1];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(fit_linear(&x, &y), Err(StatsError::DegenerateInput(_))));
    }

    #[test]
    fn test_single_observation_insufficient() {
        assert_eq!(
            fit_linear(&[1.0], &[2.0]),
            Err(StatsError::InsufficientData { got: 1, need: 2 })
        );
        assert!(matches!(
            fit_linear(&[], &[]),
            Err(StatsError::InsufficientData { got: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_pairs_removed() {
        let x = [f64::NAN, 1.0, 2.0, 3.0];
        let y = [5.0, 3.0, 5.0, f64::INFINITY];
        let fit = fit_linear(&x, &y).unwrap();
        assert_eq!(fit.n, 2);
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert!(fit.standard_error.is_none());

        let only_one = fit_linear(&[f64::NAN, 1.0], &[1.0, 2.0]);
        assert_eq!(only_one, Err(StatsError::InsufficientData { got: 1, need: 2 }));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            fit_linear(&[1.0, 2.0], &[1.0]),
            Err(StatsError::ShapeMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_constant_y_has_zero_r() {
        let fit = fit_linear(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn test_predict_and_equation() {
        let fit = fit_linear(&[0.0, 1.0, 2.0], &[-1.0, 1.0, 3.0]).unwrap();
        assert_relative_eq!(fit.predict(10.0), 19.0, epsilon = 1e-12);
        assert_eq!(fit.fitted_line(&[0.0, 1.0]).len(), 2);
        assert_eq!(fit.equation(2), "y = 2.00x - 1.00");
    }
}
