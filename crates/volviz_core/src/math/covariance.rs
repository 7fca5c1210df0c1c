//! Daily volatility scaling and the bivariate covariance matrix.
//!
//! ## Mathematical Background
//!
//! Annualised volatilities are brought to a daily scale with
//!
//! ```text
//! σ_daily = σ_annual / sqrt(252)
//! ```
//!
//! and combined with a correlation ρ into
//!
//! ```text
//! M = | σ0²       σ0·σ1·ρ |
//!     | σ0·σ1·ρ   σ1²     |
//! ```
//!
//! Correlated normals are produced as `W = L * Z` where `L` is the lower
//! triangular factor of `M` and `Z` are independent standard normals.
//!
//! ## Usage
//!
//! ```
//! use volviz_core::math::covariance::CovarianceMatrix2;
//!
//! let cov = CovarianceMatrix2::from_annual(0.2, 0.9, -0.7).unwrap();
//! assert!(cov.is_symmetric());
//!
//! let factor = cov.factor();
//! let (w0, w1) = factor.transform(0.5, -0.3);
//! assert!(w0.is_finite() && w1.is_finite());
//! ```

use crate::types::{StatsError, StatsResult};

/// Trading days per year used for daily scaling.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Convert an annualised volatility to a daily volatility.
///
/// # Examples
///
/// ```
/// use volviz_core::math::covariance::daily_volatility;
///
/// let daily = daily_volatility(0.2);
/// assert!((daily - 0.2 / 252.0_f64.sqrt()).abs() < 1e-15);
/// ```
#[inline]
pub fn daily_volatility(annual_vol: f64) -> f64 {
    annual_vol / TRADING_DAYS_PER_YEAR.sqrt()
}

/// Symmetric 2x2 covariance matrix of daily returns.
///
/// Constructed only through validated parameters, so the matrix is always
/// symmetric with non-negative diagonal and positive semi-definite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCovariance"))]
pub struct CovarianceMatrix2 {
    /// Row-major elements
    data: [[f64; 2]; 2],
    /// Daily volatilities used to build the matrix
    daily_vols: [f64; 2],
    /// Correlation coefficient
    correlation: f64,
}

impl CovarianceMatrix2 {
    /// Build the matrix from annualised volatilities and a correlation.
    ///
    /// # Errors
    ///
    /// `StatsError::InvalidParameter` when either volatility is not a
    /// positive finite number or the correlation is outside `[-1, 1]`.
    pub fn from_annual(vol0: f64, vol1: f64, correlation: f64) -> StatsResult<Self> {
        check_volatility("annual", 0, vol0)?;
        check_volatility("annual", 1, vol1)?;
        Self::from_daily(daily_volatility(vol0), daily_volatility(vol1), correlation)
    }

    fn from_daily(d0: f64, d1: f64, correlation: f64) -> StatsResult<Self> {
        check_volatility("daily", 0, d0)?;
        check_volatility("daily", 1, d1)?;
        if !correlation.is_finite() || !(-1.0..=1.0).contains(&correlation) {
            return Err(StatsError::invalid(format!(
                "correlation {} outside [-1, 1]",
                correlation
            )));
        }

        let off = d0 * d1 * correlation;
        Ok(Self {
            data: [[d0 * d0, off], [off, d1 * d1]],
            daily_vols: [d0, d1],
            correlation,
        })
    }

    /// Element at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is greater than 1.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i][j]
    }

    /// Variance of component `i`.
    #[inline]
    pub fn variance(&self, i: usize) -> f64 {
        self.data[i][i]
    }

    /// Off-diagonal covariance.
    #[inline]
    pub fn covariance(&self) -> f64 {
        self.data[0][1]
    }

    /// Correlation used to build the matrix.
    #[inline]
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Daily volatilities `[σ0, σ1]`.
    #[inline]
    pub fn daily_vols(&self) -> [f64; 2] {
        self.daily_vols
    }

    /// Whether `M[0][1] == M[1][0]`.
    pub fn is_symmetric(&self) -> bool {
        self.data[0][1] == self.data[1][0]
    }

    /// Lower triangular factor `L` with `L * L^T = M`.
    ///
    /// Unlike a strict Cholesky decomposition this tolerates the singular
    /// case `|ρ| = 1`, where the second diagonal entry collapses to zero.
    pub fn factor(&self) -> CovarianceFactor {
        let l00 = self.data[0][0].sqrt();
        let l10 = if l00 > 0.0 { self.data[1][0] / l00 } else { 0.0 };
        let l11 = (self.data[1][1] - l10 * l10).max(0.0).sqrt();
        CovarianceFactor { l00, l10, l11 }
    }
}

fn check_volatility(scale: &str, index: usize, vol: f64) -> StatsResult<()> {
    if !vol.is_finite() || vol <= 0.0 {
        return Err(StatsError::invalid(format!(
            "{} volatility {} is {}, must be positive and finite",
            scale, index, vol
        )));
    }
    Ok(())
}

/// Serialised form; the matrix is rebuilt from the volatilities and
/// correlation and must agree with the stored elements.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCovariance {
    data: [[f64; 2]; 2],
    daily_vols: [f64; 2],
    correlation: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCovariance> for CovarianceMatrix2 {
    type Error = StatsError;

    fn try_from(raw: RawCovariance) -> StatsResult<Self> {
        let [d0, d1] = raw.daily_vols;
        let rebuilt = Self::from_daily(d0, d1, raw.correlation)?;
        let consistent = raw
            .data
            .iter()
            .flatten()
            .zip(rebuilt.data.iter().flatten())
            .all(|(given, expected)| (given - expected).abs() <= 1e-12 * expected.abs().max(1e-300));
        if !consistent {
            return Err(StatsError::invalid(format!(
                "covariance elements {:?} disagree with daily vols {:?} and correlation {}",
                raw.data, raw.daily_vols, raw.correlation
            )));
        }
        Ok(rebuilt)
    }
}

/// Lower triangular factor of a [`CovarianceMatrix2`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CovarianceFactor {
    l00: f64,
    l10: f64,
    l11: f64,
}

impl CovarianceFactor {
    /// Element at `(i, j)`; zero above the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        match (i, j) {
            (0, 0) => self.l00,
            (1, 0) => self.l10,
            (1, 1) => self.l11,
            _ => 0.0,
        }
    }

    /// Map independent standard normals to correlated, scaled normals.
    #[inline]
    pub fn transform(&self, z0: f64, z1: f64) -> (f64, f64) {
        (self.l00 * z0, self.l10 * z0 + self.l11 * z1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_elements_match_definition() {
        let cov = CovarianceMatrix2::from_annual(0.2, 0.9, -0.7).unwrap();
        let d0 = 0.2 / 252.0_f64.sqrt();
        let d1 = 0.9 / 252.0_f64.sqrt();
        assert_relative_eq!(cov.get(0, 0), d0 * d0, epsilon = 1e-15);
        assert_relative_eq!(cov.get(1, 1), d1 * d1, epsilon = 1e-15);
        assert_relative_eq!(cov.get(0, 1), d0 * d1 * -0.7, epsilon = 1e-15);
        assert_eq!(cov.get(0, 1), cov.get(1, 0));
        assert_eq!(cov.correlation(), -0.7);
    }

    #[test]
    fn test_rejects_out_of_range_correlation() {
        assert!(matches!(
            CovarianceMatrix2::from_annual(0.2, 0.3, 1.01),
            Err(StatsError::InvalidParameter(_))
        ));
        assert!(CovarianceMatrix2::from_annual(0.2, 0.3, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_non_positive_vol() {
        assert!(CovarianceMatrix2::from_annual(0.0, 0.3, 0.5).is_err());
        assert!(CovarianceMatrix2::from_annual(0.2, -0.3, 0.5).is_err());
        assert!(CovarianceMatrix2::from_annual(f64::INFINITY, 0.3, 0.5).is_err());
    }

    #[test]
    fn test_factor_reconstructs_matrix() {
        let cov = CovarianceMatrix2::from_annual(0.25, 0.6, 0.4).unwrap();
        let l = cov.factor();
        for i in 0..2 {
            for j in 0..2 {
                let mut sum = 0.0;
                for k in 0..2 {
                    sum += l.get(i, k) * l.get(j, k);
                }
                assert_relative_eq!(sum, cov.get(i, j), epsilon = 1e-15);
            }
        }
        assert_eq!(l.get(0, 1), 0.0);
    }

    #[test]
    fn test_factor_perfect_correlation() {
        let cov = CovarianceMatrix2::from_annual(0.2, 0.4, 1.0).unwrap();
        let l = cov.factor();
        assert!(l.get(1, 1).abs() < 1e-8);
        let (w0, w1) = l.transform(1.0, 5.0);
        // Second component moves in lockstep with the first
        assert_relative_eq!(w1 / w0, 2.0, epsilon = 1e-5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_validates() {
        let bad = r#"{"data":[[1.0,5.0],[-3.0,-2.0]],"daily_vols":[1.0,1.0],"correlation":9.0}"#;
        let err = serde_json::from_str::<CovarianceMatrix2>(bad).unwrap_err();
        assert!(err.to_string().contains("correlation 9"), "{}", err);

        let asymmetric = r#"{"data":[[1.0,0.5],[-0.5,1.0]],"daily_vols":[1.0,1.0],"correlation":0.5}"#;
        assert!(serde_json::from_str::<CovarianceMatrix2>(asymmetric).is_err());

        let negative_vol = r#"{"data":[[1.0,0.0],[0.0,1.0]],"daily_vols":[-1.0,1.0],"correlation":0.0}"#;
        assert!(serde_json::from_str::<CovarianceMatrix2>(negative_vol).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let cov = CovarianceMatrix2::from_annual(0.85, 0.18, -0.75).unwrap();
        let json = serde_json::to_string(&cov).unwrap();
        let back: CovarianceMatrix2 = serde_json::from_str(&json).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(back.get(i, j), cov.get(i, j), max_relative = 1e-14);
            }
        }
        assert_eq!(back.correlation(), -0.75);
        assert!(back.is_symmetric());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn test_symmetric_non_negative_diagonal(
            vol0 in 0.001f64..3.0,
            vol1 in 0.001f64..3.0,
            rho in -1.0f64..=1.0,
        ) {
            let cov = CovarianceMatrix2::from_annual(vol0, vol1, rho).unwrap();
            prop_assert!(cov.is_symmetric());
            prop_assert!(cov.variance(0) >= 0.0);
            prop_assert!(cov.variance(1) >= 0.0);
            // Determinant of a PSD 2x2 matrix is non-negative up to rounding
            let det = cov.get(0, 0) * cov.get(1, 1) - cov.get(0, 1) * cov.get(1, 0);
            prop_assert!(det >= -1e-18);
        }
    }
}
