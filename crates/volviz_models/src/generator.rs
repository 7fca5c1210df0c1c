//! Correlated-Series Generator.
//!
//! Draws `N` independent samples from a bivariate normal distribution with
//! mean `drift` and covariance `M`, where `M` is built from two annualised
//! volatilities scaled to daily and a correlation coefficient.
//!
//! Sampling takes an explicit [`SeriesRng`] so that a fixed seed reproduces
//! the same pair of return series.

use serde::{Deserialize, Serialize};
use tracing::debug;
use volviz_core::math::{CovarianceMatrix2, SeriesRng};

use crate::error::{ModelError, ModelResult};

/// Generator parameters.
///
/// # Example
///
/// ```
/// use volviz_models::generator::CorrelatedSeriesParams;
///
/// let params = CorrelatedSeriesParams::new([0.85, 0.18], -0.75, 500);
/// assert_eq!(params.drift, [0.0, 0.0]);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedSeriesParams {
    /// Annualised volatilities of the two series
    pub annual_vols: [f64; 2],
    /// Correlation coefficient in [-1, 1]
    pub correlation: f64,
    /// Number of daily samples
    pub samples: usize,
    /// Daily mean return of each series
    #[serde(default)]
    pub drift: [f64; 2],
}

impl CorrelatedSeriesParams {
    /// Create parameters with zero drift.
    pub fn new(annual_vols: [f64; 2], correlation: f64, samples: usize) -> Self {
        Self {
            annual_vols,
            correlation,
            samples,
            drift: [0.0, 0.0],
        }
    }

    /// Set the daily drift vector.
    pub fn with_drift(mut self, drift: [f64; 2]) -> Self {
        self.drift = drift;
        self
    }

    /// Validate the parameters.
    pub fn validate(&self) -> ModelResult<()> {
        if self.drift.iter().any(|d| !d.is_finite()) {
            return Err(ModelError::invalid_params(format!(
                "drift {:?} must be finite",
                self.drift
            )));
        }
        CovarianceMatrix2::from_annual(self.annual_vols[0], self.annual_vols[1], self.correlation)?;
        Ok(())
    }
}

impl Default for CorrelatedSeriesParams {
    fn default() -> Self {
        // Vol-level series against an equity index, negatively correlated
        Self::new([0.85, 0.18], -0.75, 500)
    }
}

/// Two equal-length daily return series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnPair {
    /// Returns of the first series
    pub first: Vec<f64>,
    /// Returns of the second series
    pub second: Vec<f64>,
}

impl ReturnPair {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// Whether the pair holds no observations.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

/// Bivariate normal return generator.
#[derive(Debug, Clone)]
pub struct CorrelatedSeriesGenerator {
    params: CorrelatedSeriesParams,
    covariance: CovarianceMatrix2,
}

impl CorrelatedSeriesGenerator {
    /// Create a generator, validating parameters and building the covariance.
    pub fn new(params: CorrelatedSeriesParams) -> ModelResult<Self> {
        params.validate()?;
        let covariance = CovarianceMatrix2::from_annual(
            params.annual_vols[0],
            params.annual_vols[1],
            params.correlation,
        )?;
        Ok(Self { params, covariance })
    }

    /// Generator parameters.
    pub fn params(&self) -> &CorrelatedSeriesParams {
        &self.params
    }

    /// Daily covariance matrix.
    pub fn covariance(&self) -> &CovarianceMatrix2 {
        &self.covariance
    }

    /// Draw `samples` bivariate normal observations.
    ///
    /// `samples == 0` yields two empty series.
    pub fn generate(&self, rng: &mut SeriesRng) -> ReturnPair {
        let n = self.params.samples;
        let factor = self.covariance.factor();
        let [mu0, mu1] = self.params.drift;

        let mut first = Vec::with_capacity(n);
        let mut second = Vec::with_capacity(n);
        for _ in 0..n {
            let z0 = rng.gen_normal();
            let z1 = rng.gen_normal();
            let (w0, w1) = factor.transform(z0, z1);
            first.push(mu0 + w0);
            second.push(mu1 + w1);
        }

        debug!(
            seed = rng.seed(),
            samples = n,
            correlation = self.params.correlation,
            "Generated correlated return series"
        );

        ReturnPair { first, second }
    }

    /// Draw a series with a fresh generator seeded by `seed`.
    pub fn generate_seeded(&self, seed: u64) -> ReturnPair {
        let mut rng = SeriesRng::from_seed(seed);
        self.generate(&mut rng)
    }
}
