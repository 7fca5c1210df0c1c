//! Level series transforms.
//!
//! Generic over `T: Float` so the same transforms apply to `f32` and `f64`.

use num_traits::Float;

/// Compound a return sequence into a level path.
///
/// `level[i] = start * (1 + r[0]) * ... * (1 + r[i])`. An empty return
/// sequence yields an empty path.
///
/// # Examples
///
/// ```
/// use volviz_core::math::series::cumulative_levels;
///
/// let levels = cumulative_levels(&[0.1_f64, -0.5], 80.0);
/// assert!((levels[0] - 88.0).abs() < 1e-12);
/// assert!((levels[1] - 44.0).abs() < 1e-12);
/// ```
pub fn cumulative_levels<T: Float>(returns: &[T], start: T) -> Vec<T> {
    returns
        .iter()
        .scan(start, |level, &r| {
            *level = *level * (T::one() + r);
            Some(*level)
        })
        .collect()
}

/// First differences `x[i+1] - x[i]`.
///
/// The leading undefined value is dropped, so the output has one element
/// fewer than the input (empty for inputs shorter than two).
pub fn first_differences<T: Float>(values: &[T]) -> Vec<T> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Simple returns `x[i+1] / x[i] - 1`.
///
/// Inverse of [`cumulative_levels`] once the starting level is prepended.
/// A zero level produces a non-finite return.
pub fn pct_change<T: Float>(values: &[T]) -> Vec<T> {
    values.windows(2).map(|w| w[1] / w[0] - T::one()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty_returns() {
        let levels: Vec<f64> = cumulative_levels(&[], 0.2);
        assert!(levels.is_empty());
    }

    #[test]
    fn test_compounding() {
        let levels = cumulative_levels(&[0.5_f64, 0.5, -0.5], 0.2);
        assert_relative_eq!(levels[0], 0.3, epsilon = 1e-15);
        assert_relative_eq!(levels[1], 0.45, epsilon = 1e-15);
        assert_relative_eq!(levels[2], 0.225, epsilon = 1e-15);
    }

    #[test]
    fn test_generic_f32() {
        let levels = cumulative_levels(&[0.25_f32], 4.0);
        assert_eq!(levels, vec![5.0_f32]);
    }

    #[test]
    fn test_first_differences() {
        assert_eq!(first_differences(&[1.0, 4.0, 9.0]), vec![3.0, 5.0]);
        assert!(first_differences(&[1.0_f64]).is_empty());
        assert!(first_differences::<f64>(&[]).is_empty());
    }

    #[test]
    fn test_pct_change_inverts_levels() {
        let returns = [0.01_f64, -0.02, 0.03];
        let mut path = vec![80.0];
        path.extend(cumulative_levels(&returns, 80.0));
        let recovered = pct_change(&path);
        for (a, b) in recovered.iter().zip(returns.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    fn return_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(-0.2f64..0.2, 1..200)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_first_level_identity(
            returns in return_strategy(),
            start in 0.01f64..1000.0,
        ) {
            let levels = cumulative_levels(&returns, start);
            prop_assert_eq!(levels.len(), returns.len());
            prop_assert!((levels[0] - start * (1.0 + returns[0])).abs() <= 1e-12 * start.max(1.0));
        }
    }
}
