//! Correlation analysis.
//!
//! Pearson product-moment correlation with its t-test of H₀: ρ = 0.
//!
//! # Examples
//!
//! ```
//! use u_distfit::correlation::pearson;
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [2.0, 4.0, 5.0, 4.0, 5.0];
//!
//! let p = pearson(&x, &y).unwrap();
//! assert!(p.r > 0.7);
//! assert!(p.p_value < 0.2);
//! ```

use serde::{Deserialize, Serialize};
use u_numflow::stats;

use crate::error::{check_len, check_paired, check_sample, Result, StatsError};
use crate::special;
use crate::testing::TestResult;

/// Result of a correlation computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Correlation coefficient in [-1, 1].
    pub r: f64,
    /// Two-tailed p-value for testing H₀: ρ = 0.
    pub p_value: f64,
    /// Sample size.
    pub n: usize,
}

/// Computes Pearson product-moment correlation coefficient and p-value.
///
/// # Algorithm
///
/// r = cov(x,y) / (s_x · s_y), all with the n-1 denominator.
///
/// p-value from [`correlation_t_test`].
///
/// # Errors
///
/// - [`StatsError::LengthMismatch`] if the slices differ in length.
/// - [`StatsError::TooFewObservations`] for fewer than 3 pairs.
/// - [`StatsError::NonFinite`] / [`StatsError::EmptyInput`] from input
///   validation.
/// - [`StatsError::ZeroVariance`] if either variable is constant.
///
/// # References
///
/// Pearson (1895). "Note on regression and inheritance in the case of
/// two parents". Proceedings of the Royal Society of London, 58, 240–242.
///
/// # Examples
///
/// ```
/// use u_distfit::correlation::pearson;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let result = pearson(&x, &y).unwrap();
/// assert!((result.r - 1.0).abs() < 1e-10);
/// assert!(result.p_value < 1e-12);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    check_paired(x, y)?;
    check_len(x, 3)?;
    check_sample(x)?;
    check_sample(y)?;

    let n = x.len();
    let cov = stats::covariance(x, y).ok_or(StatsError::TooFewObservations {
        needed: 3,
        actual: n,
    })?;
    let sx = stats::std_dev(x).unwrap_or(0.0);
    let sy = stats::std_dev(y).unwrap_or(0.0);

    if sx < 1e-300 {
        return Err(StatsError::ZeroVariance { variable: "x" });
    }
    if sy < 1e-300 {
        return Err(StatsError::ZeroVariance { variable: "y" });
    }

    let r = (cov / (sx * sy)).clamp(-1.0, 1.0);
    let p_value = correlation_t_test(r, n).p_value;

    Ok(CorrelationResult { r, p_value, n })
}

/// t-test of a correlation coefficient: H₀: ρ = 0.
///
/// # Algorithm
///
/// t = r·√((n-2) / (1-r²)), df = n-2. A perfect correlation gives an
/// infinite t and p = 0.
///
/// For `n < 3` the test has no degrees of freedom and the p-value is NaN.
///
/// # Examples
///
/// ```
/// use u_distfit::correlation::correlation_t_test;
///
/// let t = correlation_t_test(0.5, 27);
/// assert!((t.statistic - 0.5 * (25.0_f64 / 0.75).sqrt()).abs() < 1e-12);
/// assert_eq!(t.df, 25.0);
/// ```
pub fn correlation_t_test(r: f64, n: usize) -> TestResult {
    let df = n.saturating_sub(2) as f64;
    let r2 = r * r;
    let statistic = if r2 >= 1.0 {
        r.signum() * f64::INFINITY
    } else {
        r * (df / (1.0 - r2)).sqrt()
    };
    TestResult {
        statistic,
        df,
        p_value: special::t_two_sided_p(statistic, df),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pearson_perfect_positive() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [3.0, 5.0, 7.0, 9.0, 11.0];
        let r = pearson(&x, &y).expect("should compute");
        assert!((r.r - 1.0).abs() < 1e-12);
        assert!(r.p_value < 1e-12);
        assert_eq!(r.n, 5);
    }

    #[test]
    fn pearson_perfect_negative() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 8.0, 6.0, 4.0, 2.0];
        let r = pearson(&x, &y).expect("should compute");
        assert!((r.r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_known_value() {
        // r = 6 / √(10 · 6) for these deviations
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let r = pearson(&x, &y).expect("should compute");
        assert!((r.r - 6.0 / 60.0_f64.sqrt()).abs() < 1e-12);
        let t = correlation_t_test(r.r, 5);
        assert!((r.p_value - t.p_value).abs() < 1e-15);
        assert!(r.p_value > 0.1 && r.p_value < 0.2);
    }

    #[test]
    fn pearson_uncorrelated() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 3.0, 1.0, 2.0];
        let r = pearson(&x, &y).expect("should compute");
        assert!(r.r.abs() < 0.5);
        assert!(r.p_value > 0.3);
    }

    #[test]
    fn pearson_errors() {
        assert_eq!(
            pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(StatsError::LengthMismatch { left: 3, right: 2 })
        );
        assert_eq!(
            pearson(&[1.0, 2.0], &[1.0, 2.0]),
            Err(StatsError::TooFewObservations {
                needed: 3,
                actual: 2
            })
        );
        assert_eq!(
            pearson(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::ZeroVariance { variable: "x" })
        );
        assert_eq!(
            pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]),
            Err(StatsError::ZeroVariance { variable: "y" })
        );
        assert!(matches!(
            pearson(&[1.0, f64::INFINITY, 3.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn correlation_t_test_zero_r() {
        let t = correlation_t_test(0.0, 10);
        assert_eq!(t.statistic, 0.0);
        assert!((t.p_value - 1.0).abs() < 1e-12);
    }
}
