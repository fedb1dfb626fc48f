//! Simple linear regression `y = intercept + slope · x`.

use serde::{Deserialize, Serialize};
use u_numflow::stats;

use crate::error::{check_len, check_paired, check_sample, Result, StatsError};

/// Result of a simple linear regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Slope coefficient k.
    pub slope: f64,
    /// Intercept b.
    pub intercept: f64,
    /// Pearson correlation r between x and y.
    pub correlation: f64,
    /// Coefficient of determination, r².
    pub r_squared: f64,
    /// Mean approximation error in percent, mean |eᵢ / yᵢ| · 100.
    /// `None` if any yᵢ is 0.
    pub mae: Option<f64>,
    /// Elasticity k · x̄ / ȳ. `None` if ȳ is 0.
    pub elasticity: Option<f64>,
    /// Residuals eᵢ = yᵢ - ŷᵢ, in input order.
    pub residuals: Vec<f64>,
    /// Fitted values ŷᵢ, in input order.
    pub fitted: Vec<f64>,
    /// Sample size.
    pub n: usize,
}

impl RegressionResult {
    /// ŷ at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// ŷ for each of `xs`.
    pub fn predict_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }
}

/// Ordinary least squares fit of `y` on `x`.
///
/// # Algorithm
///
/// k = Sxy / Sxx, b = ȳ - k·x̄. r = Sxy / √(Sxx·Syy), R² = r².
///
/// # Errors
///
/// - [`StatsError::LengthMismatch`] if `x` and `y` differ in length.
/// - [`StatsError::TooFewObservations`] for fewer than 3 pairs.
/// - [`StatsError::NonFinite`] for NaN or infinite input.
/// - [`StatsError::ZeroVariance`] if `x` or `y` is constant.
///
/// # References
///
/// Draper & Smith (1998). "Applied Regression Analysis", 3rd edition.
///
/// # Examples
///
/// ```
/// use u_distfit::regression::linear_regression;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.1, 3.9, 6.1, 7.9, 10.1];
/// let r = linear_regression(&x, &y).unwrap();
/// assert!((r.slope - 2.0).abs() < 1e-12);
/// assert!((r.intercept - 0.02).abs() < 1e-12);
/// assert!((r.predict(6.0) - 12.02).abs() < 1e-12);
/// ```
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<RegressionResult> {
    check_paired(x, y)?;
    check_len(x, 3)?;
    check_sample(x)?;
    check_sample(y)?;

    let n = x.len();
    let too_few = StatsError::TooFewObservations {
        needed: 3,
        actual: n,
    };
    let x_mean = stats::mean(x).ok_or_else(|| too_few.clone())?;
    let y_mean = stats::mean(y).ok_or_else(|| too_few.clone())?;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx < 1e-300 {
        return Err(StatsError::ZeroVariance { variable: "x" });
    }
    if syy < 1e-300 {
        return Err(StatsError::ZeroVariance { variable: "y" });
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let correlation = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);

    let fitted: Vec<f64> = x.iter().map(|&xi| intercept + slope * xi).collect();
    let residuals: Vec<f64> = y
        .iter()
        .zip(fitted.iter())
        .map(|(&yi, &fi)| yi - fi)
        .collect();

    let mae = if y.iter().any(|&yi| yi == 0.0) {
        None
    } else {
        let ratios: Vec<f64> = residuals
            .iter()
            .zip(y)
            .map(|(&e, &yi)| (e / yi).abs())
            .collect();
        stats::mean(&ratios).map(|m| m * 100.0)
    };
    let elasticity = (y_mean != 0.0).then(|| slope * x_mean / y_mean);

    Ok(RegressionResult {
        slope,
        intercept,
        correlation,
        r_squared: correlation * correlation,
        mae,
        elasticity,
        residuals,
        fitted,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fit() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [3.0, 5.0, 7.0, 9.0, 11.0]; // y = 1 + 2x
        let r = linear_regression(&x, &y).expect("should compute");
        assert!((r.slope - 2.0).abs() < 1e-10);
        assert!((r.intercept - 1.0).abs() < 1e-10);
        assert!((r.r_squared - 1.0).abs() < 1e-10);
        assert!(r.residuals.iter().all(|e| e.abs() < 1e-10));
    }

    #[test]
    fn noisy_fit_reference_values() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.1, 3.9, 6.1, 7.9, 10.1];
        let r = linear_regression(&x, &y).expect("should compute");
        assert!((r.correlation - 0.999_400_539_460_566_4).abs() < 1e-12);
        assert!((r.r_squared - 0.998_801_438_274_071_1).abs() < 1e-12);
        assert!((r.r_squared - r.correlation * r.correlation).abs() < 1e-15);
        let mae = r.mae.expect("no zero y");
        assert!((mae - 2.101_797_769_195_179).abs() < 1e-10);
        let elasticity = r.elasticity.expect("non-zero mean");
        assert!((elasticity - 0.996_677_740_863_787_4).abs() < 1e-12);
        let expected = [0.08, -0.12, 0.08, -0.12, 0.08];
        for (e, want) in r.residuals.iter().zip(expected) {
            assert!((e - want).abs() < 1e-12);
        }
    }

    #[test]
    fn residuals_sum_to_zero() {
        let x = [0.5, 1.7, 2.2, 3.9, 4.1, 6.0];
        let y = [1.0, 2.5, 2.0, 4.8, 4.0, 7.1];
        let r = linear_regression(&x, &y).expect("should compute");
        let sum: f64 = r.residuals.iter().sum();
        assert!(sum.abs() < 1e-10, "residuals sum = {sum}");
    }

    #[test]
    fn negative_slope() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 8.0, 6.0, 4.0, 2.0]; // y = 12 - 2x
        let r = linear_regression(&x, &y).expect("should compute");
        assert!((r.slope + 2.0).abs() < 1e-10);
        assert!((r.intercept - 12.0).abs() < 1e-10);
        assert!((r.correlation + 1.0).abs() < 1e-12);
    }

    #[test]
    fn mae_and_elasticity_undefined() {
        let x = [1.0, 2.0, 3.0];
        let r = linear_regression(&x, &[0.0, 1.0, 3.0]).expect("should compute");
        assert_eq!(r.mae, None);
        assert!(r.elasticity.is_some());

        let r = linear_regression(&x, &[-1.0, 0.5, 0.5]).expect("should compute");
        assert_eq!(r.elasticity, None);
        assert!(r.mae.is_some());
    }

    #[test]
    fn predictions() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = linear_regression(&x, &y).expect("should compute");
        let pred = r.predict_all(&[6.0, 7.0]);
        assert!((pred[0] - 12.0).abs() < 1e-10);
        assert!((pred[1] - 14.0).abs() < 1e-10);
    }

    #[test]
    fn edge_cases() {
        assert!(matches!(
            linear_regression(&[1.0, 2.0], &[3.0, 4.0]),
            Err(StatsError::TooFewObservations { .. })
        ));
        assert!(matches!(
            linear_regression(&[1.0, 2.0, 3.0], &[4.0, 5.0]),
            Err(StatsError::LengthMismatch { .. })
        ));
        assert_eq!(
            linear_regression(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::ZeroVariance { variable: "x" })
        );
        assert_eq!(
            linear_regression(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]),
            Err(StatsError::ZeroVariance { variable: "y" })
        );
        assert!(matches!(
            linear_regression(&[1.0, f64::NAN, 3.0], &[4.0, 5.0, 6.0]),
            Err(StatsError::NonFinite { index: 1 })
        ));
    }
}
