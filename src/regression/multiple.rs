//! Two-predictor regression `y = b₀ + b₁·x₁ + b₂·x₂`.

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use u_numflow::stats;

use super::simple::linear_regression;
use crate::error::{check_len, check_paired, check_sample, Result, StatsError};
use crate::special;

/// A pivot of the Cholesky factor smaller than this fraction of its
/// centered sum of squares marks a collinear predictor.
const RELATIVE_PIVOT_TOLERANCE: f64 = 1e-12;

/// One value per model term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Intercept term.
    pub intercept: f64,
    /// First predictor.
    pub x1: f64,
    /// Second predictor.
    pub x2: f64,
}

impl Coefficients {
    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            intercept: f(self.intercept),
            x1: f(self.x1),
            x2: f(self.x2),
        }
    }
}

/// Variance inflation factor of each predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceInflation {
    /// VIF of x₁.
    pub x1: f64,
    /// VIF of x₂.
    pub x2: f64,
}

/// Result of a two-predictor regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleRegressionResult {
    /// Estimated coefficients.
    pub coefficients: Coefficients,
    /// Standard errors of the coefficients.
    pub std_errors: Coefficients,
    /// t statistics of H₀: bⱼ = 0.
    pub t_stats: Coefficients,
    /// Two-sided p-values of the t statistics, n-3 df.
    pub t_p_values: Coefficients,
    /// R² = SSR / SST.
    pub r_squared: f64,
    /// 1 - (1-R²)(n-1)/(n-3).
    pub adj_r_squared: f64,
    /// F = (SSR/2) / (SSE/(n-3)).
    pub f_stat: f64,
    /// Upper-tail probability of F(2, n-3).
    pub f_p_value: f64,
    /// Variance inflation factors.
    pub vif: VarianceInflation,
    /// Residuals, in input order.
    pub residuals: Vec<f64>,
    /// Fitted values, in input order.
    pub fitted: Vec<f64>,
    /// Sample size.
    pub n: usize,
}

impl MultipleRegressionResult {
    /// ŷ at `(x1, x2)`.
    pub fn predict(&self, x1: f64, x2: f64) -> f64 {
        let b = &self.coefficients;
        b.intercept + b.x1 * x1 + b.x2 * x2
    }
}

/// Ordinary least squares with an intercept and two predictors.
///
/// # Algorithm
///
/// 1. Center both predictors and the response on their means and
///    accumulate the 2×2 cross-product matrix S and the vector Sₓᵧ.
/// 2. Factor S = LLᵀ (Cholesky) and solve for (b₁, b₂). A failed
///    factorization, or a pivot Lⱼⱼ² below 10⁻¹² · Sⱼⱼ, means the
///    predictors are collinear.
/// 3. b₀ = ȳ - b₁x̄₁ - b₂x̄₂.
/// 4. SST, SSR, SSE; R², adjusted R², F with (2, n-3) df.
/// 5. SE(bⱼ) = √(MSE · (S⁻¹)ⱼⱼ) and SE(b₀) = √(MSE · (1/n + x̄ᵀS⁻¹x̄));
///    t = bⱼ / SE(bⱼ).
/// 6. VIF of xⱼ = 1 / (1 - R²ⱼ), R²ⱼ from regressing xⱼ on the other
///    predictor.
///
/// # Errors
///
/// - [`StatsError::LengthMismatch`] if the inputs differ in length.
/// - [`StatsError::TooFewObservations`] for fewer than 4 observations.
/// - [`StatsError::NonFinite`] for NaN or infinite input.
/// - [`StatsError::SingularMatrix`] for collinear predictors, including a
///   constant predictor.
/// - [`StatsError::ZeroVariance`] if `y` is constant.
///
/// # References
///
/// Montgomery, Peck & Vining (2012). "Introduction to Linear Regression
/// Analysis", 5th edition.
///
/// # Examples
///
/// ```
/// use u_distfit::regression::multiple_regression;
///
/// let x1 = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// let x2 = [2.0, 1.0, 3.0, 2.0, 4.0, 3.0, 5.0, 4.0];
/// let y = [5.1, 5.0, 9.2, 8.9, 13.1, 12.0, 17.2, 15.9];
/// let result = multiple_regression(&x1, &x2, &y).unwrap();
/// assert!(result.r_squared > 0.99);
/// assert!((result.vif.x1 - 2.8).abs() < 1e-9);
/// ```
pub fn multiple_regression(
    x1: &[f64],
    x2: &[f64],
    y: &[f64],
) -> Result<MultipleRegressionResult> {
    check_paired(x1, x2)?;
    check_paired(x1, y)?;
    check_len(y, 4)?;
    check_sample(x1)?;
    check_sample(x2)?;
    check_sample(y)?;

    let n = y.len();
    let nf = n as f64;
    let mean_x1 = stats::mean(x1).ok_or(StatsError::EmptyInput)?;
    let mean_x2 = stats::mean(x2).ok_or(StatsError::EmptyInput)?;
    let y_mean = stats::mean(y).ok_or(StatsError::EmptyInput)?;

    let mut sxx = Matrix2::<f64>::zeros();
    let mut sxy = Vector2::<f64>::zeros();
    for ((&a, &b), &yi) in x1.iter().zip(x2).zip(y) {
        let row = Vector2::new(a - mean_x1, b - mean_x2);
        sxx += row * row.transpose();
        sxy += row * (yi - y_mean);
    }

    let cholesky = sxx.cholesky().ok_or(StatsError::SingularMatrix)?;
    let l = cholesky.l();
    for j in 0..2 {
        if l[(j, j)].powi(2) <= sxx[(j, j)] * RELATIVE_PIVOT_TOLERANCE {
            return Err(StatsError::SingularMatrix);
        }
    }
    let slopes = cholesky.solve(&sxy);
    let sxx_inv = cholesky.inverse();
    let coefficients = Coefficients {
        intercept: y_mean - slopes[0] * mean_x1 - slopes[1] * mean_x2,
        x1: slopes[0],
        x2: slopes[1],
    };

    let fitted: Vec<f64> = x1
        .iter()
        .zip(x2)
        .map(|(&a, &b)| y_mean + slopes[0] * (a - mean_x1) + slopes[1] * (b - mean_x2))
        .collect();
    let residuals: Vec<f64> = y.iter().zip(&fitted).map(|(&yi, &fi)| yi - fi).collect();

    let sst: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
    if sst < 1e-300 {
        return Err(StatsError::ZeroVariance { variable: "y" });
    }
    let ssr: f64 = fitted.iter().map(|&f| (f - y_mean).powi(2)).sum();
    let sse: f64 = residuals.iter().map(|e| e * e).sum();

    let df_res = nf - 3.0;
    let r_squared = (ssr / sst).min(1.0);
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (nf - 1.0) / df_res;

    let mse = sse / df_res;
    let (f_stat, f_p_value) = if mse > 1e-300 {
        let f = (ssr / 2.0) / mse;
        let p = (1.0 - special::f_distribution_cdf(f, 2.0, df_res)).clamp(0.0, 1.0);
        (f, p)
    } else {
        (f64::INFINITY, 0.0)
    };

    let means = Vector2::new(mean_x1, mean_x2);
    let intercept_factor = 1.0 / nf + means.dot(&(sxx_inv * means));
    let std_errors = Coefficients {
        intercept: intercept_factor,
        x1: sxx_inv[(0, 0)],
        x2: sxx_inv[(1, 1)],
    }
    .map(|d| (d * mse).sqrt());
    let t_stats = Coefficients {
        intercept: t_ratio(coefficients.intercept, std_errors.intercept),
        x1: t_ratio(coefficients.x1, std_errors.x1),
        x2: t_ratio(coefficients.x2, std_errors.x2),
    };
    let t_p_values = t_stats.map(|t| special::t_two_sided_p(t, df_res));

    let vif = VarianceInflation {
        x1: inflation(linear_regression(x2, x1)?.r_squared),
        x2: inflation(linear_regression(x1, x2)?.r_squared),
    };

    Ok(MultipleRegressionResult {
        coefficients,
        std_errors,
        t_stats,
        t_p_values,
        r_squared,
        adj_r_squared,
        f_stat,
        f_p_value,
        vif,
        residuals,
        fitted,
        n,
    })
}

fn t_ratio(estimate: f64, se: f64) -> f64 {
    if se > 1e-300 {
        estimate / se
    } else {
        f64::INFINITY
    }
}

fn inflation(r_squared: f64) -> f64 {
    if r_squared < 1.0 - 1e-15 {
        1.0 / (1.0 - r_squared)
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X1: [f64; 8] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    const X2: [f64; 8] = [2.0, 1.0, 3.0, 2.0, 4.0, 3.0, 5.0, 4.0];
    const Y: [f64; 8] = [5.1, 5.0, 9.2, 8.9, 13.1, 12.0, 17.2, 15.9];

    #[test]
    fn noiseless_response() {
        let y: Vec<f64> = X1
            .iter()
            .zip(&X2)
            .map(|(&a, &b)| 1.0 + 2.0 * a + 3.0 * b)
            .collect();
        let r = multiple_regression(&X1, &X2, &y).expect("should compute");
        assert!((r.coefficients.intercept - 1.0).abs() < 1e-9);
        assert!((r.coefficients.x1 - 2.0).abs() < 1e-9);
        assert!((r.coefficients.x2 - 3.0).abs() < 1e-9);
        assert!((r.r_squared - 1.0).abs() < 1e-10);
        assert!(r.residuals.iter().all(|e| e.abs() < 1e-9));
    }

    #[test]
    fn reference_values() {
        let r = multiple_regression(&X1, &X2, &Y).expect("should compute");
        assert!((r.coefficients.intercept - 0.95).abs() < 1e-9);
        assert!((r.coefficients.x1 - 1.033_333_333_333_333).abs() < 1e-9);
        assert!((r.coefficients.x2 - 1.733_333_333_333_333).abs() < 1e-9);
        assert!((r.r_squared - 0.995_753_424_657_534_2).abs() < 1e-10);
        assert!((r.adj_r_squared - 0.994_054_794_520_547_9).abs() < 1e-10);
        assert!((r.f_stat - 586.209_677_419_354_8).abs() < 1e-6);
        assert!((r.f_p_value - 1.175_160_226_567_775_8e-6).abs() < 1e-10);

        assert!((r.std_errors.intercept - 0.329_393_381_840_012_1).abs() < 1e-9);
        assert!((r.std_errors.x1 - 0.090_921_211_313_239_04).abs() < 1e-9);
        assert!((r.std_errors.x2 - 0.170_098_010_962_307_65).abs() < 1e-9);
        assert!((r.t_stats.intercept - 2.884_089_518_414_852).abs() < 1e-7);
        assert!((r.t_stats.x1 - 11.365_151_414_154_88).abs() < 1e-7);
        assert!((r.t_stats.x2 - 10.190_203_421_705_067).abs() < 1e-7);
        assert!((r.t_p_values.intercept - 0.034_423_354_322_789_18).abs() < 1e-7);
        assert!((r.t_p_values.x1 - 9.227_025_165_405_316e-5).abs() < 1e-8);
        assert!((r.t_p_values.x2 - 1.561_678_119_796_342e-4).abs() < 1e-8);

        assert!((r.vif.x1 - 2.8).abs() < 1e-9);
        assert!((r.vif.x2 - 2.8).abs() < 1e-9);
    }

    #[test]
    fn residuals_sum_to_zero() {
        let r = multiple_regression(&X1, &X2, &Y).expect("should compute");
        let sum: f64 = r.residuals.iter().sum();
        assert!(sum.abs() < 1e-9, "residuals sum = {sum}");
        for ((yi, fi), ei) in Y.iter().zip(&r.fitted).zip(&r.residuals) {
            assert!((yi - fi - ei).abs() < 1e-12);
        }
    }

    #[test]
    fn prediction_uses_coefficients() {
        let r = multiple_regression(&X1, &X2, &Y).expect("should compute");
        let expected = 0.95 + 1.033_333_333_333_333 * 9.0 + 1.733_333_333_333_333 * 6.0;
        assert!((r.predict(9.0, 6.0) - expected).abs() < 1e-8);
        assert!((r.predict(X1[0], X2[0]) - r.fitted[0]).abs() < 1e-12);
    }

    #[test]
    fn independent_predictors_have_unit_vif() {
        let x1 = [1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0];
        let x2 = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let y = [3.0, 1.2, 0.9, -1.1, 3.2, 0.8, 1.1, -0.9];
        let r = multiple_regression(&x1, &x2, &y).expect("should compute");
        assert!((r.vif.x1 - 1.0).abs() < 1e-12);
        assert!((r.vif.x2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_predictors_are_singular() {
        let x2: Vec<f64> = X1.iter().map(|&a| 2.0 * a + 1.0).collect();
        assert_eq!(
            multiple_regression(&X1, &x2, &Y),
            Err(StatsError::SingularMatrix)
        );
        let constant = [3.0; 8];
        assert_eq!(
            multiple_regression(&X1, &constant, &Y),
            Err(StatsError::SingularMatrix)
        );
    }

    #[test]
    fn offset_predictor_is_not_singular() {
        let shifted: Vec<f64> = (0..10).map(f64::from).collect();
        let offset: Vec<f64> = shifted.iter().map(|&a| 1e7 + a).collect();
        let x2 = [2.0, 1.0, 3.0, 2.0, 4.0, 3.0, 5.0, 4.0, 6.0, 5.0];
        let y = [7.1, 5.9, 14.1, 12.9, 21.1, 19.9, 28.1, 26.9, 35.1, 33.9];

        let near = multiple_regression(&shifted, &x2, &y).expect("should compute");
        let far = multiple_regression(&offset, &x2, &y).expect("offset is not collinearity");

        assert!((far.coefficients.x1 - 1.933_333_333_333_333_3).abs() < 1e-9);
        assert!((far.coefficients.x2 - 3.133_333_333_333_333_3).abs() < 1e-9);
        assert!((far.coefficients.intercept + 19_333_332.5).abs() < 1e-4);
        assert!((near.coefficients.intercept - 0.833_333_333_333_333_4).abs() < 1e-9);

        assert!((far.r_squared - near.r_squared).abs() < 1e-12);
        assert!((far.std_errors.x1 - near.std_errors.x1).abs() < 1e-12);
        assert!((far.std_errors.x2 - near.std_errors.x2).abs() < 1e-12);
        assert!((far.t_p_values.x2 - near.t_p_values.x2).abs() < 1e-12);
        for (a, b) in far.fitted.iter().zip(&near.fitted) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn edge_cases() {
        assert!(matches!(
            multiple_regression(&[1.0, 2.0, 3.0], &[1.0, 0.0, 2.0], &[1.0, 2.0, 4.0]),
            Err(StatsError::TooFewObservations { needed: 4, .. })
        ));
        assert!(matches!(
            multiple_regression(&X1, &X2[..7], &Y),
            Err(StatsError::LengthMismatch { .. })
        ));
        assert_eq!(
            multiple_regression(&X1, &X2, &[2.0; 8]),
            Err(StatsError::ZeroVariance { variable: "y" })
        );
    }
}
