//! Significance tests and residual diagnostics for a simple regression.

use serde::{Deserialize, Serialize};

use super::simple::RegressionResult;
use crate::config::FitConfig;
use crate::correlation::correlation_t_test;
use crate::error::{check_alpha, check_paired, Result, StatsError};
use crate::series::{EmpiricalSeries, Series};
use crate::special;
use crate::testing::{one_sample_t_test, TestResult};

/// Residual mean below this magnitude counts as zero when the t-test is
/// undefined (constant residuals).
const ZERO_MEAN_TOLERANCE: f64 = 1e-6;

/// t-tests of H₀: k = 0 and H₀: b = 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTests {
    /// Test of the slope.
    pub slope: TestResult,
    /// Standard error of the slope, √(MSE / Sxx).
    pub slope_se: f64,
    /// Test of the intercept.
    pub intercept: TestResult,
    /// Standard error of the intercept, √(MSE·Σx² / (n·Sxx)).
    pub intercept_se: f64,
}

/// Overall F-test of the regression model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelFTest {
    /// F = SSR / (SSE / (n-2)).
    pub f_statistic: f64,
    /// Upper-tail probability of F(1, n-2).
    pub p_value: f64,
    /// Model degrees of freedom (1).
    pub df_model: f64,
    /// Residual degrees of freedom, n-2.
    pub df_residual: f64,
    /// Regression sum of squares Σ(ŷᵢ - ȳ)².
    pub ssr: f64,
    /// Residual sum of squares Σeᵢ².
    pub sse: f64,
}

/// Gauss–Markov checks on the residuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualDiagnostics {
    /// Mean residual.
    pub mean: f64,
    /// One-sample t-test of H₀: E[e] = 0; `None` for constant residuals.
    pub zero_mean_test: Option<TestResult>,
    /// Whether a zero residual mean is plausible.
    pub zero_mean: bool,
    /// Residual skewness; `None` for constant residuals.
    pub skewness: Option<f64>,
    /// Residual excess kurtosis; `None` for constant residuals.
    pub kurtosis: Option<f64>,
    /// Durbin–Watson statistic; `None` if all residuals are 0.
    pub durbin_watson: Option<f64>,
}

/// All diagnostics of a simple regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionDiagnostics {
    /// Coefficient t-tests.
    pub coefficients: CoefficientTests,
    /// Model F-test.
    pub model: ModelFTest,
    /// t-test of the correlation coefficient.
    pub correlation: TestResult,
    /// Residual checks.
    pub residuals: ResidualDiagnostics,
}

fn t_test(estimate: f64, se: f64, df: f64) -> TestResult {
    let statistic = if se > 1e-300 {
        estimate / se
    } else {
        f64::INFINITY
    };
    TestResult {
        statistic,
        df,
        p_value: special::t_two_sided_p(statistic, df),
    }
}

fn residual_mse(result: &RegressionResult) -> f64 {
    let sse: f64 = result.residuals.iter().map(|e| e * e).sum();
    sse / (result.n as f64 - 2.0)
}

/// t-tests of the slope and the intercept.
///
/// # Algorithm
///
/// MSE = Σeᵢ² / (n-2).
/// SE(k) = √(MSE / Sxx), SE(b) = √(MSE·Σxᵢ² / (n·Sxx)).
/// t = estimate / SE with n-2 df.
///
/// # Errors
///
/// [`StatsError::LengthMismatch`] if `x` is not the regression's input.
pub fn coefficient_tests(x: &[f64], result: &RegressionResult) -> Result<CoefficientTests> {
    check_same_size(x, result)?;
    let n = result.n as f64;
    let df = n - 2.0;
    let mse = residual_mse(result);

    let x_mean = x.iter().sum::<f64>() / n;
    let sxx: f64 = x.iter().map(|&xi| (xi - x_mean).powi(2)).sum();
    let sum_x2: f64 = x.iter().map(|&xi| xi * xi).sum();

    let slope_se = (mse / sxx).sqrt();
    let intercept_se = (mse * sum_x2 / (n * sxx)).sqrt();

    Ok(CoefficientTests {
        slope: t_test(result.slope, slope_se, df),
        slope_se,
        intercept: t_test(result.intercept, intercept_se, df),
        intercept_se,
    })
}

/// F-test of the whole model.
///
/// # Algorithm
///
/// F = (SSR / 1) / (SSE / (n-2)), p = 1 - F_{1,n-2}(F). A perfect fit has
/// F = ∞ and p = 0.
///
/// # Errors
///
/// [`StatsError::LengthMismatch`] if `y` is not the regression's input.
pub fn model_f_test(y: &[f64], result: &RegressionResult) -> Result<ModelFTest> {
    check_same_size(y, result)?;
    let n = result.n as f64;
    let df_residual = n - 2.0;
    let y_mean = y.iter().sum::<f64>() / n;

    let ssr: f64 = result.fitted.iter().map(|&f| (f - y_mean).powi(2)).sum();
    let sse: f64 = result.residuals.iter().map(|e| e * e).sum();
    let mse = sse / df_residual;

    let (f_statistic, p_value) = if mse > 1e-300 {
        let f = ssr / mse;
        let p = (1.0 - special::f_distribution_cdf(f, 1.0, df_residual)).clamp(0.0, 1.0);
        (f, p)
    } else {
        (f64::INFINITY, 0.0)
    };

    Ok(ModelFTest {
        f_statistic,
        p_value,
        df_model: 1.0,
        df_residual,
        ssr,
        sse,
    })
}

/// Gauss–Markov checks on residuals given in observation order.
///
/// # Algorithm
///
/// - Zero mean: a one-sample t-test of H₀: E[e] = 0, accepted when
///   `p ≥ significance`. For constant residuals the t-test is undefined and
///   |ē| < 10⁻⁶ decides instead.
/// - Shape: skewness and excess kurtosis of the residual sample.
/// - Autocorrelation: Durbin–Watson d = Σ(eᵢ - eᵢ₋₁)² / Σeᵢ². Values near 2
///   indicate no first-order autocorrelation.
///
/// # Errors
///
/// - [`StatsError::EmptyInput`] / [`StatsError::NonFinite`] for invalid
///   residuals.
/// - [`StatsError::InvalidArgument`] unless `0 < significance < 1`.
///
/// # References
///
/// Durbin & Watson (1950). "Testing for serial correlation in least squares
/// regression. I". Biometrika, 37(3–4), 409–428.
pub fn residual_diagnostics(residuals: &[f64], significance: f64) -> Result<ResidualDiagnostics> {
    check_alpha(significance)?;
    let series = EmpiricalSeries::new(residuals)?;
    let mean = series.mean();

    let zero_mean_test = one_sample_t_test(residuals, 0.0);
    let zero_mean = match zero_mean_test {
        Some(t) => t.p_value >= significance,
        None => mean.abs() < ZERO_MEAN_TOLERANCE,
    };

    let sse: f64 = residuals.iter().map(|e| e * e).sum();
    let durbin_watson = (sse > 1e-300).then(|| {
        let diff: f64 = residuals.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
        diff / sse
    });

    Ok(ResidualDiagnostics {
        mean,
        zero_mean_test,
        zero_mean,
        skewness: series.skewness(),
        kurtosis: series.kurtosis(),
        durbin_watson,
    })
}

/// Coefficient, model, correlation and residual diagnostics in one pass.
///
/// # Errors
///
/// - [`StatsError::LengthMismatch`] if `x` or `y` is not the regression's
///   input.
/// - An invalid `config`.
///
/// # Examples
///
/// ```
/// use u_distfit::config::FitConfig;
/// use u_distfit::regression::{linear_regression, regression_diagnostics};
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.1, 3.9, 6.1, 7.9, 10.1];
/// let fit = linear_regression(&x, &y).unwrap();
/// let d = regression_diagnostics(&x, &y, &fit, &FitConfig::default()).unwrap();
/// assert!(d.coefficients.slope.p_value < 0.001);
/// assert!(d.coefficients.intercept.p_value > 0.5);
/// assert!(d.residuals.zero_mean);
/// ```
pub fn regression_diagnostics(
    x: &[f64],
    y: &[f64],
    result: &RegressionResult,
    config: &FitConfig,
) -> Result<RegressionDiagnostics> {
    config.validate()?;
    check_paired(x, y)?;
    Ok(RegressionDiagnostics {
        coefficients: coefficient_tests(x, result)?,
        model: model_f_test(y, result)?,
        correlation: correlation_t_test(result.correlation, result.n),
        residuals: residual_diagnostics(&result.residuals, config.significance)?,
    })
}

fn check_same_size(data: &[f64], result: &RegressionResult) -> Result<()> {
    if data.len() != result.n || result.residuals.len() != result.n {
        return Err(StatsError::LengthMismatch {
            left: data.len(),
            right: result.n,
        });
    }
    Ok(())
}
