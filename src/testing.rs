//! Hypothesis testing and interval estimation.
//!
//! Two groups of tests:
//!
//! - Raw-slice t-tests: [`one_sample_t_test`], [`pooled_t_test`] and
//!   [`split_t_test`], which compares the two halves of a sample
//!   ([`split_series_t_test`] does the same for a series).
//! - Tests parameterized by a fitted distribution: [`test_mean`] and
//!   [`test_variance`] take the mean and σ from
//!   [`Characteristics::standard_metrics`] and build two-sided confidence
//!   intervals at `config.significance`.
//!
//! # Examples
//!
//! ```
//! use u_distfit::testing::one_sample_t_test;
//!
//! let data = [5.1, 4.9, 5.2, 5.0, 4.8, 5.3, 5.1, 4.9];
//! let result = one_sample_t_test(&data, 5.0).unwrap();
//! assert!(result.p_value > 0.05); // cannot reject H₀: μ = 5.0
//! ```

use serde::{Deserialize, Serialize};
use u_numflow::stats;

use crate::config::FitConfig;
use crate::distribution::Characteristics;
use crate::error::{Result, StatsError};
use crate::series::Series;
use crate::special;

/// Result of a t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// t statistic.
    pub statistic: f64,
    /// Degrees of freedom.
    pub df: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
}

// ---------------------------------------------------------------------------
// t-tests
// ---------------------------------------------------------------------------

/// One-sample t-test: H₀: μ = μ₀.
///
/// # Algorithm
///
/// t = (x̄ - μ₀) / (s / √n), df = n-1.
///
/// # Returns
///
/// `None` if fewer than 2 observations, non-finite values, or zero variance.
///
/// # Examples
///
/// ```
/// use u_distfit::testing::one_sample_t_test;
///
/// let data = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let r = one_sample_t_test(&data, 6.0).unwrap();
/// assert!(r.p_value > 0.5); // mean is 6.0
/// ```
pub fn one_sample_t_test(data: &[f64], mu0: f64) -> Option<TestResult> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    if data.iter().any(|v| !v.is_finite()) || !mu0.is_finite() {
        return None;
    }

    let mean = stats::mean(data)?;
    let sd = stats::std_dev(data)?;

    if sd < 1e-300 {
        return None;
    }

    let t = (mean - mu0) / (sd / (n as f64).sqrt());
    let df = (n - 1) as f64;

    Some(TestResult {
        statistic: t,
        df,
        p_value: special::t_two_sided_p(t, df),
    })
}

/// Result of a pooled two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PooledTestResult {
    /// t statistic, df and two-tailed p-value.
    pub test: TestResult,
    /// Mean of the first sample.
    pub mean_first: f64,
    /// Mean of the second sample.
    pub mean_second: f64,
    /// Pooled standard deviation sₚ.
    pub pooled_sd: f64,
}

/// Two-sample Student t-test assuming equal variances: H₀: μ₁ = μ₂.
///
/// # Algorithm
///
/// sₚ² = ((n₁-1)s₁² + (n₂-1)s₂²) / (n₁+n₂-2)
/// t = (x̄₁ - x̄₂) / (sₚ √(1/n₁ + 1/n₂)), df = n₁+n₂-2.
///
/// # Returns
///
/// `None` if either sample has fewer than 2 observations, contains
/// non-finite values, or both samples are constant.
///
/// # Examples
///
/// ```
/// use u_distfit::testing::pooled_t_test;
///
/// let a = [5.1, 4.9, 5.2, 5.0, 4.8];
/// let b = [7.1, 6.9, 7.2, 7.0, 6.8];
/// let r = pooled_t_test(&a, &b).unwrap();
/// assert_eq!(r.test.df, 8.0);
/// assert!(r.test.p_value < 0.01);
/// ```
pub fn pooled_t_test(a: &[f64], b: &[f64]) -> Option<PooledTestResult> {
    let n1 = a.len();
    let n2 = b.len();
    if n1 < 2 || n2 < 2 {
        return None;
    }
    if a.iter().chain(b).any(|v| !v.is_finite()) {
        return None;
    }

    let mean1 = stats::mean(a)?;
    let mean2 = stats::mean(b)?;
    let var1 = stats::variance(a)?;
    let var2 = stats::variance(b)?;

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let df = n1f + n2f - 2.0;

    let pooled_var = ((n1f - 1.0) * var1 + (n2f - 1.0) * var2) / df;
    let se = (pooled_var * (1.0 / n1f + 1.0 / n2f)).sqrt();
    if se < 1e-300 {
        return None;
    }

    let t = (mean1 - mean2) / se;

    Some(PooledTestResult {
        test: TestResult {
            statistic: t,
            df,
            p_value: special::t_two_sided_p(t, df),
        },
        mean_first: mean1,
        mean_second: mean2,
        pooled_sd: pooled_var.sqrt(),
    })
}

/// Splits a sample at `n / 2` in its given order.
///
/// The second half takes the extra observation when `n` is odd.
pub fn split_halves(data: &[f64]) -> (&[f64], &[f64]) {
    data.split_at(data.len() / 2)
}

/// Pooled t-test between the two halves of a sample.
///
/// Tests whether the sample is homogeneous in time: a significant result
/// means the level shifted between the first and second half.
///
/// # Returns
///
/// `None` under the conditions of [`pooled_t_test`], which in particular
/// needs at least 4 observations.
pub fn split_t_test(data: &[f64]) -> Option<PooledTestResult> {
    let (first, second) = split_halves(data);
    pooled_t_test(first, second)
}

/// [`split_t_test`] on a series, split in the order the observations were
/// given rather than the sorted order the series keeps.
///
/// # Examples
///
/// ```
/// use u_distfit::series::EmpiricalSeries;
/// use u_distfit::testing::{split_series_t_test, split_t_test};
///
/// let data = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
/// let series = EmpiricalSeries::new(&data).unwrap();
/// assert_eq!(split_series_t_test(&series), split_t_test(&data));
/// ```
pub fn split_series_t_test<S: Series + ?Sized>(series: &S) -> Option<PooledTestResult> {
    split_t_test(series.raw_data())
}

// ---------------------------------------------------------------------------
// Distribution-parameterized tests
// ---------------------------------------------------------------------------

/// Outcome of a mean or variance test with its confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceResult {
    /// z for the mean test, χ² for the variance test.
    pub statistic: f64,
    /// Two-sided critical value of the mean test.
    pub critical_value: Option<f64>,
    /// Whether H₀ is rejected at `config.significance`.
    pub reject: bool,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Confidence interval for the mean or the variance.
    pub interval: (f64, f64),
}

fn checked_metrics(chars: &Characteristics, config: &FitConfig) -> Result<(f64, f64, usize)> {
    config.validate()?;
    let n = chars.n();
    if n < 2 {
        return Err(StatsError::TooFewObservations {
            needed: 2,
            actual: n,
        });
    }
    let metrics = chars.standard_metrics();
    if metrics.sigma.is_nan() || metrics.sigma <= 0.0 || metrics.sigma.is_infinite() {
        return Err(StatsError::ZeroVariance {
            variable: "distribution",
        });
    }
    Ok((metrics.mean, metrics.sigma, n))
}

/// Test of H₀: μ = μ₀ with the mean and σ of a fitted distribution.
///
/// # Algorithm
///
/// z = (x̄ - μ₀) / (σ/√n). For `n ≤ config.small_sample_threshold` the
/// critical value and p-value come from Student's t with n-1 df, otherwise
/// from the standard normal. H₀ is rejected when |z| exceeds the critical
/// value; the interval is x̄ ± critical · σ/√n.
///
/// # Errors
///
/// - [`StatsError::TooFewObservations`] if the fit came from fewer than 2
///   observations.
/// - [`StatsError::ZeroVariance`] if the fitted σ is 0.
/// - [`StatsError::InvalidArgument`] for a non-finite μ₀ or an invalid
///   `config`.
///
/// # Examples
///
/// ```
/// use u_distfit::config::FitConfig;
/// use u_distfit::distribution::DistributionKind;
/// use u_distfit::series::EmpiricalSeries;
/// use u_distfit::testing::test_mean;
///
/// let s = EmpiricalSeries::new(&[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
/// let config = FitConfig::default();
/// let chars = DistributionKind::Normal.fit(&s, &config).unwrap();
/// let r = test_mean(6.0, &chars, &config).unwrap();
/// assert!(!r.reject);
/// assert!(r.interval.0 < 6.0 && 6.0 < r.interval.1);
/// ```
pub fn test_mean(
    mu0: f64,
    chars: &Characteristics,
    config: &FitConfig,
) -> Result<ConfidenceResult> {
    if !mu0.is_finite() {
        return Err(StatsError::InvalidArgument(format!(
            "hypothesized mean must be finite, got {mu0}"
        )));
    }
    let (mean, sigma, n) = checked_metrics(chars, config)?;
    let alpha = config.significance;

    let standard_error = sigma / (n as f64).sqrt();
    let z = (mean - mu0) / standard_error;

    let (critical, p_value) = if n <= config.small_sample_threshold {
        let df = (n - 1) as f64;
        (
            special::t_distribution_quantile(1.0 - alpha / 2.0, df),
            special::t_two_sided_p(z, df),
        )
    } else {
        (
            special::inverse_normal_cdf(1.0 - alpha / 2.0),
            (2.0 * special::standard_normal_sf(z.abs())).clamp(0.0, 1.0),
        )
    };

    let margin = critical * standard_error;
    Ok(ConfidenceResult {
        statistic: z,
        critical_value: Some(critical),
        reject: z.abs() > critical,
        p_value,
        interval: (mean - margin, mean + margin),
    })
}

/// Test of H₀: σ = σ₀ with the σ of a fitted distribution.
///
/// # Algorithm
///
/// χ² = (n-1)s²/σ₀² with df = n-1. H₀ is rejected when χ² falls outside
/// `[χ²(α/2), χ²(1-α/2)]`; p = 2·min(F(χ²), 1-F(χ²)). The variance interval
/// is `[(n-1)s²/χ²(1-α/2), (n-1)s²/χ²(α/2)]`.
///
/// # Errors
///
/// As [`test_mean`]; also [`StatsError::InvalidArgument`] unless σ₀ is
/// positive and finite.
pub fn test_variance(
    sigma0: f64,
    chars: &Characteristics,
    config: &FitConfig,
) -> Result<ConfidenceResult> {
    if sigma0.is_nan() || sigma0 <= 0.0 || sigma0.is_infinite() {
        return Err(StatsError::InvalidArgument(format!(
            "hypothesized sigma must be positive and finite, got {sigma0}"
        )));
    }
    let (_, sigma, n) = checked_metrics(chars, config)?;
    let alpha = config.significance;
    let df = (n - 1) as f64;

    let scaled_variance = df * sigma * sigma;
    let chi_squared = scaled_variance / (sigma0 * sigma0);
    let left = special::chi_squared_quantile(alpha / 2.0, df);
    let right = special::chi_squared_quantile(1.0 - alpha / 2.0, df);

    let lower_tail = special::chi_squared_cdf(chi_squared, df);
    let p_value = (2.0 * lower_tail.min(1.0 - lower_tail)).clamp(0.0, 1.0);

    Ok(ConfidenceResult {
        statistic: chi_squared,
        critical_value: None,
        reject: chi_squared < left || chi_squared > right,
        p_value,
        interval: (scaled_variance / right, scaled_variance / left),
    })
}
