//! One-sample Kolmogorov–Smirnov test.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::distribution::Characteristics;
use crate::series::Series;

/// Outcome of a Kolmogorov–Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KsResult {
    /// D = max(D⁺, D⁻), in [0, 1].
    pub statistic: f64,
    /// D⁺ = max((i + 1)/n − F(xᵢ)).
    pub d_plus: f64,
    /// D⁻ = max(F(xᵢ) − i/n).
    pub d_minus: f64,
    /// λ = D·√n.
    pub lambda: f64,
    /// Asymptotic p-value Q_KS(λ).
    pub p_value: f64,
}

/// Largest `f64` strictly below 1.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Asymptotic Kolmogorov p-value Q_KS(λ) = P(K > λ).
///
/// # Algorithm
///
/// For λ ≥ 0.2 the alternating series
/// `Q = 2 Σ_{k=1}^{50} (−1)^{k+1} exp(−2k²λ²)`.
/// Below that the series converges too slowly to truncate, and the
/// equivalent theta-function form is used instead:
/// `K(λ) = √(2π)/λ · Σ_{k≥1} exp(−(2k−1)²π² / (8λ²))`, `Q = 1 − K`.
///
/// λ = 0 gives exactly 1; any λ > 0 gives a value strictly below 1.
///
/// # References
///
/// Kolmogorov (1933). "Sulla determinazione empirica di una legge di
/// distribuzione". *Giornale dell'Istituto Italiano degli Attuari*, 4, 83–91.
///
/// # Examples
///
/// ```
/// use u_distfit::goodness::kolmogorov_p_value;
/// assert_eq!(kolmogorov_p_value(0.0), 1.0);
/// // Classical 5% critical value
/// assert!((kolmogorov_p_value(1.358) - 0.05).abs() < 1e-3);
/// ```
pub fn kolmogorov_p_value(lambda: f64) -> f64 {
    if lambda.is_nan() {
        return f64::NAN;
    }
    if lambda <= 0.0 {
        return 1.0;
    }

    let p = if lambda < 0.2 {
        let l2 = lambda * lambda;
        let mut sum = 0.0;
        for k in 1..=20 {
            let odd = (2 * k - 1) as f64;
            let term = (-odd * odd * PI * PI / (8.0 * l2)).exp();
            sum += term;
            if term < 1e-300 {
                break;
            }
        }
        1.0 - (2.0 * PI).sqrt() / lambda * sum
    } else {
        let mut sum = 0.0;
        for k in 1..=50 {
            let kf = k as f64;
            let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
            sum += sign * (-2.0 * kf * kf * lambda * lambda).exp();
        }
        2.0 * sum
    };
    p.clamp(0.0, BELOW_ONE)
}

/// D⁺ and D⁻ of ascending `sorted` data against `cdf`.
pub fn ks_statistics(sorted: &[f64], cdf: impl Fn(f64) -> f64) -> (f64, f64) {
    let n = sorted.len() as f64;
    let mut d_plus = 0.0_f64;
    let mut d_minus = 0.0_f64;
    for (i, &x) in sorted.iter().enumerate() {
        let f = cdf(x);
        d_plus = d_plus.max((i + 1) as f64 / n - f);
        d_minus = d_minus.max(f - i as f64 / n);
    }
    (d_plus, d_minus)
}

/// Kolmogorov–Smirnov test of a fitted distribution against a series.
///
/// # Algorithm
///
/// D⁺ and D⁻ over the sorted sample, `D = max(D⁺, D⁻)`, `λ = D·√n`, and the
/// p-value from [`kolmogorov_p_value`]. For discrete families the test is
/// conservative, since the fitted cdf is a step function.
///
/// # Examples
///
/// ```
/// use u_distfit::config::FitConfig;
/// use u_distfit::distribution::DistributionKind;
/// use u_distfit::goodness::ks_test;
/// use u_distfit::series::EmpiricalSeries;
///
/// let data: Vec<f64> = (0..50).map(|i| (f64::from(i) + 0.5) / 50.0).collect();
/// let s = EmpiricalSeries::new(&data).unwrap();
/// let chars = DistributionKind::Uniform.fit(&s, &FitConfig::default()).unwrap();
/// let r = ks_test(&s, &chars);
/// assert!(r.statistic < 0.05);
/// assert!(r.p_value > 0.9);
/// ```
pub fn ks_test(series: &dyn Series, chars: &Characteristics) -> KsResult {
    let (d_plus, d_minus) = ks_statistics(series.data(), |x| chars.cdf(x));
    let statistic = d_plus.max(d_minus).clamp(0.0, 1.0);
    let lambda = statistic * (series.n() as f64).sqrt();
    KsResult {
        statistic,
        d_plus,
        d_minus,
        lambda,
        p_value: kolmogorov_p_value(lambda),
    }
}
