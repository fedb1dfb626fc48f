//! Discrete families: binomial, poisson, geometric.
//!
//! Probability mass is zero off the non-negative integers; the cdf is a step
//! function evaluated at `⌊x⌋`.

use serde::{Deserialize, Serialize};
use statrs::function::{beta, gamma};

use super::{invalid, is_count, DistributionKind, StandardMetrics, TheoreticalDistribution};
use crate::config::{FitConfig, TrialCount};
use crate::error::Result;
use crate::series::Series;
use crate::special;

// ---------------------------------------------------------------------------
// Binomial
// ---------------------------------------------------------------------------

/// Binomial distribution B(m, p): successes in `m` Bernoulli trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Binomial {
    trials: u64,
    p: f64,
}

impl Binomial {
    /// Creates B(m, p). Requires m ≥ 1 and p ∈ [0, 1].
    pub fn new(trials: u64, p: f64) -> Result<Self> {
        if trials == 0 {
            return Err(invalid(
                DistributionKind::Binomial,
                "trial count must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(invalid(
                DistributionKind::Binomial,
                format!("p must be in [0, 1], got {p}"),
            ));
        }
        Ok(Self { trials, p })
    }

    /// Trial count m.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Success probability p.
    pub fn p(&self) -> f64 {
        self.p
    }

    fn npq(&self) -> f64 {
        self.trials as f64 * self.p * (1.0 - self.p)
    }
}

impl TheoreticalDistribution for Binomial {
    /// p = x̄ / m, with m taken from [`FitConfig::binomial_trials`].
    fn fit(series: &dyn Series, config: &FitConfig) -> Result<Self> {
        let trials = match config.binomial_trials {
            TrialCount::SampleSize => series.n() as u64,
            TrialCount::ObservedMax => {
                let max = series.max();
                if max < 1.0 {
                    return Err(invalid(
                        DistributionKind::Binomial,
                        format!("largest observation must be at least 1, got {max}"),
                    ));
                }
                max.ceil() as u64
            }
            TrialCount::Fixed(m) => m,
        };
        if trials == 0 {
            return Err(invalid(
                DistributionKind::Binomial,
                "trial count must be at least 1",
            ));
        }
        Binomial::new(trials, series.mean() / trials as f64)
    }

    fn kind(&self) -> DistributionKind {
        DistributionKind::Binomial
    }

    fn pdf(&self, x: f64) -> f64 {
        let m = self.trials as f64;
        if !is_count(x) || x > m {
            return 0.0;
        }
        if self.p == 0.0 {
            return if x == 0.0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if x == m { 1.0 } else { 0.0 };
        }
        let k = x as u64;
        (special::ln_binomial(self.trials, k) + x * self.p.ln() + (m - x) * (-self.p).ln_1p()).exp()
    }

    /// P(X ≤ k) = I₁₋ₚ(m − k, k + 1) with k = ⌊x⌋.
    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        let k = x.floor();
        let m = self.trials as f64;
        if k >= m || self.p == 0.0 {
            return 1.0;
        }
        if self.p == 1.0 {
            return 0.0;
        }
        beta::checked_beta_reg(m - k, k + 1.0, 1.0 - self.p).map_or(f64::NAN, |v| v.clamp(0.0, 1.0))
    }

    fn skewness(&self) -> f64 {
        (1.0 - 2.0 * self.p) / self.npq().sqrt()
    }

    fn kurtosis(&self) -> f64 {
        (1.0 - 6.0 * self.p * (1.0 - self.p)) / self.npq()
    }

    fn standard_metrics(&self) -> StandardMetrics {
        StandardMetrics::from_mean_variance(self.trials as f64 * self.p, self.npq())
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("trials", self.trials as f64), ("p", self.p)]
    }

    /// Only p is estimated; the trial count comes from configuration.
    fn estimated_parameters(&self) -> usize {
        1
    }
}

// ---------------------------------------------------------------------------
// Poisson
// ---------------------------------------------------------------------------

/// Poisson distribution P(λ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Poisson {
    lambda: f64,
}

impl Poisson {
    /// Creates P(λ). Requires λ > 0.
    pub fn new(lambda: f64) -> Result<Self> {
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(invalid(
                DistributionKind::Poisson,
                "lambda must be positive",
            ));
        }
        Ok(Self { lambda })
    }

    /// Rate λ.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl TheoreticalDistribution for Poisson {
    /// λ = x̄.
    fn fit(series: &dyn Series, _config: &FitConfig) -> Result<Self> {
        Poisson::new(series.mean())
    }

    fn kind(&self) -> DistributionKind {
        DistributionKind::Poisson
    }

    fn pdf(&self, x: f64) -> f64 {
        if !is_count(x) {
            return 0.0;
        }
        (x * self.lambda.ln() - self.lambda - special::ln_factorial(x as u64)).exp()
    }

    /// P(X ≤ k) = Q(k + 1, λ), the regularized upper incomplete gamma.
    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        gamma::checked_gamma_ur(x.floor() + 1.0, self.lambda)
            .map_or(f64::NAN, |v| v.clamp(0.0, 1.0))
    }

    fn skewness(&self) -> f64 {
        1.0 / self.lambda.sqrt()
    }

    fn kurtosis(&self) -> f64 {
        1.0 / self.lambda
    }

    fn standard_metrics(&self) -> StandardMetrics {
        StandardMetrics::from_mean_variance(self.lambda, self.lambda)
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("lambda", self.lambda)]
    }

    fn estimated_parameters(&self) -> usize {
        1
    }
}

// ---------------------------------------------------------------------------
// Geometric
// ---------------------------------------------------------------------------

/// Geometric distribution G(p): failures before the first success, on
/// {0, 1, 2, …}.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometric {
    p: f64,
}

impl Geometric {
    /// Creates G(p). Requires p ∈ (0, 1].
    pub fn new(p: f64) -> Result<Self> {
        if !(p > 0.0 && p <= 1.0) {
            return Err(invalid(
                DistributionKind::Geometric,
                format!("p must be in (0, 1], got {p}"),
            ));
        }
        Ok(Self { p })
    }

    /// Success probability p.
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl TheoreticalDistribution for Geometric {
    /// p = 1 / (1 + x̄), so that the fitted mean (1 − p)/p equals x̄.
    fn fit(series: &dyn Series, _config: &FitConfig) -> Result<Self> {
        let mean = series.mean();
        if mean < 0.0 {
            return Err(invalid(
                DistributionKind::Geometric,
                format!("sample mean must be non-negative, got {mean}"),
            ));
        }
        Geometric::new(1.0 / (1.0 + mean))
    }

    fn kind(&self) -> DistributionKind {
        DistributionKind::Geometric
    }

    fn pdf(&self, x: f64) -> f64 {
        if !is_count(x) {
            return 0.0;
        }
        self.p * (1.0 - self.p).powf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        1.0 - (1.0 - self.p).powf(x.floor() + 1.0)
    }

    fn skewness(&self) -> f64 {
        (2.0 - self.p) / (1.0 - self.p).sqrt()
    }

    fn kurtosis(&self) -> f64 {
        6.0 + self.p * self.p / (1.0 - self.p)
    }

    fn standard_metrics(&self) -> StandardMetrics {
        let q = 1.0 - self.p;
        StandardMetrics::from_mean_variance(q / self.p, q / (self.p * self.p))
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("p", self.p)]
    }

    fn estimated_parameters(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::EmpiricalSeries;

    fn counts() -> EmpiricalSeries {
        EmpiricalSeries::new(&[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 4.0])
            .expect("should build")
    }

    #[test]
    fn binomial_pmf_sums_to_one() {
        let d = Binomial::new(10, 0.3).expect("valid");
        let total: f64 = (0..=10).map(|k| d.pdf(f64::from(k))).sum();
        assert!((total - 1.0).abs() < 1e-12);
        // C(10,3)·0.3³·0.7⁷
        assert!((d.pdf(3.0) - 0.266_827_932).abs() < 1e-8);
        assert_eq!(d.pdf(2.5), 0.0);
        assert_eq!(d.pdf(11.0), 0.0);
    }

    #[test]
    fn binomial_cdf_matches_pmf_sum() {
        let d = Binomial::new(12, 0.4).expect("valid");
        let mut running = 0.0;
        for k in 0..=12 {
            running += d.pdf(f64::from(k));
            assert!((d.cdf(f64::from(k)) - running).abs() < 1e-10, "k = {k}");
            assert!((d.cdf(f64::from(k) + 0.5) - running).abs() < 1e-10);
        }
        assert_eq!(d.cdf(-0.5), 0.0);
    }

    #[test]
    fn binomial_degenerate_p() {
        let zero = Binomial::new(5, 0.0).expect("valid");
        assert_eq!(zero.pdf(0.0), 1.0);
        assert_eq!(zero.cdf(0.0), 1.0);
        let one = Binomial::new(5, 1.0).expect("valid");
        assert_eq!(one.pdf(5.0), 1.0);
        assert_eq!(one.cdf(4.0), 0.0);
        assert_eq!(one.cdf(5.0), 1.0);
    }

    #[test]
    fn binomial_trial_policies() {
        let s = counts();
        let by_n = Binomial::fit(&s, &FitConfig::default()).expect("should fit");
        assert_eq!(by_n.trials(), 10);
        assert!((by_n.p() - 0.11).abs() < 1e-12);

        let config = FitConfig::default().with_binomial_trials(TrialCount::ObservedMax);
        let by_max = Binomial::fit(&s, &config).expect("should fit");
        assert_eq!(by_max.trials(), 4);
        assert!((by_max.p() - 0.275).abs() < 1e-12);

        let config = FitConfig::default().with_binomial_trials(TrialCount::Fixed(20));
        let fixed = Binomial::fit(&s, &config).expect("should fit");
        assert_eq!(fixed.trials(), 20);

        let config = FitConfig::default().with_binomial_trials(TrialCount::Fixed(1));
        assert!(Binomial::fit(&s, &config).is_err(), "mean 1.1 exceeds one trial");
    }

    #[test]
    fn binomial_moments() {
        let d = Binomial::new(10, 0.5).expect("valid");
        assert!(d.skewness().abs() < 1e-15);
        assert!((d.kurtosis() + 0.2).abs() < 1e-12);
        let m = d.standard_metrics();
        assert!((m.mean - 5.0).abs() < 1e-12);
        assert!((m.variance - 2.5).abs() < 1e-12);
    }

    #[test]
    fn poisson_pmf_and_cdf() {
        let d = Poisson::new(2.0).expect("valid");
        assert!((d.pdf(0.0) - (-2.0_f64).exp()).abs() < 1e-15);
        assert!((d.pdf(3.0) - 8.0 / 6.0 * (-2.0_f64).exp()).abs() < 1e-14);
        assert_eq!(d.pdf(1.5), 0.0);
        assert_eq!(d.pdf(-1.0), 0.0);
        let mut running = 0.0;
        for k in 0..15 {
            running += d.pdf(f64::from(k));
            assert!((d.cdf(f64::from(k)) - running).abs() < 1e-10, "k = {k}");
        }
        assert_eq!(d.cdf(-0.1), 0.0);
    }

    #[test]
    fn poisson_fit_and_moments() {
        let d = Poisson::fit(&counts(), &FitConfig::default()).expect("should fit");
        assert!((d.lambda() - 1.1).abs() < 1e-12);
        assert!((d.kurtosis() - 1.0 / 1.1).abs() < 1e-12);
        assert!((d.skewness() - 1.0 / 1.1_f64.sqrt()).abs() < 1e-12);
        assert!(Poisson::new(0.0).is_err());
    }

    #[test]
    fn geometric_on_zero_based_support() {
        let d = Geometric::fit(&counts(), &FitConfig::default()).expect("should fit");
        assert!((d.p() - 1.0 / 2.1).abs() < 1e-12);
        let m = d.standard_metrics();
        assert!((m.mean - 1.1).abs() < 1e-12, "fitted mean matches sample mean");
        assert!((d.pdf(0.0) - d.p()).abs() < 1e-15);
        assert!((d.cdf(0.0) - d.p()).abs() < 1e-15);
        assert!((d.cdf(1.0) - (1.0 - (1.0 - d.p()).powi(2))).abs() < 1e-15);
        assert_eq!(d.cdf(-1.0), 0.0);
        assert_eq!(d.pdf(0.5), 0.0);
    }

    #[test]
    fn geometric_shape_constants() {
        let d = Geometric::new(0.5).expect("valid");
        assert!((d.skewness() - 1.5 / 0.5_f64.sqrt()).abs() < 1e-12);
        assert!((d.kurtosis() - 6.5).abs() < 1e-12);
        assert!(Geometric::new(0.0).is_err());
        assert!(Geometric::new(1.5).is_err());
    }
}
