//! Continuous families: normal, laplace, uniform, exponential.

use std::f64::consts::{PI, SQRT_2};

use serde::{Deserialize, Serialize};

use super::{invalid, DistributionKind, StandardMetrics, TheoreticalDistribution};
use crate::config::FitConfig;
use crate::error::{Result, StatsError};
use crate::series::Series;
use crate::special;

// ---------------------------------------------------------------------------
// Normal
// ---------------------------------------------------------------------------

/// Normal distribution N(μ, σ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// Creates N(μ, σ). Requires finite μ and σ > 0.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(invalid(DistributionKind::Normal, "mu must be finite"));
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(invalid(DistributionKind::Normal, "sigma must be positive"));
        }
        Ok(Self { mu, sigma })
    }

    /// Location μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale σ.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl TheoreticalDistribution for Normal {
    /// μ = x̄, σ = sample standard deviation.
    fn fit(series: &dyn Series, _config: &FitConfig) -> Result<Self> {
        let sigma = series
            .sample_standard_deviation()
            .ok_or(StatsError::TooFewObservations {
                needed: 2,
                actual: series.n(),
            })?;
        Normal::new(series.mean(), sigma)
    }

    fn kind(&self) -> DistributionKind {
        DistributionKind::Normal
    }

    fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.sigma;
        (-0.5 * z * z).exp() / (self.sigma * (2.0 * PI).sqrt())
    }

    fn cdf(&self, x: f64) -> f64 {
        special::standard_normal_cdf((x - self.mu) / self.sigma)
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        0.0
    }

    fn standard_metrics(&self) -> StandardMetrics {
        StandardMetrics {
            mean: self.mu,
            variance: self.sigma * self.sigma,
            sigma: self.sigma,
        }
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("mu", self.mu), ("sigma", self.sigma)]
    }

    fn estimated_parameters(&self) -> usize {
        2
    }
}

// ---------------------------------------------------------------------------
// Laplace
// ---------------------------------------------------------------------------

/// Laplace (double exponential) distribution L(μ, b).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Laplace {
    mu: f64,
    b: f64,
}

impl Laplace {
    /// Creates L(μ, b). Requires finite μ and b > 0.
    pub fn new(mu: f64, b: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(invalid(DistributionKind::Laplace, "mu must be finite"));
        }
        if !(b.is_finite() && b > 0.0) {
            return Err(invalid(
                DistributionKind::Laplace,
                "scale b must be positive",
            ));
        }
        Ok(Self { mu, b })
    }

    /// Location μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale b.
    pub fn b(&self) -> f64 {
        self.b
    }
}

impl TheoreticalDistribution for Laplace {
    /// μ = x̄, b = √(σ²/2) with the population variance.
    fn fit(series: &dyn Series, _config: &FitConfig) -> Result<Self> {
        Laplace::new(series.mean(), (series.variance() / 2.0).sqrt())
    }

    fn kind(&self) -> DistributionKind {
        DistributionKind::Laplace
    }

    fn pdf(&self, x: f64) -> f64 {
        (-(x - self.mu).abs() / self.b).exp() / (2.0 * self.b)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < self.mu {
            0.5 * ((x - self.mu) / self.b).exp()
        } else {
            1.0 - 0.5 * (-(x - self.mu) / self.b).exp()
        }
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        3.0
    }

    fn standard_metrics(&self) -> StandardMetrics {
        StandardMetrics {
            mean: self.mu,
            variance: 2.0 * self.b * self.b,
            sigma: SQRT_2 * self.b,
        }
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("mu", self.mu), ("b", self.b)]
    }

    fn estimated_parameters(&self) -> usize {
        2
    }
}

// ---------------------------------------------------------------------------
// Uniform
// ---------------------------------------------------------------------------

/// Continuous uniform distribution U(a, b).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Uniform {
    a: f64,
    b: f64,
}

impl Uniform {
    /// Creates U(a, b). Requires finite bounds with a < b.
    pub fn new(a: f64, b: f64) -> Result<Self> {
        if !(a.is_finite() && b.is_finite()) {
            return Err(invalid(DistributionKind::Uniform, "bounds must be finite"));
        }
        if a >= b {
            return Err(invalid(
                DistributionKind::Uniform,
                format!("lower bound {a} must be below upper bound {b}"),
            ));
        }
        Ok(Self { a, b })
    }

    /// Lower bound a.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Upper bound b.
    pub fn b(&self) -> f64 {
        self.b
    }
}

impl TheoreticalDistribution for Uniform {
    /// a = min, b = max.
    fn fit(series: &dyn Series, _config: &FitConfig) -> Result<Self> {
        Uniform::new(series.min(), series.max())
    }

    fn kind(&self) -> DistributionKind {
        DistributionKind::Uniform
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < self.a || x > self.b {
            0.0
        } else {
            1.0 / (self.b - self.a)
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.a {
            0.0
        } else if x >= self.b {
            1.0
        } else {
            (x - self.a) / (self.b - self.a)
        }
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        -1.2
    }

    fn standard_metrics(&self) -> StandardMetrics {
        let width = self.b - self.a;
        StandardMetrics::from_mean_variance((self.a + self.b) / 2.0, width * width / 12.0)
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("a", self.a), ("b", self.b)]
    }

    fn estimated_parameters(&self) -> usize {
        2
    }
}

// ---------------------------------------------------------------------------
// Exponential
// ---------------------------------------------------------------------------

/// Exponential distribution Exp(λ) on [0, ∞).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exponential {
    lambda: f64,
}

impl Exponential {
    /// Creates Exp(λ). Requires λ > 0.
    pub fn new(lambda: f64) -> Result<Self> {
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(invalid(
                DistributionKind::Exponential,
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

impl TheoreticalDistribution for Exponential {
    /// λ = 1 / x̄; requires a positive mean.
    fn fit(series: &dyn Series, _config: &FitConfig) -> Result<Self> {
        let mean = series.mean();
        if mean <= 0.0 {
            return Err(invalid(
                DistributionKind::Exponential,
                format!("sample mean must be positive, got {mean}"),
            ));
        }
        Exponential::new(1.0 / mean)
    }

    fn kind(&self) -> DistributionKind {
        DistributionKind::Exponential
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            self.lambda * (-self.lambda * x).exp()
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            -(-self.lambda * x).exp_m1()
        }
    }

    fn skewness(&self) -> f64 {
        2.0
    }

    fn kurtosis(&self) -> f64 {
        6.0
    }

    fn standard_metrics(&self) -> StandardMetrics {
        StandardMetrics::from_mean_variance(1.0 / self.lambda, 1.0 / (self.lambda * self.lambda))
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("lambda", self.lambda)]
    }

    fn estimated_parameters(&self) -> usize {
        1
    }
}
