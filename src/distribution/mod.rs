//! Theoretical distribution families.
//!
//! Seven families are supported: normal, binomial, poisson, laplace,
//! geometric, uniform and exponential. Each family is a small parameter
//! struct implementing [`TheoreticalDistribution`]: method-of-moments
//! estimation from a [`Series`], pdf (pmf for the discrete families), cdf,
//! theoretical skewness and excess kurtosis, and the standard metrics
//! mean/variance/σ.
//!
//! [`DistributionKind`] is the registry key. [`DistributionKind::fit`]
//! dispatches to the family's estimator and returns the fitted
//! [`Characteristics`], a tagged union that records the sample size next to
//! the parameters.
//!
//! # Examples
//!
//! ```
//! use u_distfit::config::FitConfig;
//! use u_distfit::distribution::DistributionKind;
//! use u_distfit::series::EmpiricalSeries;
//!
//! let series = EmpiricalSeries::new(&[0.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 4.0]).unwrap();
//! let chars = DistributionKind::Poisson.fit(&series, &FitConfig::default()).unwrap();
//! assert_eq!(chars.kind(), DistributionKind::Poisson);
//! assert_eq!(chars.n(), 8);
//! assert!((chars.standard_metrics().mean - 1.875).abs() < 1e-12);
//! ```

mod continuous;
mod discrete;

pub use continuous::{Exponential, Laplace, Normal, Uniform};
pub use discrete::{Binomial, Geometric, Poisson};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::FitConfig;
use crate::error::{Result, StatsError};
use crate::series::Series;

// ---------------------------------------------------------------------------
// Registry key
// ---------------------------------------------------------------------------

/// The supported distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    /// Normal N(μ, σ).
    Normal,
    /// Binomial B(m, p).
    Binomial,
    /// Poisson P(λ).
    Poisson,
    /// Laplace L(μ, b).
    Laplace,
    /// Geometric G(p) on {0, 1, 2, …}.
    Geometric,
    /// Continuous uniform U(a, b).
    Uniform,
    /// Exponential Exp(λ).
    Exponential,
}

impl DistributionKind {
    /// Every family, in registry order.
    pub const ALL: [DistributionKind; 7] = [
        DistributionKind::Normal,
        DistributionKind::Binomial,
        DistributionKind::Poisson,
        DistributionKind::Laplace,
        DistributionKind::Geometric,
        DistributionKind::Uniform,
        DistributionKind::Exponential,
    ];

    /// Lowercase family name.
    pub fn name(self) -> &'static str {
        match self {
            DistributionKind::Normal => "normal",
            DistributionKind::Binomial => "binomial",
            DistributionKind::Poisson => "poisson",
            DistributionKind::Laplace => "laplace",
            DistributionKind::Geometric => "geometric",
            DistributionKind::Uniform => "uniform",
            DistributionKind::Exponential => "exponential",
        }
    }

    /// `true` for the families supported on the integers.
    pub fn is_discrete(self) -> bool {
        matches!(
            self,
            DistributionKind::Binomial | DistributionKind::Poisson | DistributionKind::Geometric
        )
    }

    /// Estimates this family's parameters from `series` by the method of
    /// moments.
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidParameter`] when the sample moments fall outside
    /// the family's parameter domain (e.g. a non-positive mean for poisson),
    /// [`StatsError::TooFewObservations`] when the normal fit has a single
    /// observation.
    pub fn fit(self, series: &dyn Series, config: &FitConfig) -> Result<Characteristics> {
        let n = series.n();
        let chars = match self {
            DistributionKind::Normal => Characteristics::Normal {
                n,
                params: Normal::fit(series, config)?,
            },
            DistributionKind::Binomial => Characteristics::Binomial {
                n,
                params: Binomial::fit(series, config)?,
            },
            DistributionKind::Poisson => Characteristics::Poisson {
                n,
                params: Poisson::fit(series, config)?,
            },
            DistributionKind::Laplace => Characteristics::Laplace {
                n,
                params: Laplace::fit(series, config)?,
            },
            DistributionKind::Geometric => Characteristics::Geometric {
                n,
                params: Geometric::fit(series, config)?,
            },
            DistributionKind::Uniform => Characteristics::Uniform {
                n,
                params: Uniform::fit(series, config)?,
            },
            DistributionKind::Exponential => Characteristics::Exponential {
                n,
                params: Exponential::fit(series, config)?,
            },
        };
        Ok(chars)
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionKind {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        DistributionKind::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| StatsError::InvalidArgument(format!("unknown distribution `{s}`")))
    }
}

// ---------------------------------------------------------------------------
// Strategy contract
// ---------------------------------------------------------------------------

/// Mean, variance and standard deviation implied by fitted parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardMetrics {
    /// Theoretical mean.
    pub mean: f64,
    /// Theoretical variance.
    pub variance: f64,
    /// Theoretical standard deviation, √variance.
    pub sigma: f64,
}

impl StandardMetrics {
    pub(crate) fn from_mean_variance(mean: f64, variance: f64) -> Self {
        Self {
            mean,
            variance,
            sigma: variance.sqrt(),
        }
    }
}

/// Contract shared by every distribution family.
///
/// Implementors are plain parameter structs; they never hold a reference to
/// the series they were fitted on.
pub trait TheoreticalDistribution {
    /// Method-of-moments estimate from a series.
    fn fit(series: &dyn Series, config: &FitConfig) -> Result<Self>
    where
        Self: Sized;

    /// Registry key of the family.
    fn kind(&self) -> DistributionKind;

    /// Density (continuous) or probability mass (discrete) at `x`.
    fn pdf(&self, x: f64) -> f64;

    /// P(X ≤ x).
    fn cdf(&self, x: f64) -> f64;

    /// Theoretical skewness.
    fn skewness(&self) -> f64;

    /// Theoretical excess kurtosis.
    fn kurtosis(&self) -> f64;

    /// Mean, variance and σ of the distribution.
    fn standard_metrics(&self) -> StandardMetrics;

    /// Named parameters, for display.
    fn parameters(&self) -> Vec<(&'static str, f64)>;

    /// Number of parameters estimated from the sample; reduces the χ²
    /// degrees of freedom.
    fn estimated_parameters(&self) -> usize;
}

pub(crate) fn invalid(kind: DistributionKind, reason: impl Into<String>) -> StatsError {
    StatsError::InvalidParameter {
        distribution: kind,
        reason: reason.into(),
    }
}

/// `true` if `x` is a non-negative integer.
pub(crate) fn is_count(x: f64) -> bool {
    x >= 0.0 && x.fract() == 0.0
}

// ---------------------------------------------------------------------------
// Fitted characteristics
// ---------------------------------------------------------------------------

/// Fitted parameters of one family together with the sample size.
///
/// Produced by [`DistributionKind::fit`]; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Characteristics {
    /// Normal fit.
    Normal {
        /// Sample size.
        n: usize,
        /// μ and σ.
        params: Normal,
    },
    /// Binomial fit.
    Binomial {
        /// Sample size.
        n: usize,
        /// Trial count and p.
        params: Binomial,
    },
    /// Poisson fit.
    Poisson {
        /// Sample size.
        n: usize,
        /// λ.
        params: Poisson,
    },
    /// Laplace fit.
    Laplace {
        /// Sample size.
        n: usize,
        /// μ and b.
        params: Laplace,
    },
    /// Geometric fit.
    Geometric {
        /// Sample size.
        n: usize,
        /// p.
        params: Geometric,
    },
    /// Uniform fit.
    Uniform {
        /// Sample size.
        n: usize,
        /// a and b.
        params: Uniform,
    },
    /// Exponential fit.
    Exponential {
        /// Sample size.
        n: usize,
        /// λ.
        params: Exponential,
    },
}

impl Characteristics {
    /// The fitted family as a strategy object.
    pub fn distribution(&self) -> &dyn TheoreticalDistribution {
        match self {
            Characteristics::Normal { params, .. } => params,
            Characteristics::Binomial { params, .. } => params,
            Characteristics::Poisson { params, .. } => params,
            Characteristics::Laplace { params, .. } => params,
            Characteristics::Geometric { params, .. } => params,
            Characteristics::Uniform { params, .. } => params,
            Characteristics::Exponential { params, .. } => params,
        }
    }

    /// Sample size the parameters were estimated from.
    pub fn n(&self) -> usize {
        match *self {
            Characteristics::Normal { n, .. }
            | Characteristics::Binomial { n, .. }
            | Characteristics::Poisson { n, .. }
            | Characteristics::Laplace { n, .. }
            | Characteristics::Geometric { n, .. }
            | Characteristics::Uniform { n, .. }
            | Characteristics::Exponential { n, .. } => n,
        }
    }

    /// Family of the fit.
    pub fn kind(&self) -> DistributionKind {
        self.distribution().kind()
    }

    /// See [`TheoreticalDistribution::pdf`].
    pub fn pdf(&self, x: f64) -> f64 {
        self.distribution().pdf(x)
    }

    /// See [`TheoreticalDistribution::cdf`].
    pub fn cdf(&self, x: f64) -> f64 {
        self.distribution().cdf(x)
    }

    /// See [`TheoreticalDistribution::skewness`].
    pub fn skewness(&self) -> f64 {
        self.distribution().skewness()
    }

    /// See [`TheoreticalDistribution::kurtosis`].
    pub fn kurtosis(&self) -> f64 {
        self.distribution().kurtosis()
    }

    /// See [`TheoreticalDistribution::standard_metrics`].
    pub fn standard_metrics(&self) -> StandardMetrics {
        self.distribution().standard_metrics()
    }

    /// Number of parameters estimated from the sample.
    pub fn parameter_count(&self) -> usize {
        self.distribution().estimated_parameters()
    }

    /// Named parameters, for display.
    pub fn parameters(&self) -> Vec<(&'static str, f64)> {
        self.distribution().parameters()
    }
}
