//! # u-distfit
//!
//! Descriptive statistics, distribution fitting, goodness-of-fit testing,
//! hypothesis tests and linear regression diagnostics for univariate
//! samples.
//!
//! Everything operates on raw `f64` data. A sample is wrapped in a
//! [`series::Series`] (empirical or grouped), theoretical families are
//! fitted to it by the method of moments, and the fits are ranked by
//! Pearson's χ² and the Kolmogorov–Smirnov test.
//!
//! ## Modules
//!
//! - [`series`]: Empirical and Sturges-grouped series with descriptive statistics
//! - [`frequency`]: Frequency tables with absolute, relative and cumulative columns
//! - [`distribution`]: Normal, binomial, Poisson, Laplace, geometric, uniform, exponential
//! - [`goodness`]: Pearson χ² with category merging, Kolmogorov–Smirnov, best-fit selection
//! - [`testing`]: Mean and variance tests against a fitted distribution, t-tests
//! - [`correlation`]: Pearson correlation with its t-test
//! - [`regression`]: Simple and two-predictor OLS with diagnostics
//! - [`config`]: Significance level and fitting policy
//! - [`special`]: Reference distribution functions and t-test p-values
//!
//! ## Design Philosophy
//!
//! - **Validated input**: Empty or non-finite data is rejected with [`StatsError`]
//! - **Numerical stability**: Compensated sums and Welford moments via `u-numflow`
//! - **Research-backed**: All algorithms reference academic literature
//!
//! # Examples
//!
//! ```
//! use u_distfit::config::FitConfig;
//! use u_distfit::goodness::{evaluate_all, best_by_ks};
//! use u_distfit::series::EmpiricalSeries;
//!
//! let data: Vec<f64> = (0..200).map(|i| (i % 20) as f64 + 0.5).collect();
//! let series = EmpiricalSeries::new(&data).unwrap();
//! let config = FitConfig::default();
//!
//! let evaluations = evaluate_all(&series, &config).unwrap();
//! assert_eq!(evaluations.len(), 7);
//! let _best = best_by_ks(&series, &config);
//! ```

pub mod config;
pub mod correlation;
pub mod distribution;
pub mod error;
pub mod frequency;
pub mod goodness;
pub mod regression;
pub mod series;
pub mod special;
pub mod testing;

pub use error::{Result, StatsError};
