//! Goodness-of-fit testing.
//!
//! - [`pearson_test`]: Pearson chi-squared over the series' frequency table,
//!   with adjacent categories pooled until each expects at least
//!   `merge_lower_bound` observations.
//! - [`ks_test`]: one-sample Kolmogorov–Smirnov with the asymptotic
//!   Kolmogorov p-value.
//! - [`evaluate_all`] / [`best_fit`]: both tests across every registered
//!   family, and selection of the best acceptable fit.
//!
//! # Examples
//!
//! ```
//! use u_distfit::config::FitConfig;
//! use u_distfit::distribution::DistributionKind;
//! use u_distfit::goodness::{ks_test, pearson_test};
//! use u_distfit::series::EmpiricalSeries;
//!
//! let data = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 1.0, 0.0, 2.0, 1.0];
//! let s = EmpiricalSeries::new(&data).unwrap();
//! let config = FitConfig::default();
//! let chars = DistributionKind::Poisson.fit(&s, &config).unwrap();
//!
//! let ks = ks_test(&s, &chars);
//! assert!((0.0..=1.0).contains(&ks.statistic));
//! let chi = pearson_test(&s, &chars, &config);
//! assert!(chi.map_or(true, |r| r.degrees_of_freedom >= 1));
//! ```

mod best_fit;
mod ks;
mod merge;
mod pearson;

pub use best_fit::{
    best_by_ks, best_by_pearson, best_fit, compare_moments, evaluate_all, select_best, BestFit,
    FitEvaluation, GoodnessTest, MomentComparison, TestOutcome,
};
pub use ks::{kolmogorov_p_value, ks_statistics, ks_test, KsResult};
pub use merge::{merge_categories, pair_tables, MergedCategory};
pub use pearson::{chi_squared_statistic, pearson_chi_squared, pearson_test, PearsonResult};
