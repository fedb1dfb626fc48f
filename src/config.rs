//! Fitting and testing configuration.
//!
//! [`FitConfig`] gathers the tunable knobs shared by the goodness-of-fit
//! engine, the best-fit selector and the hypothesis tests. Every field has a
//! conventional default, so `FitConfig::default()` is the usual starting
//! point.
//!
//! # Examples
//!
//! ```
//! use u_distfit::config::{FitConfig, RankingPolicy, TrialCount};
//!
//! let config = FitConfig::default()
//!     .with_significance(0.01)
//!     .with_ranking(RankingPolicy::LowestStatistic)
//!     .with_binomial_trials(TrialCount::Fixed(10));
//! assert!(config.validate().is_ok());
//! assert_eq!(config.merge_lower_bound, 5.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{check_alpha, Result, StatsError};

/// How surviving best-fit candidates are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankingPolicy {
    /// The candidate with the largest p-value wins.
    #[default]
    HighestPValue,
    /// Within one test, the candidate with the smallest statistic wins
    /// (χ² or D). Across tests the larger p-value breaks the tie, since the
    /// two statistics live on different scales.
    LowestStatistic,
}

/// Number of Bernoulli trials assumed when fitting a binomial distribution.
///
/// Method of moments only identifies `m·p`, so the trial count `m` has to
/// come from outside the sample mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrialCount {
    /// `m = n`, the number of observations.
    #[default]
    SampleSize,
    /// `m = ⌈max⌉`, the largest observed count.
    ObservedMax,
    /// A caller-supplied count.
    Fixed(u64),
}

/// Configuration for distribution fitting and hypothesis testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Significance level α. Candidates with `p < α` are discarded and
    /// hypothesis tests reject at this level. Default 0.05.
    pub significance: f64,
    /// Minimum accumulated expected frequency of a merged χ² category.
    /// Default 5.
    pub merge_lower_bound: f64,
    /// Ordering of best-fit candidates.
    pub ranking: RankingPolicy,
    /// Trial-count policy for the binomial fit.
    pub binomial_trials: TrialCount,
    /// Samples with `n` at or below this size use Student-t critical values
    /// in [`test_mean`](crate::testing::test_mean). Default 30.
    pub small_sample_threshold: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            significance: 0.05,
            merge_lower_bound: 5.0,
            ranking: RankingPolicy::default(),
            binomial_trials: TrialCount::default(),
            small_sample_threshold: 30,
        }
    }
}

impl FitConfig {
    /// Sets the significance level.
    pub fn with_significance(mut self, alpha: f64) -> Self {
        self.significance = alpha;
        self
    }

    /// Sets the χ² category-merge lower bound.
    pub fn with_merge_lower_bound(mut self, bound: f64) -> Self {
        self.merge_lower_bound = bound;
        self
    }

    /// Sets the candidate ranking policy.
    pub fn with_ranking(mut self, ranking: RankingPolicy) -> Self {
        self.ranking = ranking;
        self
    }

    /// Sets the binomial trial-count policy.
    pub fn with_binomial_trials(mut self, trials: TrialCount) -> Self {
        self.binomial_trials = trials;
        self
    }

    /// Sets the t/normal switch-over sample size.
    pub fn with_small_sample_threshold(mut self, threshold: usize) -> Self {
        self.small_sample_threshold = threshold;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// Rejects α outside (0, 1), a non-positive or non-finite merge bound,
    /// and a fixed binomial trial count of zero.
    pub fn validate(&self) -> Result<()> {
        check_alpha(self.significance)?;
        if !(self.merge_lower_bound.is_finite() && self.merge_lower_bound > 0.0) {
            return Err(StatsError::InvalidArgument(format!(
                "merge lower bound must be positive, got {}",
                self.merge_lower_bound
            )));
        }
        if self.binomial_trials == TrialCount::Fixed(0) {
            return Err(StatsError::InvalidArgument(
                "binomial trial count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
