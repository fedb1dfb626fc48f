//! Best-fit selection across the distribution registry.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ks::{ks_test, KsResult};
use super::pearson::{pearson_test, PearsonResult};
use crate::config::{FitConfig, RankingPolicy};
use crate::distribution::{Characteristics, DistributionKind};
use crate::error::Result;
use crate::series::Series;

/// A goodness-of-fit result, or the reason the test could not be run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TestOutcome<T> {
    /// The test ran.
    Completed(T),
    /// The fit or the test was degenerate for this sample.
    NotApplicable {
        /// Description of the failed precondition.
        reason: String,
    },
}

impl<T> TestOutcome<T> {
    /// The result, if the test ran.
    pub fn completed(&self) -> Option<&T> {
        match self {
            TestOutcome::Completed(r) => Some(r),
            TestOutcome::NotApplicable { .. } => None,
        }
    }

    fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(r) => TestOutcome::Completed(r),
            Err(e) => TestOutcome::NotApplicable {
                reason: e.to_string(),
            },
        }
    }
}

/// Both goodness-of-fit tests of one family against a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitEvaluation {
    /// Family under test.
    pub kind: DistributionKind,
    /// Fitted parameters; `None` if the family cannot be fitted.
    pub characteristics: Option<Characteristics>,
    /// Pearson chi-squared outcome.
    pub pearson: TestOutcome<PearsonResult>,
    /// Kolmogorov–Smirnov outcome.
    pub ks: TestOutcome<KsResult>,
}

impl FitEvaluation {
    /// `(statistic, p_value)` of the given test, if it ran.
    pub fn score(&self, test: GoodnessTest) -> Option<(f64, f64)> {
        match test {
            GoodnessTest::Pearson => self
                .pearson
                .completed()
                .map(|r| (r.chi_squared, r.p_value)),
            GoodnessTest::Ks => self.ks.completed().map(|r| (r.statistic, r.p_value)),
        }
    }
}

/// Which goodness-of-fit test selected a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoodnessTest {
    /// Pearson chi-squared.
    Pearson,
    /// Kolmogorov–Smirnov.
    Ks,
}

/// The selected distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestFit {
    /// Winning family.
    pub kind: DistributionKind,
    /// Its fitted parameters.
    pub characteristics: Characteristics,
    /// Test that selected it.
    pub test: GoodnessTest,
    /// χ² or D.
    pub statistic: f64,
    /// p-value of that test.
    pub p_value: f64,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Fits every family in [`DistributionKind::ALL`] and runs both tests.
///
/// A family whose fit fails (for instance Poisson on a sample with a
/// non-positive mean) gets `characteristics: None` and both outcomes
/// [`NotApplicable`](TestOutcome::NotApplicable). A Pearson test without
/// degrees of freedom or with an empty expected category is likewise
/// reported as not applicable.
///
/// # Errors
///
/// Only an invalid `config`.
///
/// # Examples
///
/// ```
/// use u_distfit::config::FitConfig;
/// use u_distfit::goodness::evaluate_all;
/// use u_distfit::series::EmpiricalSeries;
///
/// let s = EmpiricalSeries::new(&[0.5, 1.5, 1.5, 2.5]).unwrap();
/// let rows = evaluate_all(&s, &FitConfig::default()).unwrap();
/// assert_eq!(rows.len(), 7);
/// ```
pub fn evaluate_all(series: &dyn Series, config: &FitConfig) -> Result<Vec<FitEvaluation>> {
    config.validate()?;
    let rows = DistributionKind::ALL
        .iter()
        .map(|&kind| match kind.fit(series, config) {
            Ok(chars) => FitEvaluation {
                kind,
                characteristics: Some(chars),
                pearson: TestOutcome::from_result(pearson_test(series, &chars, config)),
                ks: TestOutcome::Completed(ks_test(series, &chars)),
            },
            Err(e) => {
                let reason = e.to_string();
                FitEvaluation {
                    kind,
                    characteristics: None,
                    pearson: TestOutcome::NotApplicable {
                        reason: reason.clone(),
                    },
                    ks: TestOutcome::NotApplicable { reason },
                }
            }
        })
        .collect();
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Picks the best candidate of one test from already computed evaluations.
///
/// # Algorithm
///
/// 1. Keep rows whose `test` completed with `p ≥ config.significance`.
/// 2. Rank by `config.ranking`: the highest p-value, or the lowest
///    statistic. Ties go to the earlier family in registry order.
///
/// Returns `None` when no candidate survives.
pub fn select_best(
    evaluations: &[FitEvaluation],
    test: GoodnessTest,
    config: &FitConfig,
) -> Option<BestFit> {
    let mut best: Option<BestFit> = None;
    for row in evaluations {
        let (Some(chars), Some((statistic, p_value))) = (row.characteristics, row.score(test))
        else {
            debug!(kind = %row.kind, ?test, "skipping candidate: test not applicable");
            continue;
        };
        if p_value.is_nan() || p_value < config.significance {
            debug!(
                kind = %row.kind,
                ?test,
                p_value,
                significance = config.significance,
                "skipping candidate: fit rejected"
            );
            continue;
        }
        let better = match &best {
            None => true,
            Some(current) => match config.ranking {
                RankingPolicy::HighestPValue => p_value > current.p_value,
                RankingPolicy::LowestStatistic => statistic < current.statistic,
            },
        };
        if better {
            best = Some(BestFit {
                kind: row.kind,
                characteristics: chars,
                test,
                statistic,
                p_value,
            });
        }
    }
    best
}

/// Best family by the Pearson chi-squared test.
///
/// # Errors
///
/// Only an invalid `config`. No acceptable candidate is `Ok(None)`.
pub fn best_by_pearson(series: &dyn Series, config: &FitConfig) -> Result<Option<BestFit>> {
    let rows = evaluate_all(series, config)?;
    Ok(select_best(&rows, GoodnessTest::Pearson, config))
}

/// Best family by the Kolmogorov–Smirnov test.
///
/// # Errors
///
/// Only an invalid `config`. No acceptable candidate is `Ok(None)`.
pub fn best_by_ks(series: &dyn Series, config: &FitConfig) -> Result<Option<BestFit>> {
    let rows = evaluate_all(series, config)?;
    Ok(select_best(&rows, GoodnessTest::Ks, config))
}

/// Best family over both tests.
///
/// Each test picks its own winner by the configured ranking; between the
/// two winners the higher p-value wins, Pearson on a tie.
///
/// # Examples
///
/// ```
/// use u_distfit::config::FitConfig;
/// use u_distfit::goodness::best_fit;
/// use u_distfit::series::EmpiricalSeries;
///
/// let data: Vec<f64> = (0..60).map(|i| f64::from(i) / 59.0).collect();
/// let s = EmpiricalSeries::new(&data).unwrap();
/// let best = best_fit(&s, &FitConfig::default()).unwrap().expect("something fits");
/// assert!(best.p_value >= 0.05);
/// ```
pub fn best_fit(series: &dyn Series, config: &FitConfig) -> Result<Option<BestFit>> {
    let rows = evaluate_all(series, config)?;
    let pearson = select_best(&rows, GoodnessTest::Pearson, config);
    let ks = select_best(&rows, GoodnessTest::Ks, config);
    Ok(match (pearson, ks) {
        (Some(p), Some(k)) => Some(if k.p_value > p.p_value { k } else { p }),
        (p, k) => p.or(k),
    })
}

// ---------------------------------------------------------------------------
// Moment comparison
// ---------------------------------------------------------------------------

/// Empirical and theoretical shape moments side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentComparison {
    /// Sample skewness; `None` for a zero-variance sample.
    pub empirical_skewness: Option<f64>,
    /// Skewness of the fitted family.
    pub theoretical_skewness: f64,
    /// Sample excess kurtosis; `None` for a zero-variance sample.
    pub empirical_kurtosis: Option<f64>,
    /// Excess kurtosis of the fitted family.
    pub theoretical_kurtosis: f64,
}

/// Compares the sample's skewness and kurtosis with those of a fit.
pub fn compare_moments(series: &dyn Series, chars: &Characteristics) -> MomentComparison {
    MomentComparison {
        empirical_skewness: series.skewness(),
        theoretical_skewness: chars.skewness(),
        empirical_kurtosis: series.kurtosis(),
        theoretical_kurtosis: chars.kurtosis(),
    }
}
