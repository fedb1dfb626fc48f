//! Pearson chi-squared goodness-of-fit test.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::merge::{merge_pairs, pair_tables, MergedCategory};
use crate::config::FitConfig;
use crate::distribution::Characteristics;
use crate::error::{Result, StatsError};
use crate::frequency::{expected_frequencies, observed_frequencies};
use crate::series::{FrequencyTable, Series};
use crate::special;

/// Outcome of a Pearson chi-squared test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PearsonResult {
    /// χ² = Σ (o − e)² / e over the tested categories.
    pub chi_squared: f64,
    /// Categories − 1 − estimated parameters.
    pub degrees_of_freedom: usize,
    /// Upper-tail probability 1 − F_χ²(χ², df).
    pub p_value: f64,
    /// The categories the statistic was computed over.
    pub categories: Vec<MergedCategory>,
    /// `false` when merging left too few categories and the unmerged table
    /// was used instead.
    pub merged: bool,
}

/// Σ (o − e)² / e.
///
/// # Errors
///
/// [`StatsError::ZeroExpectedFrequency`] if any category has a
/// non-positive expected frequency.
pub fn chi_squared_statistic(categories: &[MergedCategory]) -> Result<f64> {
    let mut chi_squared = 0.0;
    for c in categories {
        if c.expected <= 0.0 {
            return Err(StatsError::ZeroExpectedFrequency {
                category: c.to_string(),
            });
        }
        chi_squared += (c.observed - c.expected).powi(2) / c.expected;
    }
    Ok(chi_squared)
}

/// Pearson chi-squared test over explicit observed/expected tables.
///
/// # Algorithm
///
/// 1. Pair the tables and pool adjacent categories until each pool's
///    expected frequency reaches `lower_bound`.
/// 2. `df = pools − 1 − estimated_parameters`. If that is below 1, fall back
///    to the unmerged categories and their df.
/// 3. `χ² = Σ (o − e)² / e`, `p = 1 − F_χ²(χ², df)`.
///
/// # Errors
///
/// - [`StatsError::InsufficientDegreesOfFreedom`] if df < 1 even unmerged.
/// - [`StatsError::ZeroExpectedFrequency`] if a tested category expects 0.
/// - Table mismatch errors from [`pair_tables`](super::pair_tables).
///
/// # References
///
/// Pearson (1900). "On the criterion that a given system of deviations from
/// the probable in the case of a correlated system of variables is such
/// that it can be reasonably supposed to have arisen from random sampling".
/// *Philosophical Magazine*, 50(302), 157–175.
///
/// # Examples
///
/// ```
/// use u_distfit::goodness::pearson_chi_squared;
/// use u_distfit::series::{Category, FrequencyTable};
///
/// let cats = |f: &[f64]| FrequencyTable::new(
///     f.iter().enumerate().map(|(i, &v)| (Category::Value(i as f64), v)).collect(),
/// );
/// let observed = cats(&[18.0, 22.0, 20.0, 25.0, 15.0]);
/// let expected = cats(&[20.0, 20.0, 20.0, 20.0, 20.0]);
/// let r = pearson_chi_squared(&observed, &expected, 0, 5.0).unwrap();
/// assert_eq!(r.degrees_of_freedom, 4);
/// assert!((r.chi_squared - 2.9).abs() < 1e-12);
/// assert!(r.p_value > 0.5);
/// ```
pub fn pearson_chi_squared(
    observed: &FrequencyTable<f64>,
    expected: &FrequencyTable<f64>,
    estimated_parameters: usize,
    lower_bound: f64,
) -> Result<PearsonResult> {
    let pairs = pair_tables(observed, expected)?;
    let pooled = merge_pairs(&pairs, lower_bound);

    let k = estimated_parameters as i64;
    let merged_df = pooled.len() as i64 - 1 - k;

    let (categories, df, merged) = if merged_df >= 1 {
        (pooled, merged_df, true)
    } else {
        let df = pairs.len() as i64 - 1 - k;
        debug!(
            merged_df,
            unmerged_df = df,
            "too few merged categories; using the unmerged table"
        );
        (pairs, df, false)
    };

    if df < 1 {
        return Err(StatsError::InsufficientDegreesOfFreedom { df });
    }

    let chi_squared = chi_squared_statistic(&categories)?;
    let df_f = df as f64;
    let p_value = (1.0 - special::chi_squared_cdf(chi_squared, df_f)).clamp(0.0, 1.0);

    Ok(PearsonResult {
        chi_squared,
        degrees_of_freedom: df as usize,
        p_value,
        categories,
        merged,
    })
}

/// Pearson chi-squared test of a fitted distribution against a series.
///
/// Observed counts come from the series' frequency table and expected
/// counts from [`expected_frequencies`]; the number of estimated
/// parameters is [`Characteristics::parameter_count`].
///
/// # Errors
///
/// See [`pearson_chi_squared`]; also rejects an invalid `config`.
pub fn pearson_test(
    series: &dyn Series,
    chars: &Characteristics,
    config: &FitConfig,
) -> Result<PearsonResult> {
    config.validate()?;
    let observed = observed_frequencies(series);
    let expected = expected_frequencies(series, chars);
    pearson_chi_squared(
        &observed,
        &expected,
        chars.parameter_count(),
        config.merge_lower_bound,
    )
}
