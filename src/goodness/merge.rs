//! Category merging for the chi-squared test.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, StatsError};
use crate::series::{Category, FrequencyTable};

/// One or more adjacent categories pooled for the chi-squared test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergedCategory {
    /// First pooled category.
    pub first: Category,
    /// Last pooled category.
    pub last: Category,
    /// Number of pooled categories.
    pub members: usize,
    /// Summed observed frequency.
    pub observed: f64,
    /// Summed expected frequency.
    pub expected: f64,
}

impl MergedCategory {
    fn single(category: Category, observed: f64, expected: f64) -> Self {
        Self {
            first: category,
            last: category,
            members: 1,
            observed,
            expected,
        }
    }

    fn absorb(&mut self, other: &MergedCategory) {
        self.last = other.last;
        self.members += other.members;
        self.observed += other.observed;
        self.expected += other.expected;
    }

    /// Start of the first pooled category.
    pub fn start(&self) -> f64 {
        self.first.start()
    }

    /// End of the last pooled category.
    pub fn end(&self) -> f64 {
        self.last.end()
    }
}

impl fmt::Display for MergedCategory {
    /// A lone category keeps its own key; a pool is shown as the closed
    /// range `[start, end]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members == 1 {
            write!(f, "{}", self.first)
        } else {
            write!(f, "[{}, {}]", self.start(), self.end())
        }
    }
}

/// Pairs observed and expected tables into unmerged categories.
///
/// # Errors
///
/// [`StatsError::LengthMismatch`] if the tables differ in size,
/// [`StatsError::InvalidArgument`] if their categories differ.
pub fn pair_tables(
    observed: &FrequencyTable<f64>,
    expected: &FrequencyTable<f64>,
) -> Result<Vec<MergedCategory>> {
    if observed.len() != expected.len() {
        return Err(StatsError::LengthMismatch {
            left: observed.len(),
            right: expected.len(),
        });
    }
    let mut pairs: Vec<MergedCategory> = observed
        .iter()
        .zip(expected.iter())
        .map(|(&(co, o), &(ce, e))| {
            if co != ce {
                return Err(StatsError::InvalidArgument(format!(
                    "category `{co}` does not match expected category `{ce}`"
                )));
            }
            Ok(MergedCategory::single(co, o, e))
        })
        .collect::<Result<_>>()?;
    pairs.sort_by(|a, b| a.start().total_cmp(&b.start()));
    Ok(pairs)
}

/// Pools adjacent categories until each pool's expected frequency reaches
/// `lower_bound`.
///
/// # Algorithm
///
/// Scan left to right, accumulating observed and expected sums; close the
/// pool as soon as the accumulated expected sum is `≥ lower_bound`. A tail
/// that never reaches the bound is folded into the last closed pool, or
/// emitted on its own when nothing was closed.
///
/// Pools still below the bound afterwards are reported with
/// `tracing::warn!`.
///
/// # Examples
///
/// ```
/// use u_distfit::goodness::merge_categories;
/// use u_distfit::series::{Category, FrequencyTable};
///
/// let obs = FrequencyTable::new(vec![(Category::Value(1.0), 5.0), (Category::Value(2.0), 4.0)]);
/// let exp = FrequencyTable::new(vec![(Category::Value(1.0), 2.0), (Category::Value(2.0), 3.0)]);
/// let merged = merge_categories(&obs, &exp, 5.0).unwrap();
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].to_string(), "[1, 2]");
/// assert_eq!(merged[0].observed, 9.0);
/// ```
pub fn merge_categories(
    observed: &FrequencyTable<f64>,
    expected: &FrequencyTable<f64>,
    lower_bound: f64,
) -> Result<Vec<MergedCategory>> {
    let pairs = pair_tables(observed, expected)?;
    Ok(merge_pairs(&pairs, lower_bound))
}

pub(crate) fn merge_pairs(pairs: &[MergedCategory], lower_bound: f64) -> Vec<MergedCategory> {
    let mut merged: Vec<MergedCategory> = Vec::new();
    let mut buffer: Option<MergedCategory> = None;

    for pair in pairs {
        let pool = match buffer.as_mut() {
            Some(pool) => {
                pool.absorb(pair);
                *pool
            }
            None => *pair,
        };
        if pool.expected >= lower_bound {
            merged.push(pool);
            buffer = None;
        } else {
            buffer = Some(pool);
        }
    }

    if let Some(tail) = buffer {
        match merged.last_mut() {
            Some(last) => last.absorb(&tail),
            None => merged.push(tail),
        }
    }

    for category in merged.iter().filter(|c| c.expected < lower_bound) {
        warn!(
            category = %category,
            expected = category.expected,
            lower_bound,
            "merged category still below expected-frequency bound"
        );
    }
    merged
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pools_reach_bound_and_preserve_totals(
            freqs in proptest::collection::vec((0.0_f64..20.0, 0.0_f64..10.0), 0..40),
            bound in 1.0_f64..15.0,
        ) {
            let obs = FrequencyTable::new(
                freqs
                    .iter()
                    .enumerate()
                    .map(|(i, &(o, _))| (Category::Value(i as f64), o))
                    .collect(),
            );
            let exp = FrequencyTable::new(
                freqs
                    .iter()
                    .enumerate()
                    .map(|(i, &(_, e))| (Category::Value(i as f64), e))
                    .collect(),
            );
            let merged = merge_categories(&obs, &exp, bound).expect("tables match");

            let members: usize = merged.iter().map(|c| c.members).sum();
            prop_assert_eq!(members, freqs.len());
            let obs_total: f64 = merged.iter().map(|c| c.observed).sum();
            prop_assert!((obs_total - obs.total()).abs() < 1e-9);

            if merged.len() > 1 || merged.first().is_some_and(|c| c.expected >= bound) {
                for c in &merged {
                    prop_assert!(c.expected >= bound - 1e-9);
                }
            }
        }
    }
}
