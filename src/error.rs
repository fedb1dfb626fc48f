//! Error types.
//!
//! Every fallible operation in the crate returns [`Result`]. Construction-time
//! precondition violations and numerical degeneracies that have no documented
//! fallback are reported through [`StatsError`].

use thiserror::Error;

use crate::distribution::DistributionKind;

/// Unified error type for all statistical operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The input sample has no observations.
    #[error("input sample is empty")]
    EmptyInput,

    /// The input contains NaN or an infinity.
    #[error("non-finite value at index {index}")]
    NonFinite {
        /// Position of the first offending value.
        index: usize,
    },

    /// Not enough observations for the requested computation.
    #[error("need at least {needed} observations, got {actual}")]
    TooFewObservations {
        /// Minimum number of observations required.
        needed: usize,
        /// Number of observations supplied.
        actual: usize,
    },

    /// Paired inputs have different lengths.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first input.
        left: usize,
        /// Length of the second input.
        right: usize,
    },

    /// All observations are equal, so the sample cannot be binned.
    #[error("sample range is zero; cannot build intervals")]
    ZeroRange,

    /// A variable has zero variance where a ratio by its variance is needed.
    #[error("variable `{variable}` has zero variance")]
    ZeroVariance {
        /// Name of the degenerate variable.
        variable: &'static str,
    },

    /// Estimated or supplied distribution parameters are outside the domain.
    #[error("{distribution}: {reason}")]
    InvalidParameter {
        /// Family whose parameters are invalid.
        distribution: DistributionKind,
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// A caller-supplied argument (significance level, bound, …) is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The normal-equations matrix is singular (collinear predictors).
    #[error("design matrix is singular; predictors are collinear")]
    SingularMatrix,

    /// A chi-squared category has zero expected frequency.
    #[error("expected frequency of category `{category}` is zero")]
    ZeroExpectedFrequency {
        /// Key of the offending category.
        category: String,
    },

    /// The chi-squared test has no degrees of freedom left.
    #[error("not enough categories: degrees of freedom = {df}")]
    InsufficientDegreesOfFreedom {
        /// Degrees of freedom after the fallback to the unmerged table.
        df: i64,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Rejects empty input and non-finite values.
pub(crate) fn check_sample(data: &[f64]) -> Result<()> {
    if data.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    match data.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(StatsError::NonFinite { index }),
        None => Ok(()),
    }
}

/// Rejects paired inputs of different length.
pub(crate) fn check_paired(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    Ok(())
}

/// Rejects samples shorter than `needed`.
pub(crate) fn check_len(data: &[f64], needed: usize) -> Result<()> {
    if data.len() < needed {
        return Err(StatsError::TooFewObservations {
            needed,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Rejects a significance level outside (0, 1).
pub(crate) fn check_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(StatsError::InvalidArgument(format!(
            "significance level must be in (0, 1), got {alpha}"
        )));
    }
    Ok(())
}
