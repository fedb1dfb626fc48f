//! Expected-frequency projection.
//!
//! Turns fitted distribution parameters into the expected counts of each
//! category of a series' observed frequency table, so that observed and
//! expected tables can be compared category by category.
//!
//! # Examples
//!
//! ```
//! use u_distfit::config::FitConfig;
//! use u_distfit::distribution::DistributionKind;
//! use u_distfit::frequency::expected_frequencies;
//! use u_distfit::series::{EmpiricalSeries, Series};
//!
//! let s = EmpiricalSeries::new(&[0.0, 1.0, 1.0, 2.0, 3.0]).unwrap();
//! let chars = DistributionKind::Poisson.fit(&s, &FitConfig::default()).unwrap();
//! let expected = expected_frequencies(&s, &chars);
//! assert_eq!(expected.len(), s.frequency_table().len());
//! // P(X = 1) · n with λ = 1.4
//! assert!((expected.get("1").unwrap() - 5.0 * 1.4 * (-1.4_f64).exp()).abs() < 1e-12);
//! ```

use crate::distribution::Characteristics;
use crate::series::{Category, FrequencyTable, Series};

/// Expected frequency of every category of `series`.
///
/// # Algorithm
///
/// - Value `v`: `pdf(v) · n`.
/// - Interval `[a, b)`: `(cdf(b) − cdf(a)) · n`.
///
/// `n` is the sample size recorded in `chars`. The result is keyed and
/// ordered exactly like `series.frequency_table()`.
pub fn expected_frequencies(series: &dyn Series, chars: &Characteristics) -> FrequencyTable<f64> {
    let n = chars.n() as f64;
    let entries = series
        .frequency_table()
        .iter()
        .map(|&(category, _)| {
            let probability = match category {
                Category::Value(v) => chars.pdf(v),
                Category::Interval { lower, upper } => chars.cdf(upper) - chars.cdf(lower),
            };
            (category, probability * n)
        })
        .collect();
    FrequencyTable::new(entries)
}

/// Observed counts of `series` as `f64`, for side-by-side comparison with
/// [`expected_frequencies`].
pub fn observed_frequencies(series: &dyn Series) -> FrequencyTable<f64> {
    FrequencyTable::new(
        series
            .frequency_table()
            .iter()
            .map(|&(category, count)| (category, count as f64))
            .collect(),
    )
}
