//! Sample series.
//!
//! A series is an immutable, ascending-sorted view over a finite sample
//! together with its frequency table and once-computed descriptive
//! statistics. Two flavours share the [`Series`] capability set:
//!
//! - [`EmpiricalSeries`]: one category per distinct value.
//! - [`GroupedSeries`]: Sturges binning into equal-width intervals; moments,
//!   mode and median are computed from the bins.
//!
//! # Examples
//!
//! ```
//! use u_distfit::series::{EmpiricalSeries, Series};
//!
//! let s = EmpiricalSeries::new(&[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 4.0]).unwrap();
//! assert!((s.mean() - 1.1).abs() < 1e-12);
//! assert_eq!(s.mode(), 0.0);
//! assert!((s.cumulative_value(1.0) - 0.7).abs() < 1e-12);
//! ```

mod empirical;
mod grouped;

pub use empirical::EmpiricalSeries;
pub use grouped::GroupedSeries;

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Categories and frequency tables
// ---------------------------------------------------------------------------

/// A frequency-table category: a single value or a half-open interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Category {
    /// An exact observed value.
    Value(f64),
    /// The interval `[lower, upper)`. The last bin of a grouped series also
    /// contains its upper border.
    Interval {
        /// Inclusive lower border.
        lower: f64,
        /// Upper border.
        upper: f64,
    },
}

impl Category {
    /// Lower end used for ordering and merging.
    pub fn start(&self) -> f64 {
        match *self {
            Category::Value(v) => v,
            Category::Interval { lower, .. } => lower,
        }
    }

    /// Upper end used when closing a merged category.
    pub fn end(&self) -> f64 {
        match *self {
            Category::Value(v) => v,
            Category::Interval { upper, .. } => upper,
        }
    }

    /// Representative point: the value itself or the interval midpoint.
    pub fn center(&self) -> f64 {
        match *self {
            Category::Value(v) => v,
            Category::Interval { lower, upper } => (lower + upper) / 2.0,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Value(v) => write!(f, "{v}"),
            Category::Interval { lower, upper } => write!(f, "[{lower}, {upper})"),
        }
    }
}

/// Ordered `(category, frequency)` pairs, ascending by category start.
///
/// Observed tables hold `usize` counts; projected tables hold `f64`
/// expected frequencies. Both use the same [`Category`] keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable<T> {
    entries: Vec<(Category, T)>,
}

impl<T> FrequencyTable<T> {
    /// Wraps `(category, frequency)` pairs, which should already be in
    /// ascending category order.
    pub fn new(entries: Vec<(Category, T)>) -> Self {
        Self { entries }
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table has no categories.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `(category, frequency)` pairs in order.
    pub fn entries(&self) -> &[(Category, T)] {
        &self.entries
    }

    /// Iterates the pairs in order.
    pub fn iter(&self) -> std::slice::Iter<'_, (Category, T)> {
        self.entries.iter()
    }

    /// The categories in order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.entries.iter().map(|(c, _)| c)
    }

    /// Looks a frequency up by its display key (`"2"`, `"[143, 148.375)"`).
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(c, _)| c.to_string() == key)
            .map(|(_, f)| f)
    }
}

impl<T: Copy> FrequencyTable<T> {
    /// The frequencies in category order.
    pub fn frequencies(&self) -> Vec<T> {
        self.entries.iter().map(|&(_, f)| f).collect()
    }
}

impl FrequencyTable<usize> {
    /// Sum of all counts; equals the sample size of the owning series.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, f)| f).sum()
    }
}

impl FrequencyTable<f64> {
    /// Sum of all expected frequencies.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|&(_, f)| f).sum()
    }
}

impl<'a, T> IntoIterator for &'a FrequencyTable<T> {
    type Item = &'a (Category, T);
    type IntoIter = std::slice::Iter<'a, (Category, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Series capability set
// ---------------------------------------------------------------------------

/// Capabilities shared by empirical and grouped series.
///
/// Implementors guarantee that [`data`](Series::data) is non-empty, finite
/// and ascending, so the provided methods never index out of bounds.
pub trait Series {
    /// The ascending-sorted sample.
    fn data(&self) -> &[f64];

    /// The sample in the order it was given.
    ///
    /// Order-sensitive procedures such as
    /// [`split_series_t_test`](crate::testing::split_series_t_test) read this.
    fn raw_data(&self) -> &[f64];

    /// Observed frequency table, ascending by category.
    fn frequency_table(&self) -> &FrequencyTable<usize>;

    /// Mean (population form).
    fn mean(&self) -> f64;

    /// Population variance (denominator `n`).
    fn variance(&self) -> f64;

    /// Most frequent value (empirical) or interpolated modal point (grouped).
    fn mode(&self) -> f64;

    /// Middle value (empirical) or interpolated median (grouped).
    fn median(&self) -> f64;

    /// Central moment of order `k`: Σ(x − x̄)ᵏ / n.
    fn central_moment(&self, k: i32) -> f64;

    /// Sample size.
    fn n(&self) -> usize {
        self.data().len()
    }

    /// Smallest observation.
    fn min(&self) -> f64 {
        self.data()[0]
    }

    /// Largest observation.
    fn max(&self) -> f64 {
        self.data()[self.data().len() - 1]
    }

    /// `max − min`.
    fn range(&self) -> f64 {
        self.max() - self.min()
    }

    /// Sample variance with Bessel's correction. `None` if `n < 2`.
    fn sample_variance(&self) -> Option<f64> {
        let n = self.n();
        if n < 2 {
            return None;
        }
        Some(self.variance() * n as f64 / (n - 1) as f64)
    }

    /// Population standard deviation.
    fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Sample standard deviation. `None` if `n < 2`.
    fn sample_standard_deviation(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }

    /// Standardized central moment μₖ / σᵏ.
    ///
    /// `None` when σ = 0, where the ratio is undefined.
    fn moment(&self, k: i32) -> Option<f64> {
        let sd = self.standard_deviation();
        if sd <= 0.0 {
            return None;
        }
        Some(self.central_moment(k) / sd.powi(k))
    }

    /// Skewness, the third standardized moment.
    fn skewness(&self) -> Option<f64> {
        self.moment(3)
    }

    /// Excess kurtosis, the fourth standardized moment minus 3.
    fn kurtosis(&self) -> Option<f64> {
        self.moment(4).map(|m| m - 3.0)
    }

    /// Fraction of observations `≤ x`.
    fn cumulative_value(&self, x: f64) -> f64 {
        let count = self.data().partition_point(|&v| v <= x);
        count as f64 / self.n() as f64
    }

    /// Number of observations strictly before each category.
    fn cumulative_counts(&self) -> Vec<usize> {
        let mut before = 0;
        self.frequency_table()
            .iter()
            .map(|&(_, count)| {
                let current = before;
                before += count;
                current
            })
            .collect()
    }

    /// `(category end, cumulative relative frequency)` per category.
    ///
    /// The step points of the empirical CDF for an empirical series, the
    /// ogive for a grouped one. The last point is always `(max, 1)`.
    fn ecdf_points(&self) -> Vec<(f64, f64)> {
        let n = self.n() as f64;
        let mut running = 0;
        self.frequency_table()
            .iter()
            .map(|&(category, count)| {
                running += count;
                (category.end(), running as f64 / n)
            })
            .collect()
    }

    /// `(category center, relative frequency)` per category.
    fn frequency_polygon(&self) -> Vec<(f64, f64)> {
        let n = self.n() as f64;
        self.frequency_table()
            .iter()
            .map(|&(category, count)| (category.center(), count as f64 / n))
            .collect()
    }
}

/// Validates and sorts raw input.
pub(crate) fn sorted_sample(data: &[f64]) -> crate::error::Result<Vec<f64>> {
    crate::error::check_sample(data)?;
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}
