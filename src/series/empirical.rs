//! Series keyed by exact observed value.

use serde::{Deserialize, Serialize};
use u_numflow::stats;

use super::{sorted_sample, Category, FrequencyTable, Series};
use crate::error::Result;

/// A sample whose frequency table has one category per distinct value.
///
/// Suited to discrete data (counts, scores). Mean, variance, mode and median
/// are computed once at construction.
///
/// # Examples
///
/// ```
/// use u_distfit::series::{EmpiricalSeries, Series};
///
/// let s = EmpiricalSeries::new(&[2.0, 0.0, 1.0, 4.0, 0.0]).unwrap();
/// assert_eq!(s.data(), &[0.0, 0.0, 1.0, 2.0, 4.0]);
/// assert_eq!(s.frequency_table().get("0"), Some(&2));
/// assert_eq!(s.median(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalSeries {
    data: Vec<f64>,
    raw_data: Vec<f64>,
    table: FrequencyTable<usize>,
    mean: f64,
    variance: f64,
    mode: f64,
    median: f64,
}

impl EmpiricalSeries {
    /// Builds the series from raw observations in any order.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyInput`](crate::StatsError::EmptyInput) or
    /// [`StatsError::NonFinite`](crate::StatsError::NonFinite).
    pub fn new(data: &[f64]) -> Result<Self> {
        let raw_data = data.to_vec();
        let data = sorted_sample(data)?;
        let table = value_table(&data);

        let mean = stats::mean(&data).unwrap_or_default();
        let variance = stats::population_variance(&data).unwrap_or_default();

        // Ascending scan with a strict comparison keeps the smallest of
        // several equally frequent values.
        let mut mode = data[0];
        let mut best = 0;
        for &(category, count) in table.iter() {
            if count > best {
                best = count;
                mode = category.start();
            }
        }

        let n = data.len();
        let mid = n / 2;
        let median = if n % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };

        Ok(Self {
            data,
            raw_data,
            table,
            mean,
            variance,
            mode,
            median,
        })
    }
}

/// Run-length counts over sorted data.
fn value_table(sorted: &[f64]) -> FrequencyTable<usize> {
    let mut entries: Vec<(Category, usize)> = Vec::new();
    for &v in sorted {
        match entries.last_mut() {
            Some((Category::Value(last), count)) if *last == v => *count += 1,
            _ => entries.push((Category::Value(v), 1)),
        }
    }
    FrequencyTable::new(entries)
}

impl Series for EmpiricalSeries {
    fn data(&self) -> &[f64] {
        &self.data
    }

    fn raw_data(&self) -> &[f64] {
        &self.raw_data
    }

    fn frequency_table(&self) -> &FrequencyTable<usize> {
        &self.table
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn variance(&self) -> f64 {
        self.variance
    }

    fn mode(&self) -> f64 {
        self.mode
    }

    fn median(&self) -> f64 {
        self.median
    }

    fn central_moment(&self, k: i32) -> f64 {
        let sum: f64 = self.data.iter().map(|&x| (x - self.mean).powi(k)).sum();
        sum / self.data.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatsError;

    fn small() -> EmpiricalSeries {
        EmpiricalSeries::new(&[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 4.0])
            .expect("should build")
    }

    #[test]
    fn basic_statistics() {
        let s = small();
        assert_eq!(s.n(), 10);
        assert_eq!(s.min(), 0.0);
        assert_eq!(s.max(), 4.0);
        assert_eq!(s.range(), 4.0);
        assert!((s.mean() - 1.1).abs() < 1e-12);
        assert!((s.variance() - 1.49).abs() < 1e-12);
        assert!((s.sample_variance().expect("n >= 2") - 1.49 * 10.0 / 9.0).abs() < 1e-12);
        assert_eq!(s.mode(), 0.0);
        assert_eq!(s.median(), 1.0);
    }

    #[test]
    fn raw_order_is_kept() {
        let raw = [2.0, 0.0, 1.0, 4.0, 0.0];
        let s = EmpiricalSeries::new(&raw).expect("should build");
        assert_eq!(s.raw_data(), &raw);
        assert_eq!(s.data(), &[0.0, 0.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn frequency_table_matches_counts() {
        let s = small();
        let t = s.frequency_table();
        assert_eq!(t.len(), 4);
        assert_eq!(t.get("0"), Some(&4));
        assert_eq!(t.get("1"), Some(&3));
        assert_eq!(t.get("2"), Some(&2));
        assert_eq!(t.get("4"), Some(&1));
        assert_eq!(t.total(), 10);
    }

    #[test]
    fn cumulative() {
        let s = small();
        assert_eq!(s.cumulative_value(-0.5), 0.0);
        assert!((s.cumulative_value(1.0) - 0.7).abs() < 1e-12);
        assert!((s.cumulative_value(3.0) - 0.9).abs() < 1e-12);
        assert_eq!(s.cumulative_value(4.0), 1.0);
        assert_eq!(s.cumulative_counts(), vec![0, 4, 7, 9]);
        let pts = s.ecdf_points();
        assert_eq!(pts.last().copied(), Some((4.0, 1.0)));
        assert!((pts[1].1 - 0.7).abs() < 1e-12);
    }

    #[test]
    fn mode_prefers_smallest_on_tie() {
        let s = EmpiricalSeries::new(&[3.0, 3.0, 1.0, 1.0, 2.0]).expect("should build");
        assert_eq!(s.mode(), 1.0);
    }

    #[test]
    fn even_median_averages_middle_pair() {
        let s = EmpiricalSeries::new(&[4.0, 1.0, 3.0, 2.0]).expect("should build");
        assert!((s.median() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn moments_of_symmetric_sample() {
        let s = EmpiricalSeries::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).expect("should build");
        assert!(s.skewness().expect("sd > 0").abs() < 1e-12);
        assert!((s.moment(2).expect("sd > 0") - 1.0).abs() < 1e-12);
        // Discrete uniform on 5 points: excess kurtosis = -1.3
        assert!((s.kurtosis().expect("sd > 0") + 1.3).abs() < 1e-12);
    }

    #[test]
    fn constant_sample_has_no_moments() {
        let s = EmpiricalSeries::new(&[2.0, 2.0, 2.0]).expect("should build");
        assert_eq!(s.variance(), 0.0);
        assert!(s.skewness().is_none());
        assert!(s.kurtosis().is_none());
    }

    #[test]
    fn single_value() {
        let s = EmpiricalSeries::new(&[7.0]).expect("should build");
        assert_eq!(s.mean(), 7.0);
        assert!(s.sample_variance().is_none());
        assert_eq!(s.cumulative_value(7.0), 1.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(EmpiricalSeries::new(&[]), Err(StatsError::EmptyInput));
        assert_eq!(
            EmpiricalSeries::new(&[1.0, f64::INFINITY]),
            Err(StatsError::NonFinite { index: 1 })
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn table_sums_to_n(data in proptest::collection::vec(-50i32..50, 1..=200)) {
            let data: Vec<f64> = data.into_iter().map(f64::from).collect();
            let s = EmpiricalSeries::new(&data).expect("finite input");
            prop_assert_eq!(s.frequency_table().total(), s.n());
        }

        #[test]
        fn cumulative_bounds(data in proptest::collection::vec(-1e3_f64..1e3, 1..=100)) {
            let s = EmpiricalSeries::new(&data).expect("finite input");
            prop_assert_eq!(s.cumulative_value(s.min() - 1e-6), 0.0);
            prop_assert_eq!(s.cumulative_value(s.max()), 1.0);
            prop_assert!(s.data().windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn mode_and_median_within_range(data in proptest::collection::vec(-1e3_f64..1e3, 1..=100)) {
            let s = EmpiricalSeries::new(&data).expect("finite input");
            prop_assert!(s.mode() >= s.min() && s.mode() <= s.max());
            prop_assert!(s.median() >= s.min() && s.median() <= s.max());
        }
    }
}
