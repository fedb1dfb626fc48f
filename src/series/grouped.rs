//! Series binned into equal-width intervals.

use serde::{Deserialize, Serialize};

use super::{sorted_sample, Category, FrequencyTable, Series};
use crate::error::{check_len, Result, StatsError};

/// A sample grouped into `⌊1 + log₂ n⌋` equal-width intervals (Sturges).
///
/// Value `v` falls into bin `min(⌊(v − min) / h⌋, k − 1)`, where `h` is the
/// interval length and `k` the interval count, so the maximum lands in the
/// last bin. Mean, variance and moments are computed from bin centers
/// weighted by bin counts. Mode and median use the classic interpolation
/// formulas inside the modal and median bins.
///
/// # References
///
/// Sturges (1926). "The choice of a class interval". *JASA*, 21(153), 65–66.
///
/// # Examples
///
/// ```
/// use u_distfit::series::{GroupedSeries, Series};
///
/// let data: Vec<f64> = (0..16).map(f64::from).collect();
/// let s = GroupedSeries::new(&data).unwrap();
/// assert_eq!(s.interval_count(), 5);
/// assert!((s.interval_length() - 3.0).abs() < 1e-12);
/// assert_eq!(s.frequency_table().total(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedSeries {
    data: Vec<f64>,
    raw_data: Vec<f64>,
    interval_count: usize,
    interval_length: f64,
    borders: Vec<f64>,
    centers: Vec<f64>,
    counts: Vec<usize>,
    table: FrequencyTable<usize>,
    mean: f64,
    variance: f64,
    mode: f64,
    median: f64,
}

impl GroupedSeries {
    /// Builds the grouped series from raw observations in any order.
    ///
    /// # Errors
    ///
    /// - [`StatsError::EmptyInput`] / [`StatsError::NonFinite`] for bad input.
    /// - [`StatsError::TooFewObservations`] if `n < 2`.
    /// - [`StatsError::ZeroRange`] if all observations are equal.
    pub fn new(data: &[f64]) -> Result<Self> {
        let raw_data = data.to_vec();
        let data = sorted_sample(data)?;
        check_len(&data, 2)?;

        let n = data.len();
        let min = data[0];
        let max = data[n - 1];
        let range = max - min;
        if range <= 0.0 {
            return Err(StatsError::ZeroRange);
        }

        let interval_count = (1.0 + (n as f64).log2()).floor() as usize;
        let interval_length = range / interval_count as f64;

        let mut borders: Vec<f64> = (0..=interval_count)
            .map(|i| min + i as f64 * interval_length)
            .collect();
        // Pin the last border so the table spans exactly [min, max].
        borders[interval_count] = max;

        let centers: Vec<f64> = borders.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();

        let mut counts = vec![0usize; interval_count];
        for &v in &data {
            let idx = (((v - min) / interval_length).floor() as usize).min(interval_count - 1);
            counts[idx] += 1;
        }

        let table = FrequencyTable::new(
            borders
                .windows(2)
                .zip(counts.iter())
                .map(|(w, &c)| {
                    (
                        Category::Interval {
                            lower: w[0],
                            upper: w[1],
                        },
                        c,
                    )
                })
                .collect(),
        );

        let nf = n as f64;
        let mean = centers
            .iter()
            .zip(counts.iter())
            .map(|(&c, &f)| c * f as f64)
            .sum::<f64>()
            / nf;
        let variance = centers
            .iter()
            .zip(counts.iter())
            .map(|(&c, &f)| (c - mean).powi(2) * f as f64)
            .sum::<f64>()
            / nf;

        let mode = interpolated_mode(&borders, &counts, interval_length);
        let median = interpolated_median(&borders, &counts, interval_length, nf);

        Ok(Self {
            data,
            raw_data,
            interval_count,
            interval_length,
            borders,
            centers,
            counts,
            table,
            mean,
            variance,
            mode,
            median,
        })
    }

    /// Number of intervals, `⌊1 + log₂ n⌋`.
    pub fn interval_count(&self) -> usize {
        self.interval_count
    }

    /// Width of each interval, `range / interval_count`.
    pub fn interval_length(&self) -> f64 {
        self.interval_length
    }

    /// The `interval_count + 1` breakpoints, starting at `min`.
    pub fn interval_borders(&self) -> &[f64] {
        &self.borders
    }

    /// Midpoint of each interval.
    pub fn bin_centers(&self) -> &[f64] {
        &self.centers
    }

    /// Count of each interval.
    pub fn bin_counts(&self) -> &[usize] {
        &self.counts
    }
}

/// Mode = L + h·(f − f₋) / ((f − f₋) + (f − f₊)) in the first modal bin.
///
/// Falls back to the bin midpoint when the denominator vanishes.
fn interpolated_mode(borders: &[f64], counts: &[usize], h: f64) -> f64 {
    let mut idx = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[idx] {
            idx = i;
        }
    }
    let f = counts[idx] as f64;
    let prev = if idx > 0 { counts[idx - 1] as f64 } else { 0.0 };
    let next = counts.get(idx + 1).map_or(0.0, |&c| c as f64);

    let denom = (f - prev) + (f - next);
    if denom == 0.0 {
        return borders[idx] + h / 2.0;
    }
    borders[idx] + h * (f - prev) / denom
}

/// Median = L + (n/2 − F₋) / f · h in the first bin whose cumulative count
/// reaches n/2.
fn interpolated_median(borders: &[f64], counts: &[usize], h: f64, n: f64) -> f64 {
    let target = n / 2.0;
    let mut before = 0.0;
    for (i, &c) in counts.iter().enumerate() {
        let c = c as f64;
        if before + c >= target && c > 0.0 {
            return borders[i] + (target - before) / c * h;
        }
        before += c;
    }
    borders[borders.len() - 1]
}

impl Series for GroupedSeries {
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
        let sum: f64 = self
            .centers
            .iter()
            .zip(self.counts.iter())
            .map(|(&c, &f)| (c - self.mean).powi(k) * f as f64)
            .sum();
        sum / self.data.len() as f64
    }
}
