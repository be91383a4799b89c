//! Order statistics: median and percentile
//!
//! These are not built from mergeable partial states. The data is copied,
//! the copy is sorted with [`parallel_sort`], and the statistic is read off
//! the sorted values. The caller's slice is never modified.

use super::accumulators::Sample;
use super::sort::parallel_sort;
use crate::errors::{Result, StatsError};
use crate::parallel::ParallelConfig;
use num_traits::AsPrimitive;

/// A sorted private copy of a sample, converted to `f64`
///
/// Sort once, then read as many order statistics as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSample {
    values: Vec<f64>,
}

impl SortedSample {
    /// Copy and sort `data`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::UnorderedValue`] if `data` contains NaN.
    pub fn new<T: Sample>(data: &[T], config: &ParallelConfig) -> Result<Self> {
        let mut values: Vec<f64> = data.iter().map(|&x| x.as_()).collect();
        parallel_sort(&mut values, config)?;
        Ok(Self { values })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Middle value, or the mean of the two middle values for an even count
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        let n = self.values.len();
        if n == 0 {
            return None;
        }
        let half = n / 2;
        if n % 2 == 0 {
            Some((self.values[half - 1] + self.values[half]) / 2.0)
        } else {
            Some(self.values[half])
        }
    }

    /// Percentile `p` in `[0, 100]`.
    ///
    /// Uses the fractional rank `d = p / 100 * (n + 1)` (1-based) and
    /// interpolates linearly between the order statistics at `floor(d)` and
    /// `ceil(d)`, both clamped to the first and last element.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidParameter`] if `p` is outside `[0, 100]`
    /// or NaN.
    pub fn percentile(&self, p: f64) -> Result<Option<f64>> {
        check_percentile(p)?;
        Ok(self.rank(p))
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn rank(&self, p: f64) -> Option<f64> {
        let n = self.values.len();
        if n == 0 {
            return None;
        }

        let d = p / 100.0 * (n + 1) as f64;
        let lower = (d.floor() as usize).saturating_sub(1).min(n - 1);
        let upper = (d.ceil() as usize).saturating_sub(1).min(n - 1);

        let low = self.values[lower];
        if lower == upper {
            Some(low)
        } else {
            Some(low + (d - d.floor()) * (self.values[upper] - low))
        }
    }
}

fn check_percentile(p: f64) -> Result<()> {
    if (0.0..=100.0).contains(&p) {
        Ok(())
    } else {
        Err(StatsError::invalid(
            "p",
            format!("percentile must be within [0, 100], got {p}"),
        ))
    }
}

/// Median of `data`; `None` for an empty slice.
///
/// # Errors
///
/// Returns [`StatsError::UnorderedValue`] if `data` contains NaN.
pub fn median<T: Sample>(data: &[T]) -> Result<Option<f64>> {
    median_with(data, &ParallelConfig::default())
}

/// [`median`] with an explicit parallel configuration.
///
/// # Errors
///
/// Returns [`StatsError::UnorderedValue`] if `data` contains NaN.
pub fn median_with<T: Sample>(data: &[T], config: &ParallelConfig) -> Result<Option<f64>> {
    Ok(SortedSample::new(data, config)?.median())
}

/// Percentile `p` (in `[0, 100]`) of `data`; `None` for an empty slice.
///
/// ```
/// let data = [15, 20, 35, 40, 50];
/// assert_eq!(parstats::percentile(&data, 50.0).unwrap(), Some(35.0));
/// assert_eq!(parstats::percentile(&data, 0.0).unwrap(), Some(15.0));
/// assert!(parstats::percentile(&data, 101.0).is_err());
/// ```
///
/// # Errors
///
/// Returns [`StatsError::InvalidParameter`] for an out-of-range `p` (checked
/// before anything is copied) and [`StatsError::UnorderedValue`] if `data`
/// contains NaN.
pub fn percentile<T: Sample>(data: &[T], p: f64) -> Result<Option<f64>> {
    percentile_with(data, p, &ParallelConfig::default())
}

/// [`percentile`] with an explicit parallel configuration.
///
/// # Errors
///
/// See [`percentile`].
pub fn percentile_with<T: Sample>(
    data: &[T],
    p: f64,
    config: &ParallelConfig,
) -> Result<Option<f64>> {
    check_percentile(p)?;
    Ok(SortedSample::new(data, config)?.rank(p))
}
