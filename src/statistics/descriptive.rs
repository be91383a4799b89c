//! Sum, mean, variance, standard deviation and extremes
//!
//! Each statistic pairs a per-chunk reducer from [`super::accumulators`] with
//! its merge rule and hands both to the chunk orchestrator. The plain
//! functions use [`ParallelConfig::default`]; the `*_with` variants take the
//! configuration explicitly.
//!
//! Empty input gives `None` for everything except [`sum`], which is `0.0`.

use super::accumulators::{MinMax, Moments, Sample, Sum, WeightedSum};
use super::parallel::{reduce_chunks, reduce_slice};
use crate::errors::{Result, StatsError};
use crate::parallel::ParallelConfig;
use num_traits::AsPrimitive;

/// Sum of all elements; `0.0` for an empty slice.
pub fn sum<T: Sample>(data: &[T]) -> f64 {
    sum_with(data, &ParallelConfig::default())
}

pub fn sum_with<T: Sample>(data: &[T], config: &ParallelConfig) -> f64 {
    reduce_slice(data, config, Sum::from_slice).map_or(0.0, |total| total.0)
}

/// Merged Welford state of the whole slice
pub fn moments<T: Sample>(data: &[T]) -> Moments {
    moments_with(data, &ParallelConfig::default())
}

pub fn moments_with<T: Sample>(data: &[T], config: &ParallelConfig) -> Moments {
    reduce_slice(data, config, Moments::from_slice).unwrap_or_default()
}

/// Arithmetic mean.
///
/// ```
/// let heights = [1.47, 1.50, 1.52, 1.55, 1.57, 1.60, 1.63, 1.65];
/// let mean = parstats::mean(&heights).unwrap();
/// assert!((mean - 1.56125).abs() < 1e-12);
/// assert_eq!(parstats::mean::<f64>(&[]), None);
/// ```
pub fn mean<T: Sample>(data: &[T]) -> Option<f64> {
    mean_with(data, &ParallelConfig::default())
}

pub fn mean_with<T: Sample>(data: &[T], config: &ParallelConfig) -> Option<f64> {
    match data {
        [] => None,
        [only] => Some(only.as_()),
        _ => moments_with(data, config).mean(),
    }
}

/// Sample variance (divides by `n - 1`); `Some(0.0)` for a single element.
pub fn variance<T: Sample>(data: &[T]) -> Option<f64> {
    variance_with(data, &ParallelConfig::default())
}

pub fn variance_with<T: Sample>(data: &[T], config: &ParallelConfig) -> Option<f64> {
    match data {
        [] => None,
        [_] => Some(0.0),
        _ => moments_with(data, config).variance(),
    }
}

/// Sample standard deviation, the square root of [`variance`].
pub fn stdev<T: Sample>(data: &[T]) -> Option<f64> {
    stdev_with(data, &ParallelConfig::default())
}

pub fn stdev_with<T: Sample>(data: &[T], config: &ParallelConfig) -> Option<f64> {
    variance_with(data, config).map(f64::sqrt)
}

/// Smallest and largest element as `(min, max)`.
///
/// Comparisons use `<` and `>`, so a NaN is only reported when it seeds a
/// chunk.
pub fn minmax<T: Sample>(data: &[T]) -> Option<(T, T)> {
    minmax_with(data, &ParallelConfig::default())
}

pub fn minmax_with<T: Sample>(data: &[T], config: &ParallelConfig) -> Option<(T, T)> {
    match data {
        [] => None,
        [only] => Some((*only, *only)),
        _ => reduce_slice(data, config, MinMax::from_slice)
            .flatten()
            .map(|state| (state.min, state.max)),
    }
}

pub fn min<T: Sample>(data: &[T]) -> Option<T> {
    min_with(data, &ParallelConfig::default())
}

pub fn min_with<T: Sample>(data: &[T], config: &ParallelConfig) -> Option<T> {
    minmax_with(data, config).map(|(min, _)| min)
}

pub fn max<T: Sample>(data: &[T]) -> Option<T> {
    max_with(data, &ParallelConfig::default())
}

pub fn max_with<T: Sample>(data: &[T], config: &ParallelConfig) -> Option<T> {
    minmax_with(data, config).map(|(_, max)| max)
}

/// Fold one more sample into a running mean.
///
/// `count` is the number of samples seen including `value`, so the first
/// call passes `count == 1` and any `previous_mean`.
///
/// ```
/// let mut mean = 0.0;
/// for (i, x) in [2.0, 4.0, 9.0].into_iter().enumerate() {
///     mean = parstats::running_mean(mean, x, i + 1).unwrap();
/// }
/// assert_eq!(mean, 5.0);
/// ```
///
/// # Errors
///
/// Returns [`StatsError::InvalidParameter`] if `count` is zero.
#[allow(clippy::cast_precision_loss)]
pub fn running_mean(previous_mean: f64, value: f64, count: usize) -> Result<f64> {
    if count == 0 {
        return Err(StatsError::invalid(
            "count",
            "count includes the new value and must be at least 1",
        ));
    }
    Ok(previous_mean + (value - previous_mean) / count as f64)
}

/// Mean of `values` weighted by `weights`.
///
/// `None` for empty input or when the weights sum to zero.
///
/// # Errors
///
/// Returns [`StatsError::InvalidParameter`] if the slices differ in length
/// or a weight is negative or NaN.
pub fn weighted_mean<T: Sample, W: Sample>(values: &[T], weights: &[W]) -> Result<Option<f64>> {
    weighted_mean_with(values, weights, &ParallelConfig::default())
}

/// [`weighted_mean`] with an explicit parallel configuration.
///
/// # Errors
///
/// See [`weighted_mean`].
pub fn weighted_mean_with<T: Sample, W: Sample>(
    values: &[T],
    weights: &[W],
    config: &ParallelConfig,
) -> Result<Option<f64>> {
    if values.len() != weights.len() {
        return Err(StatsError::invalid(
            "weights",
            format!(
                "{} weights given for {} values",
                weights.len(),
                values.len()
            ),
        ));
    }
    if let Some(index) = weights.iter().position(|&w| {
        let w: f64 = w.as_();
        w.is_nan() || w < 0.0
    }) {
        return Err(StatsError::invalid(
            "weights",
            format!("weight at index {index} is negative or NaN"),
        ));
    }

    Ok(reduce_chunks(values.len(), config, |chunk| {
        WeightedSum::from_slices(&values[chunk.range()], &weights[chunk.range()])
    })
    .and_then(|totals| totals.mean()))
}
