//! Core statistical operations and traits
//!
//! [`StatOperation`] names every scalar statistic the crate computes, and
//! [`StatisticalReduction`] evaluates one over a slice or an `ndarray` array
//! of any shape. Arrays are reduced over all their elements.

use super::accumulators::Sample;
use super::descriptive::{max_with, mean_with, min_with, stdev_with, sum_with, variance_with};
use super::order::{median_with, percentile_with};
use crate::errors::Result;
use crate::parallel::ParallelConfig;
use ndarray::{ArrayBase, Data, Dimension};
use num_traits::AsPrimitive;
use std::fmt;
use std::str::FromStr;

/// Supported statistical operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatOperation {
    /// Sum of values
    Sum,
    /// Arithmetic mean
    Mean,
    /// Sample variance
    Variance,
    /// Sample standard deviation
    StdDev,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
    /// Median
    Median,
}

impl StatOperation {
    /// Every operation, in report order
    pub const ALL: [Self; 7] = [
        Self::Sum,
        Self::Mean,
        Self::Variance,
        Self::StdDev,
        Self::Min,
        Self::Max,
        Self::Median,
    ];

    /// Get the string representation of the operation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Variance => "variance",
            Self::StdDev => "stdev",
            Self::Min => "min",
            Self::Max => "max",
            Self::Median => "median",
        }
    }
}

impl fmt::Display for StatOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatOperation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "mean" | "avg" => Ok(Self::Mean),
            "variance" | "var" => Ok(Self::Variance),
            "stdev" | "std" | "stddev" => Ok(Self::StdDev),
            "min" | "minimum" => Ok(Self::Min),
            "max" | "maximum" => Ok(Self::Max),
            "median" => Ok(Self::Median),
            other => Err(format!(
                "Unknown statistic '{other}': expected one of sum, mean, variance, stdev, min, max, median"
            )),
        }
    }
}

/// Trait for collections that can be reduced to a single statistic
pub trait StatisticalReduction {
    /// Compute `operation` with an explicit parallel configuration.
    ///
    /// `Ok(None)` means the statistic is undefined for this data (empty
    /// input). `Sum` is always defined.
    ///
    /// # Errors
    ///
    /// Returns an error if `Median` is requested for data containing NaN.
    fn reduce_stat_with(
        &self,
        operation: StatOperation,
        config: &ParallelConfig,
    ) -> Result<Option<f64>>;

    /// Compute percentile `p` in `[0, 100]` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range `p` or data containing NaN.
    fn percentile_stat_with(&self, p: f64, config: &ParallelConfig) -> Result<Option<f64>>;

    /// Compute `operation` with the process-wide default configuration.
    ///
    /// # Errors
    ///
    /// See [`StatisticalReduction::reduce_stat_with`].
    fn reduce_stat(&self, operation: StatOperation) -> Result<Option<f64>> {
        self.reduce_stat_with(operation, &ParallelConfig::default())
    }
}

impl<T: Sample> StatisticalReduction for [T] {
    fn reduce_stat_with(
        &self,
        operation: StatOperation,
        config: &ParallelConfig,
    ) -> Result<Option<f64>> {
        Ok(match operation {
            StatOperation::Sum => Some(sum_with(self, config)),
            StatOperation::Mean => mean_with(self, config),
            StatOperation::Variance => variance_with(self, config),
            StatOperation::StdDev => stdev_with(self, config),
            StatOperation::Min => min_with(self, config).map(|v| v.as_()),
            StatOperation::Max => max_with(self, config).map(|v| v.as_()),
            StatOperation::Median => return median_with(self, config),
        })
    }

    fn percentile_stat_with(&self, p: f64, config: &ParallelConfig) -> Result<Option<f64>> {
        percentile_with(self, p, config)
    }
}

impl<A, S, D> StatisticalReduction for ArrayBase<S, D>
where
    A: Sample,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn reduce_stat_with(
        &self,
        operation: StatOperation,
        config: &ParallelConfig,
    ) -> Result<Option<f64>> {
        match self.as_slice_memory_order() {
            Some(contiguous) => contiguous.reduce_stat_with(operation, config),
            None => {
                let copy: Vec<A> = self.iter().copied().collect();
                copy.as_slice().reduce_stat_with(operation, config)
            }
        }
    }

    fn percentile_stat_with(&self, p: f64, config: &ParallelConfig) -> Result<Option<f64>> {
        match self.as_slice_memory_order() {
            Some(contiguous) => percentile_with(contiguous, p, config),
            None => {
                let copy: Vec<A> = self.iter().copied().collect();
                percentile_with(&copy, p, config)
            }
        }
    }
}
