//! Statistical computations and parallel reduction operations
//!
//! # Organization
//!
//! - [`partition`]: splitting an array into contiguous chunks
//! - [`accumulators`]: per-chunk partial states and their merge rules
//! - [`parallel`]: the fork-join orchestrator that ties the two together
//! - [`descriptive`]: sum, mean, variance, standard deviation, min and max
//! - [`sort`] and [`order`]: parallel sort, median and percentile
//! - [`operations`]: operation names and the [`StatisticalReduction`] trait

pub mod accumulators;
pub mod descriptive;
pub mod operations;
pub mod order;
pub mod parallel;
pub mod partition;
pub mod sort;

// Re-export the main types and functions for convenience
pub use accumulators::{Merge, MinMax, Moments, Sample, Sum, WeightedSum};
pub use descriptive::{
    max, max_with, mean, mean_with, min, min_with, minmax, minmax_with, moments, moments_with,
    running_mean, stdev, stdev_with, sum, sum_with, variance, variance_with, weighted_mean,
    weighted_mean_with,
};
pub use operations::{StatOperation, StatisticalReduction};
pub use order::{median, median_with, percentile, percentile_with, SortedSample};
pub use parallel::{reduce_chunks, reduce_slice, try_reduce_chunks};
pub use partition::{partition, partition_for, partition_with_min_len, Chunk};
pub use sort::parallel_sort;
