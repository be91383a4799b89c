//! parstats: parallel statistical aggregates over in-memory numeric arrays
//!
//! Sum, mean, variance, standard deviation, min/max, median and percentile
//! for slices of any primitive numeric type (and for `ndarray` arrays).
//! Large inputs are split into contiguous chunks, each chunk is reduced to a
//! small partial state on its own worker, and the partial states are merged
//! with numerically stable formulas (Welford's algorithm and its parallel
//! merge for mean and variance).
//!
//! ## Key Features
//!
//! - **Parallel Processing**: chunked fork-join reductions on Rayon
//! - **Stable Merging**: parallel Welford merge, no sum-of-squares cancellation
//! - **Explicit Edge Cases**: undefined statistics are `None`, bad parameters are errors
//! - **Order Statistics**: median and percentile over a sorted private copy
//!
//! ## Module Organization
//!
//! - [`statistics`]: partitioning, partial states, the orchestrator and the statistics
//! - [`parallel`]: parallel processing configuration
//! - [`data_source`]: reading numeric samples from text
//! - [`errors`]: centralized error handling
//!
//! ## Usage Example
//!
//! ```rust
//! use parstats::prelude::*;
//!
//! let heights = [1.47, 1.50, 1.52, 1.55, 1.57, 1.60, 1.63, 1.65, 1.68, 1.70];
//!
//! let mean = parstats::mean(&heights).unwrap();
//! let spread = parstats::stdev(&heights).unwrap();
//! assert!(mean > 1.5 && spread > 0.0);
//!
//! // Pin the thread cap for one call without touching the process default
//! let config = ParallelConfig::new(2)?;
//! assert_eq!(parstats::sum_with(&[1_u32, 2, 3], &config), 6.0);
//! assert_eq!(parstats::mean::<f64>(&[]), None);
//! # Ok::<(), parstats::StatsError>(())
//! ```

// Core modules
pub mod data_source;
pub mod errors;
pub mod parallel;
pub mod statistics;

// Direct re-exports for the public API
pub use data_source::*;
pub use errors::*;
pub use parallel::*;
pub use statistics::{
    max, max_with, mean, mean_with, median, median_with, min, min_with, minmax, minmax_with,
    moments, moments_with, parallel_sort, percentile, percentile_with, running_mean, stdev,
    stdev_with, sum, sum_with, variance, variance_with, weighted_mean, weighted_mean_with,
    Moments, SortedSample, StatOperation, StatisticalReduction,
};

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{Result, StatsError};
    pub use crate::parallel::{max_threads, set_max_threads, ParallelConfig};
    pub use crate::statistics::{
        Merge, Moments, Sample, SortedSample, StatOperation, StatisticalReduction,
    };
}
