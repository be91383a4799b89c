//! Parallel processing configuration and management
//!
//! Every reduction takes a [`ParallelConfig`]. The convenience functions in
//! [`crate::statistics`] build one from the process-wide default thread cap,
//! which is seeded from the number of logical cores the first time it is read
//! and can be changed at any time with [`set_max_threads`].
//!
//! The process-wide value is read with relaxed ordering and is not guarded by
//! a lock. A reduction that races a concurrent [`set_max_threads`] may see the
//! old value; the thread cap only affects how work is split, never the result.

use crate::errors::{Result, StatsError};
use rayon::ThreadPoolBuilder;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Minimum number of elements a chunk worker should receive
pub const DEFAULT_MIN_CHUNK_LEN: usize = 1000;

/// Slices shorter than this are always sorted on the calling thread
pub const DEFAULT_SORT_GRAIN: usize = 256;

// Zero means "not read yet".
static MAX_THREADS: AtomicUsize = AtomicUsize::new(0);

/// Returns the process-wide thread cap used by [`ParallelConfig::default`].
pub fn max_threads() -> usize {
    match MAX_THREADS.load(Ordering::Relaxed) {
        0 => {
            let cores = num_cpus::get().max(1);
            // A concurrent set_max_threads wins over the seed.
            match MAX_THREADS.compare_exchange(0, cores, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => cores,
                Err(current) => current,
            }
        }
        n => n,
    }
}

/// Overrides the process-wide thread cap.
///
/// # Errors
///
/// Returns [`StatsError::InvalidParameter`] if `num_threads` is zero.
pub fn set_max_threads(num_threads: usize) -> Result<()> {
    if num_threads == 0 {
        return Err(StatsError::invalid("max_threads", "thread cap must be at least 1"));
    }
    MAX_THREADS.store(num_threads, Ordering::Relaxed);
    debug!(num_threads, "process-wide thread cap updated");
    Ok(())
}

/// Configuration for parallel processing
///
/// All fields are validated on construction, so a `ParallelConfig` value is
/// always usable and reductions never have to re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    max_threads: usize,
    min_chunk_len: usize,
    sort_grain: usize,
}

impl ParallelConfig {
    /// Create a configuration capped at `max_threads` workers
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidParameter`] if `max_threads` is zero.
    pub fn new(max_threads: usize) -> Result<Self> {
        if max_threads == 0 {
            return Err(StatsError::invalid("max_threads", "thread cap must be at least 1"));
        }
        Ok(Self {
            max_threads,
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            sort_grain: DEFAULT_SORT_GRAIN,
        })
    }

    /// Create a configuration that never splits the work
    #[must_use]
    pub fn single_threaded() -> Self {
        Self {
            max_threads: 1,
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            sort_grain: DEFAULT_SORT_GRAIN,
        }
    }

    /// Create a configuration that uses all available CPU cores
    #[must_use]
    pub fn all_cores() -> Self {
        Self {
            max_threads: num_cpus::get().max(1),
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            sort_grain: DEFAULT_SORT_GRAIN,
        }
    }

    /// Set the minimum number of elements per chunk worker
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidParameter`] if `min_chunk_len` is zero.
    pub fn with_min_chunk_len(mut self, min_chunk_len: usize) -> Result<Self> {
        if min_chunk_len == 0 {
            return Err(StatsError::invalid("min_chunk_len", "chunk length must be at least 1"));
        }
        self.min_chunk_len = min_chunk_len;
        Ok(self)
    }

    /// Set the slice length below which sorting stays on one thread
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidParameter`] if `sort_grain` is zero.
    pub fn with_sort_grain(mut self, sort_grain: usize) -> Result<Self> {
        if sort_grain == 0 {
            return Err(StatsError::invalid("sort_grain", "sort grain must be at least 1"));
        }
        self.sort_grain = sort_grain;
        Ok(self)
    }

    #[must_use]
    pub const fn max_threads(&self) -> usize {
        self.max_threads
    }

    #[must_use]
    pub const fn min_chunk_len(&self) -> usize {
        self.min_chunk_len
    }

    #[must_use]
    pub const fn sort_grain(&self) -> usize {
        self.sort_grain
    }

    /// Size Rayon's global thread pool to this configuration's thread cap
    ///
    /// # Errors
    ///
    /// The global pool can only be built once per process, and Rayon builds
    /// it implicitly on first use. Any later call returns
    /// [`StatsError::ThreadPoolError`].
    pub fn setup_global_pool(&self) -> Result<()> {
        ThreadPoolBuilder::new()
            .num_threads(self.max_threads)
            .build_global()?;

        info!(threads = self.max_threads, "configured global thread pool");
        Ok(())
    }

    /// Get the current number of threads in Rayon's pool
    pub fn current_threads(&self) -> usize {
        rayon::current_num_threads()
    }
}

impl Default for ParallelConfig {
    /// Snapshot of the process-wide thread cap with default tunables
    fn default() -> Self {
        Self {
            max_threads: max_threads(),
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            sort_grain: DEFAULT_SORT_GRAIN,
        }
    }
}

/// Get information about the current parallel configuration
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        available_parallelism: std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
        max_threads: max_threads(),
    }
}

/// Information about the parallel processing environment
#[derive(Debug, Clone)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub available_parallelism: usize,
    pub max_threads: usize,
}

impl ParallelInfo {
    /// Print parallel processing information
    pub fn print_info(&self) {
        println!("📊 Parallel Processing Information:");
        println!("   Rayon pool threads: {}", self.current_threads);
        println!("   Available CPU cores: {}", self.available_cores);
        println!("   Available parallelism: {}", self.available_parallelism);
        println!("   Reduction thread cap: {}", self.max_threads);
    }
}
