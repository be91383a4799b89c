//! Splitting an array into contiguous chunks, one per worker
//!
//! A plan gives each worker roughly `min_chunk_len` elements (1000 by
//! default), never fewer than one worker and never more than the thread cap.
//! Every chunk except the last holds exactly `length / workers` elements; the
//! last chunk absorbs the remainder so the plan always ends at `length`.

use crate::errors::{Result, StatsError};
use crate::parallel::{ParallelConfig, DEFAULT_MIN_CHUNK_LEN};
use std::ops::Range;

/// Half-open index range `[start, end)` handed to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Partition `length` elements for at most `thread_cap` workers using the
/// default chunk length.
///
/// An empty array yields no chunks.
///
/// # Errors
///
/// Returns [`StatsError::InvalidParameter`] if `thread_cap` is zero.
pub fn partition(length: usize, thread_cap: usize) -> Result<Vec<Chunk>> {
    partition_with_min_len(length, thread_cap, DEFAULT_MIN_CHUNK_LEN)
}

/// Partition `length` elements for at most `thread_cap` workers, aiming for
/// `min_chunk_len` elements per worker.
///
/// # Errors
///
/// Returns [`StatsError::InvalidParameter`] if `thread_cap` or
/// `min_chunk_len` is zero.
pub fn partition_with_min_len(
    length: usize,
    thread_cap: usize,
    min_chunk_len: usize,
) -> Result<Vec<Chunk>> {
    if thread_cap == 0 {
        return Err(StatsError::invalid("thread_cap", "thread cap must be at least 1"));
    }
    if min_chunk_len == 0 {
        return Err(StatsError::invalid("min_chunk_len", "chunk length must be at least 1"));
    }
    Ok(plan(length, thread_cap, min_chunk_len))
}

/// Partition `length` elements according to an already validated config.
#[must_use]
pub fn partition_for(length: usize, config: &ParallelConfig) -> Vec<Chunk> {
    plan(length, config.max_threads(), config.min_chunk_len())
}

fn plan(length: usize, thread_cap: usize, min_chunk_len: usize) -> Vec<Chunk> {
    if length == 0 {
        return Vec::new();
    }

    let workers = (length / min_chunk_len).clamp(1, thread_cap);
    let step = length / workers;

    (0..workers)
        .map(|worker| {
            let start = worker * step;
            let end = if worker + 1 == workers { length } else { start + step };
            Chunk { start, end }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(chunks: &[Chunk], length: usize) {
        let mut expected_start = 0;
        for chunk in chunks {
            assert_eq!(chunk.start, expected_start);
            assert!(!chunk.is_empty());
            expected_start = chunk.end;
        }
        assert_eq!(expected_start, length);
    }

    #[test]
    fn empty_array_has_no_chunks() {
        assert!(partition(0, 8).unwrap().is_empty());
    }

    #[test]
    fn small_array_is_one_chunk() {
        let chunks = partition(999, 8).unwrap();
        assert_eq!(chunks, vec![Chunk { start: 0, end: 999 }]);
    }

    #[test]
    fn one_worker_per_thousand_elements() {
        let chunks = partition(3_500, 8).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1_166);
        assert_eq!(chunks[1].len(), 1_166);
        assert_eq!(chunks[2].len(), 1_168);
        assert_covers(&chunks, 3_500);
    }

    #[test]
    fn worker_count_is_capped() {
        let chunks = partition(1_000_003, 4).unwrap();
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[3].end, 1_000_003);
        assert_covers(&chunks, 1_000_003);
    }

    #[test]
    fn custom_chunk_length() {
        let chunks = partition_with_min_len(10, 16, 3).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2], Chunk { start: 6, end: 10 });
        assert_covers(&chunks, 10);
    }

    #[test]
    fn zero_thread_cap_is_rejected() {
        assert!(matches!(
            partition(10, 0),
            Err(StatsError::InvalidParameter { name: "thread_cap", .. })
        ));
        assert!(partition_with_min_len(10, 1, 0).is_err());
    }
}
