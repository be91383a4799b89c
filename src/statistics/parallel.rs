//! Fork-join reduction over contiguous chunks
//!
//! The array is split by [`partition_for`], one Rayon task runs per chunk,
//! and the caller blocks until every task has finished. Partial states are
//! collected in chunk order and folded left to right, so the result does not
//! depend on which worker finished first.
//!
//! There is no cancellation. A worker that never returns blocks the caller
//! forever.

use super::accumulators::Merge;
use super::partition::{partition_for, Chunk};
use crate::parallel::ParallelConfig;
use rayon::prelude::*;
use std::convert::Infallible;
use tracing::{debug, instrument, trace};

/// Reduce `length` elements with a fallible per-chunk worker.
///
/// `partial` receives each chunk's index range and returns that chunk's
/// state. Returns `Ok(None)` when `length` is zero. If any worker fails,
/// chunks not yet started are skipped, one of the errors is returned and
/// every partial state is dropped unmerged.
///
/// A plan with a single chunk runs on the calling thread.
///
/// # Errors
///
/// Propagates the error of a failing worker.
#[instrument(level = "debug", skip_all, fields(length = length))]
pub fn try_reduce_chunks<P, E, F>(
    length: usize,
    config: &ParallelConfig,
    partial: F,
) -> Result<Option<P>, E>
where
    P: Merge + Send,
    E: Send,
    F: Fn(Chunk) -> Result<P, E> + Sync,
{
    let chunks = partition_for(length, config);

    match chunks.as_slice() {
        [] => return Ok(None),
        [only] => {
            debug!("single chunk, reducing on the calling thread");
            return partial(*only).map(Some);
        }
        _ => {}
    }

    debug!(
        chunks = chunks.len(),
        chunk_len = chunks[0].len(),
        "dispatching chunk workers"
    );

    let partials = chunks
        .par_iter()
        .map(|&chunk| {
            trace!(start = chunk.start, end = chunk.end, "chunk worker");
            partial(chunk)
        })
        .collect::<Result<Vec<P>, E>>()?;

    Ok(partials.into_iter().reduce(Merge::merge))
}

/// Reduce `length` elements with an infallible per-chunk worker.
pub fn reduce_chunks<P, F>(length: usize, config: &ParallelConfig, partial: F) -> Option<P>
where
    P: Merge + Send,
    F: Fn(Chunk) -> P + Sync,
{
    try_reduce_chunks::<P, Infallible, _>(length, config, |chunk| Ok(partial(chunk)))
        .unwrap_or_else(|never| match never {})
}

/// Reduce a slice, handing each worker its sub-slice.
pub fn reduce_slice<T, P, F>(data: &[T], config: &ParallelConfig, partial: F) -> Option<P>
where
    T: Sync,
    P: Merge + Send,
    F: Fn(&[T]) -> P + Sync,
{
    reduce_chunks(data.len(), config, |chunk| partial(&data[chunk.range()]))
}
