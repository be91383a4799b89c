//! Fork-join merge sort
//!
//! The slice is cut into runs by the same chunk plan the reductions use, with
//! `sort_grain` standing in for the minimum chunk length. The runs are sorted
//! concurrently on Rayon, then neighbouring runs are merged pairwise up a
//! [`rayon::join`] tree through a scratch buffer. At most `max_threads` runs
//! are sorted at once.

use super::partition::{partition_with_min_len, Chunk};
use crate::errors::{Result, StatsError};
use crate::parallel::ParallelConfig;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Sort `data` ascending.
///
/// # Errors
///
/// Returns [`StatsError::UnorderedValue`] if an element is not comparable
/// with itself (a NaN). The slice is left untouched in that case.
pub fn parallel_sort<T>(data: &mut [T], config: &ParallelConfig) -> Result<()>
where
    T: PartialOrd + Copy + Send,
{
    if let Some(index) = data.iter().position(|x| x.partial_cmp(x).is_none()) {
        return Err(StatsError::UnorderedValue { index });
    }

    let runs = partition_with_min_len(data.len(), config.max_threads(), config.sort_grain())?;
    debug!(len = data.len(), runs = runs.len(), "sorting");

    sort_runs(data, &runs);
    let ends: Vec<usize> = runs.iter().map(|run| run.end).collect();
    merge_runs(data, &ends, 0);
    Ok(())
}

// Total once NaN has been ruled out.
fn ascending<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn sort_runs<T>(data: &mut [T], runs: &[Chunk])
where
    T: PartialOrd + Send,
{
    if let [only] = runs {
        data[only.range()].sort_unstable_by(ascending);
        return;
    }

    let mut slices: Vec<&mut [T]> = Vec::with_capacity(runs.len());
    let mut rest = data;
    for run in runs {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(run.len());
        slices.push(head);
        rest = tail;
    }
    slices
        .par_iter_mut()
        .for_each(|run| run.sort_unstable_by(ascending));
}

/// Merge the sorted runs of `data` ending at `ends` (offsets into the
/// enclosing slice, which starts at `offset`).
fn merge_runs<T>(data: &mut [T], ends: &[usize], offset: usize)
where
    T: PartialOrd + Copy + Send,
{
    if ends.len() <= 1 {
        return;
    }

    let split = ends.len() / 2;
    let mid = ends[split - 1];
    {
        let (left, right) = data.split_at_mut(mid - offset);
        rayon::join(
            || merge_runs(left, &ends[..split], offset),
            || merge_runs(right, &ends[split..], mid),
        );
    }
    merge_halves(data, mid - offset);
}

fn merge_halves<T: PartialOrd + Copy>(data: &mut [T], mid: usize) {
    if mid == 0 || mid == data.len() || data[mid - 1] <= data[mid] {
        return;
    }

    let mut merged = Vec::with_capacity(data.len());
    let (left, right) = data.split_at(mid);
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if right[j] < left[i] {
            merged.push(right[j]);
            j += 1;
        } else {
            merged.push(left[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    data.copy_from_slice(&merged);
}
