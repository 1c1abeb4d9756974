//! Row ownership policies for the worker pool.
//!
//! Both policies cover `[0, size)` exactly once per generation. The static
//! split hands each worker one contiguous range up front; the dynamic claim
//! hands out single rows through a shared atomic counter until it runs past
//! the last row.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How rows are assigned to workers each generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PartitionPolicy {
    /// Worker `w` of `W` owns rows `[w * (size / W), (w + 1) * (size / W))`,
    /// with the last worker absorbing the `size % W` remainder. Computed
    /// once, never contended.
    #[default]
    StaticRange,
    /// Workers repeatedly take the next unclaimed row from a shared counter
    /// until the generation is exhausted. Balances load when rows cost
    /// unevenly.
    DynamicClaim,
}

/// Contiguous row range owned by worker `worker` of `workers` under
/// [`PartitionPolicy::StaticRange`].
///
/// When `workers` exceeds `size` the stride is zero: every range but the
/// last is empty and the last covers the whole grid.
pub(crate) fn static_range(worker: usize, workers: usize, size: usize) -> Range<usize> {
    debug_assert!(workers > 0);
    debug_assert!(worker < workers);
    let stride = size / workers;
    let start = worker * stride;
    let end = if worker + 1 == workers {
        size
    } else {
        start + stride
    };
    start..end
}

/// Shared row dispenser for [`PartitionPolicy::DynamicClaim`].
pub(crate) struct ClaimCounter {
    next_row: AtomicUsize,
    limit: usize,
}

impl ClaimCounter {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            next_row: AtomicUsize::new(0),
            limit,
        }
    }

    /// Takes the next unclaimed row, or `None` once the generation is
    /// exhausted. Distinct callers always receive distinct rows; the
    /// counter may run past the limit by one claim per worker, and those
    /// claims are discarded here.
    pub(crate) fn claim(&self) -> Option<usize> {
        let row = self.next_row.fetch_add(1, Ordering::Relaxed);
        (row < self.limit).then_some(row)
    }

    /// Rearms the dispenser for the next generation. Must only run while
    /// every worker is parked at the generation barrier.
    pub(crate) fn reset(&self) {
        self.next_row.store(0, Ordering::Relaxed);
    }
}
