//! Pacing policy for update runs.
//!
//! Both trigger modes drive the same resolver and writer; the only
//! difference between them is how work is grouped and how long the
//! scheduler pauses between groups. [`PacingPolicy`] captures that as
//! one value instead of two divergent loops. The pauses are deliberate
//! backpressure against CSFloat's rate limits, not a correctness
//! requirement.

use std::time::Duration;

/// How an update run partitions and paces its item set.
///
/// Items are processed in groups of `group_size`; within a group all
/// items are in flight concurrently, and the scheduler sleeps for
/// `pause` between consecutive groups (never after the last). A
/// `group_size` of 1 degenerates to strict sequential processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Items resolved concurrently per group.
    pub group_size: usize,
    /// Pause between consecutive groups.
    pub pause: Duration,
}

impl PacingPolicy {
    /// Concurrent batched pacing, as used by the scheduled run.
    #[must_use]
    pub const fn concurrent(group_size: usize, pause: Duration) -> Self {
        Self { group_size, pause }
    }

    /// Strict sequential pacing, as used by manual runs.
    #[must_use]
    pub const fn sequential(pause: Duration) -> Self {
        Self {
            group_size: 1,
            pause,
        }
    }

    /// Returns `true` when items are processed one at a time.
    #[must_use]
    pub const fn is_sequential(&self) -> bool {
        self.group_size <= 1
    }

    /// Number of groups a run over `total` items dispatches.
    #[must_use]
    pub const fn group_count(&self, total: usize) -> usize {
        if self.group_size == 0 {
            total
        } else {
            total.div_ceil(self.group_size)
        }
    }
}
