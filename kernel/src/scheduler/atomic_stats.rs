/*!
 * Lock-Free Scheduler Statistics
 * Uses atomic counters for zero-contention stats tracking in hot scheduling paths
 */

use super::types::{ClassCounts, PriorityClass, SchedulerStats};
use crate::core::types::Turn;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Atomic scheduler statistics for lock-free updates
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - All operations use relaxed ordering for maximum performance
/// - Read-only snapshot requires no synchronization
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct AtomicSchedulerStats {
    idle_selections: AtomicU64,
    rotations: AtomicU64,
    fast_path_hits: AtomicU64,
    picks: [AtomicU64; PriorityClass::COUNT],
    admitted: AtomicU64,
    removed: AtomicU64,
    ignored: AtomicU64,
    missed_removals: AtomicU64,
    runnable: AtomicUsize,
}

impl AtomicSchedulerStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection that found nothing runnable
    #[inline(always)]
    pub fn inc_idle(&self) {
        self.idle_selections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful pick
    ///
    /// # Performance
    /// Hot path - called on every non-idle selection
    #[inline(always)]
    pub fn record_pick(&self, class: PriorityClass, rotated: bool) {
        self.picks[class.index()].fetch_add(1, Ordering::Relaxed);
        if rotated {
            self.rotations.fetch_add(1, Ordering::Relaxed);
        } else {
            self.fast_path_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline(always)]
    pub fn inc_admitted(&self) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
        self.runnable.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_removed(&self) {
        self.removed.fetch_add(1, Ordering::Relaxed);
        self.runnable.fetch_sub(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_ignored(&self) {
        self.ignored.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_missed_removal(&self) {
        self.missed_removals.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of current stats
    ///
    /// # Note
    /// Counter values may not be perfectly consistent with each other due to concurrent updates,
    /// but each individual value is accurate. This is acceptable for monitoring.
    #[inline]
    pub fn snapshot(&self, policy: &'static str, turns: Turn) -> SchedulerStats {
        SchedulerStats {
            policy,
            turns,
            idle_selections: self.idle_selections.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
            fast_path_hits: self.fast_path_hits.load(Ordering::Relaxed),
            picks: ClassCounts::from_array(std::array::from_fn(|index| {
                self.picks[index].load(Ordering::Relaxed)
            })),
            admitted: self.admitted.load(Ordering::Relaxed),
            removed: self.removed.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            missed_removals: self.missed_removals.load(Ordering::Relaxed),
            runnable: self.runnable.load(Ordering::Relaxed),
        }
    }
}
