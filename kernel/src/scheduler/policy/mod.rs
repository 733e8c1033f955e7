/*!
 * Scheduling Policies
 *
 * Each policy implements [`SchedulingAlgorithm`] on top of [`PolicyCore`],
 * which owns the run queues, the turn counter and the interrupt discipline.
 * Policies only decide which queue a selection is served from.
 *
 * Available policies:
 * - `mq`: strict-priority round-robin
 * - `adv`: weighted lottery over per-class search orders
 */

mod lottery;
mod round_robin;

pub use lottery::{search_order, LotteryScheduler, BAND_WEIGHTS};
pub use round_robin::MultipleQueueScheduler;

use super::atomic_stats::AtomicSchedulerStats;
use super::runqueue::RunQueues;
use super::traits::EntityHandle;
use super::types::{PriorityClass, RunQueueSnapshot, SchedulerStats};
use crate::core::guard::{InterruptControl, IrqGuard};
use crate::core::types::Turn;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Queue state guarded by the policy lock
#[derive(Debug)]
pub struct PolicyState<H> {
    pub queues: RunQueues<H>,
    /// Selection events served, see [`PolicyCore::select`]
    pub turns: Turn,
}

/// Outcome of a policy's choice for one selection event
#[derive(Debug)]
pub struct Selection<H> {
    pub handle: H,
    pub class: PriorityClass,
    /// False when the head was returned without moving to the tail
    pub rotated: bool,
}

/// Shared machinery behind every policy
///
/// The interrupt guard is always taken before the queue lock, so an
/// interrupt arriving on this core can never observe a half-updated queue.
pub struct PolicyCore<H> {
    name: &'static str,
    irq: Arc<dyn InterruptControl>,
    state: Mutex<PolicyState<H>>,
    stats: AtomicSchedulerStats,
}

impl<H: EntityHandle> PolicyCore<H> {
    pub fn new(name: &'static str, irq: Arc<dyn InterruptControl>) -> Self {
        Self {
            name,
            irq,
            state: Mutex::new(PolicyState {
                queues: RunQueues::new(),
                turns: 0,
            }),
            stats: AtomicSchedulerStats::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn init(&self) {
        info!(
            policy = self.name,
            queues = PriorityClass::COUNT,
            "Run queue partitioned: realtime > interactive > normal > daemon"
        );
    }

    /// Append to the queue matching the entity's class
    pub fn admit(&self, entity: H) {
        let _irq = IrqGuard::acquire(self.irq.as_ref());

        let Some(class) = entity.class() else {
            self.stats.inc_ignored();
            warn!(
                policy = self.name,
                entity = entity.id(),
                priority = entity.priority(),
                "Unrecognized priority on admission, ignoring"
            );
            return;
        };

        let id = entity.id();
        self.state.lock().queues.queue_mut(class).enqueue(entity);
        self.stats.inc_admitted();
        debug!(policy = self.name, entity = id, %class, "Entity added to run queue");
    }

    /// Remove from the queue matching the entity's current class
    pub fn remove(&self, entity: &H) {
        let _irq = IrqGuard::acquire(self.irq.as_ref());

        let Some(class) = entity.class() else {
            self.stats.inc_ignored();
            warn!(
                policy = self.name,
                entity = entity.id(),
                priority = entity.priority(),
                "Unrecognized priority on removal, ignoring"
            );
            return;
        };

        let removed = self
            .state
            .lock()
            .queues
            .queue_mut(class)
            .remove(entity.id());

        if removed.is_some() {
            self.stats.inc_removed();
            debug!(policy = self.name, entity = entity.id(), %class, "Entity removed from run queue");
        } else {
            self.stats.inc_missed_removal();
            debug!(policy = self.name, entity = entity.id(), %class, "Entity not queued, nothing to remove");
        }
    }

    /// Run one selection event
    ///
    /// Returns `None` without advancing the turn counter when every queue is
    /// empty. Otherwise the counter is advanced before `choose` runs, so the
    /// first served event sees turn 1. `choose` is only invoked with at least
    /// one non-empty queue.
    pub fn select<F>(&self, choose: F) -> Option<H>
    where
        F: FnOnce(&mut PolicyState<H>) -> Option<Selection<H>>,
    {
        let _irq = IrqGuard::acquire(self.irq.as_ref());
        let mut state = self.state.lock();

        if state.queues.is_empty() {
            self.stats.inc_idle();
            trace!(policy = self.name, "No runnable entity");
            return None;
        }

        state.turns += 1;
        let turn = state.turns;
        let selection = choose(&mut *state)?;

        self.stats.record_pick(selection.class, selection.rotated);
        trace!(
            policy = self.name,
            turn,
            entity = selection.handle.id(),
            class = %selection.class,
            rotated = selection.rotated,
            "Picked next entity"
        );
        Some(selection.handle)
    }

    pub fn stats(&self) -> SchedulerStats {
        let turns = {
            let _irq = IrqGuard::acquire(self.irq.as_ref());
            self.state.lock().turns
        };
        self.stats.snapshot(self.name, turns)
    }

    pub fn snapshot(&self) -> RunQueueSnapshot {
        let _irq = IrqGuard::acquire(self.irq.as_ref());
        self.state.lock().queues.snapshot()
    }
}
