/*!
 * Scheduler Traits
 * Interfaces between the kernel and pluggable scheduling policies
 */

use super::types::{PriorityClass, RunQueueSnapshot, SchedulerStats};
use crate::core::types::{EntityId, Priority};
use std::sync::Arc;

/// A unit of schedulability owned by the thread subsystem
///
/// Policies hold cloned handles while the entity is runnable and never
/// manage its lifetime.
pub trait SchedulingEntity {
    /// Stable identity, used for remove-by-identity
    fn id(&self) -> EntityId;

    /// Raw priority classification
    ///
    /// Must be O(1) and side-effect free. Must not change while the entity
    /// is queued: removal locates the queue from the current value.
    fn priority(&self) -> Priority;

    /// Priority class, `None` for an unrecognized classification
    #[inline]
    fn class(&self) -> Option<PriorityClass> {
        PriorityClass::from_raw(self.priority())
    }
}

impl<T: SchedulingEntity + ?Sized> SchedulingEntity for &T {
    #[inline]
    fn id(&self) -> EntityId {
        (**self).id()
    }

    #[inline]
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

impl<T: SchedulingEntity + ?Sized> SchedulingEntity for Arc<T> {
    #[inline]
    fn id(&self) -> EntityId {
        (**self).id()
    }

    #[inline]
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

/// Handle types a policy can queue
pub trait EntityHandle: SchedulingEntity + Clone + Send {}

impl<H: SchedulingEntity + Clone + Send> EntityHandle for H {}

/// Scheduling policy contract
///
/// Every operation runs inside an interrupt-masked critical section and
/// completes in bounded time. None of them fail: an unrecognized priority
/// turns admission/removal into a no-op and an empty system selects `None`.
pub trait SchedulingAlgorithm<H: EntityHandle>: Send + Sync {
    /// Stable policy identifier used for operator/config selection
    fn name(&self) -> &'static str;

    /// Called once after the kernel installs the policy
    fn init(&self) {}

    /// An entity became eligible to run
    ///
    /// Precondition: the entity is not already queued.
    fn add_to_runqueue(&self, entity: H);

    /// An entity is no longer eligible to run
    ///
    /// Removing an entity that is not queued is a silent no-op.
    fn remove_from_runqueue(&self, entity: &H);

    /// Choose the entity to run for this scheduling event
    ///
    /// `None` means nothing is runnable and the caller should idle.
    fn pick_next_entity(&self) -> Option<H>;

    /// Lock-free statistics snapshot
    fn stats(&self) -> SchedulerStats;

    /// Read-only copy of the run queues
    fn snapshot(&self) -> RunQueueSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        id: EntityId,
        priority: Priority,
    }

    impl SchedulingEntity for Probe {
        fn id(&self) -> EntityId {
            self.id
        }

        fn priority(&self) -> Priority {
            self.priority
        }
    }

    #[test]
    fn test_class_from_priority() {
        let probe = Probe { id: 1, priority: 2 };
        assert_eq!(probe.class(), Some(PriorityClass::Normal));

        let bogus = Probe { id: 2, priority: 42 };
        assert_eq!(bogus.class(), None);
    }

    #[test]
    fn test_forwarding_impls() {
        let shared = Arc::new(Probe { id: 7, priority: 0 });
        assert_eq!(shared.id(), 7);
        assert_eq!((&shared).class(), Some(PriorityClass::Realtime));
    }
}
