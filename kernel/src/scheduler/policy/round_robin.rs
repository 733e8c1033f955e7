/*!
 * Strict-Priority Round-Robin Policy
 *
 * Serves the highest-precedence non-empty queue and rotates within it.
 * Lower classes only run while every higher queue is empty, so sustained
 * realtime load starves daemons by construction.
 */

use super::{PolicyCore, Selection};
use crate::core::guard::InterruptControl;
use crate::scheduler::traits::{EntityHandle, SchedulingAlgorithm};
use crate::scheduler::types::{PriorityClass, RunQueueSnapshot, SchedulerStats};
use std::sync::Arc;

/// Multiple-queue priority scheduler (`mq`)
pub struct MultipleQueueScheduler<H> {
    core: PolicyCore<H>,
}

impl<H: EntityHandle> MultipleQueueScheduler<H> {
    /// Policy identifier
    pub const NAME: &'static str = "mq";

    pub fn new(irq: Arc<dyn InterruptControl>) -> Self {
        Self {
            core: PolicyCore::new(Self::NAME, irq),
        }
    }
}

impl<H: EntityHandle> SchedulingAlgorithm<H> for MultipleQueueScheduler<H> {
    fn name(&self) -> &'static str {
        self.core.name()
    }

    fn init(&self) {
        self.core.init();
    }

    fn add_to_runqueue(&self, entity: H) {
        self.core.admit(entity);
    }

    fn remove_from_runqueue(&self, entity: &H) {
        self.core.remove(entity);
    }

    fn pick_next_entity(&self) -> Option<H> {
        self.core.select(|state| {
            let class = state.queues.first_non_empty(&PriorityClass::PRECEDENCE)?;
            let queue = state.queues.queue_mut(class);

            // A lone entity keeps running without a pointless dequeue/enqueue
            if queue.count() == 1 {
                return queue.first().cloned().map(|handle| Selection {
                    handle,
                    class,
                    rotated: false,
                });
            }

            queue.rotate().map(|handle| Selection {
                handle,
                class,
                rotated: true,
            })
        })
    }

    fn stats(&self) -> SchedulerStats {
        self.core.stats()
    }

    fn snapshot(&self) -> RunQueueSnapshot {
        self.core.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::LocalIrq;
    use crate::core::types::{EntityId, Priority};
    use crate::scheduler::traits::SchedulingEntity;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Task(EntityId, Priority);

    impl SchedulingEntity for Task {
        fn id(&self) -> EntityId {
            self.0
        }

        fn priority(&self) -> Priority {
            self.1
        }
    }

    fn scheduler() -> (Arc<LocalIrq>, MultipleQueueScheduler<Task>) {
        let irq = Arc::new(LocalIrq::new());
        let policy = MultipleQueueScheduler::new(irq.clone());
        (irq, policy)
    }

    #[test]
    fn test_name() {
        let (_, policy) = scheduler();
        assert_eq!(policy.name(), "mq");
    }

    #[test]
    fn test_rotation_within_class() {
        let (_, policy) = scheduler();
        policy.add_to_runqueue(Task(1, 2));
        policy.add_to_runqueue(Task(2, 2));
        policy.add_to_runqueue(Task(3, 2));

        let picks: Vec<_> = (0..4)
            .filter_map(|_| policy.pick_next_entity())
            .map(|t| t.0)
            .collect();
        assert_eq!(picks, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_single_entity_fast_path() {
        let (_, policy) = scheduler();
        policy.add_to_runqueue(Task(9, 3));

        for _ in 0..3 {
            assert_eq!(policy.pick_next_entity(), Some(Task(9, 3)));
        }
        let stats = policy.stats();
        assert_eq!(stats.fast_path_hits, 3);
        assert_eq!(stats.rotations, 0);
    }

    #[test]
    fn test_higher_class_preempts() {
        let (_, policy) = scheduler();
        policy.add_to_runqueue(Task(1, 3));
        assert_eq!(policy.pick_next_entity(), Some(Task(1, 3)));

        policy.add_to_runqueue(Task(2, 0));
        assert_eq!(policy.pick_next_entity(), Some(Task(2, 0)));

        policy.remove_from_runqueue(&Task(2, 0));
        assert_eq!(policy.pick_next_entity(), Some(Task(1, 3)));
    }

    #[test]
    fn test_interrupts_restored_on_every_path() {
        let (irq, policy) = scheduler();

        assert_eq!(policy.pick_next_entity(), None);
        assert!(irq.enabled());

        policy.add_to_runqueue(Task(1, 1));
        assert!(policy.pick_next_entity().is_some());
        assert!(irq.enabled());

        policy.add_to_runqueue(Task(2, 9));
        policy.remove_from_runqueue(&Task(2, 9));
        assert!(irq.enabled());
        assert_eq!(irq.depth(), 0);
        assert_eq!(irq.masked_sections(), 5);
    }
}
