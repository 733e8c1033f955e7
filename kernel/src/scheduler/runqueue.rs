/*!
 * Run Queues
 * FIFO containers of runnable entity handles, one per priority class
 */

use super::traits::EntityHandle;
use super::types::{PriorityClass, RunQueueSnapshot};
use crate::core::types::EntityId;
use std::collections::VecDeque;

/// FIFO run queue for a single priority class
#[derive(Debug, Clone)]
pub struct RunQueue<H> {
    entries: VecDeque<H>,
}

impl<H: EntityHandle> RunQueue<H> {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Append at the tail
    #[inline]
    pub fn enqueue(&mut self, handle: H) {
        self.entries.push_back(handle);
    }

    /// Take the head
    #[inline]
    pub fn dequeue(&mut self) -> Option<H> {
        self.entries.pop_front()
    }

    /// Remove the first handle with identity `id` - O(n)
    pub fn remove(&mut self, id: EntityId) -> Option<H> {
        let position = self.entries.iter().position(|h| h.id() == id)?;
        self.entries.remove(position)
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Peek at the head
    #[inline]
    pub fn first(&self) -> Option<&H> {
        self.entries.front()
    }

    /// Move the head to the tail and return a handle to it
    ///
    /// # Performance
    /// Hot path - one pop and one push, no reallocation in steady state
    #[inline]
    pub fn rotate(&mut self) -> Option<H> {
        let head = self.entries.pop_front()?;
        self.entries.push_back(head.clone());
        Some(head)
    }

    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.entries.iter()
    }

    fn ids(&self) -> Vec<EntityId> {
        self.entries.iter().map(|h| h.id()).collect()
    }
}

impl<H: EntityHandle> Default for RunQueue<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed table of run queues indexed by priority class
#[derive(Debug, Clone)]
pub struct RunQueues<H> {
    queues: [RunQueue<H>; PriorityClass::COUNT],
}

impl<H: EntityHandle> RunQueues<H> {
    pub fn new() -> Self {
        Self {
            queues: std::array::from_fn(|_| RunQueue::new()),
        }
    }

    #[inline(always)]
    pub fn queue(&self, class: PriorityClass) -> &RunQueue<H> {
        &self.queues[class.index()]
    }

    #[inline(always)]
    pub fn queue_mut(&mut self, class: PriorityClass) -> &mut RunQueue<H> {
        &mut self.queues[class.index()]
    }

    /// True when no class has a runnable entity
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(RunQueue::is_empty)
    }

    /// Number of queued handles across all classes
    pub fn total(&self) -> usize {
        self.queues.iter().map(RunQueue::count).sum()
    }

    /// First class in `order` whose queue is non-empty
    #[inline]
    pub fn first_non_empty(&self, order: &[PriorityClass]) -> Option<PriorityClass> {
        order
            .iter()
            .copied()
            .find(|class| !self.queue(*class).is_empty())
    }

    pub fn snapshot(&self) -> RunQueueSnapshot {
        RunQueueSnapshot::new(std::array::from_fn(|index| self.queues[index].ids()))
    }
}

impl<H: EntityHandle> Default for RunQueues<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Priority;
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

    #[test]
    fn test_fifo_order() {
        let mut queue = RunQueue::new();
        queue.enqueue(Task(1, 2));
        queue.enqueue(Task(2, 2));
        queue.enqueue(Task(3, 2));

        assert_eq!(queue.count(), 3);
        assert_eq!(queue.first(), Some(&Task(1, 2)));
        assert_eq!(queue.dequeue(), Some(Task(1, 2)));
        assert_eq!(queue.dequeue(), Some(Task(2, 2)));
        assert_eq!(queue.count(), 1);
    }

    #[test]
    fn test_remove_by_identity() {
        let mut queue = RunQueue::new();
        queue.enqueue(Task(1, 0));
        queue.enqueue(Task(2, 0));
        queue.enqueue(Task(3, 0));

        assert_eq!(queue.remove(2), Some(Task(2, 0)));
        assert_eq!(queue.remove(2), None);
        let ids: Vec<_> = queue.iter().map(|t| t.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_rotate() {
        let mut queue = RunQueue::new();
        assert_eq!(queue.rotate(), None);

        queue.enqueue(Task(1, 1));
        queue.enqueue(Task(2, 1));
        assert_eq!(queue.rotate(), Some(Task(1, 1)));
        assert_eq!(queue.first(), Some(&Task(2, 1)));
        assert_eq!(queue.count(), 2);
    }

    #[test]
    fn test_first_non_empty_follows_order() {
        let mut queues = RunQueues::new();
        queues.queue_mut(PriorityClass::Normal).enqueue(Task(5, 2));
        queues.queue_mut(PriorityClass::Daemon).enqueue(Task(6, 3));

        assert_eq!(
            queues.first_non_empty(&PriorityClass::PRECEDENCE),
            Some(PriorityClass::Normal)
        );
        assert_eq!(
            queues.first_non_empty(&[PriorityClass::Daemon, PriorityClass::Normal]),
            Some(PriorityClass::Daemon)
        );
        assert_eq!(
            queues.first_non_empty(&[PriorityClass::Realtime, PriorityClass::Interactive]),
            None
        );
        assert_eq!(queues.total(), 2);
    }

    #[test]
    fn test_snapshot() {
        let mut queues = RunQueues::new();
        assert!(queues.is_empty());
        queues.queue_mut(PriorityClass::Realtime).enqueue(Task(1, 0));
        queues.queue_mut(PriorityClass::Realtime).enqueue(Task(2, 0));

        let snapshot = queues.snapshot();
        assert_eq!(snapshot.queue(PriorityClass::Realtime), &[1, 2]);
        assert!(snapshot.queue(PriorityClass::Daemon).is_empty());
    }
}
