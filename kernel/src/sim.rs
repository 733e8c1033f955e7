/*!
 * Scheduling Simulation
 * Host-side driver that feeds scheduling events into a policy
 *
 * The kernel binary uses this to exercise a policy the way the timer
 * interrupt and block/wake paths would: one selection per tick, with a
 * periodic realtime worker that blocks and wakes on a fixed cadence.
 */

use crate::core::types::{EntityId, Priority};
use crate::scheduler::{ClassCounts, PriorityClass, SchedulingAlgorithm, SchedulingEntity};
use ahash::AHashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Simulated kernel thread
#[derive(Debug)]
pub struct Thread {
    id: EntityId,
    name: String,
    priority: Priority,
}

impl Thread {
    pub fn new(id: EntityId, name: impl Into<String>, class: PriorityClass) -> Self {
        Self {
            id,
            name: name.into(),
            priority: class.as_raw(),
        }
    }

    /// Thread reporting an arbitrary raw priority
    pub fn with_raw_priority(id: EntityId, name: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SchedulingEntity for Thread {
    #[inline]
    fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    fn priority(&self) -> Priority {
        self.priority
    }
}

/// Shared handle the simulation queues
pub type ThreadRef = Arc<Thread>;

/// Ticks between realtime worker wake-ups
pub const REALTIME_PERIOD: u64 = 10;
/// Ticks the realtime worker stays runnable per period
pub const REALTIME_BURST: u64 = 5;

/// Outcome of a simulation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReport {
    pub ticks: u64,
    pub idle_ticks: u64,
    pub picks: ClassCounts,
    pub per_thread: Vec<ThreadShare>,
}

/// Picks served to one thread
#[derive(Debug, Clone, Serialize)]
pub struct ThreadShare {
    pub id: EntityId,
    pub name: String,
    pub class: Option<PriorityClass>,
    pub picks: u64,
}

/// Drives a policy through timer ticks
pub struct Simulation {
    policy: Box<dyn SchedulingAlgorithm<ThreadRef>>,
    threads: Vec<ThreadRef>,
    periodic: Option<ThreadRef>,
    periodic_runnable: bool,
    tick: u64,
    idle_ticks: u64,
    picks: [u64; PriorityClass::COUNT],
    per_thread: AHashMap<EntityId, u64>,
}

impl Simulation {
    /// Admit `threads` and start at tick zero
    ///
    /// `periodic`, when given, is admitted too and then blocked/woken every
    /// [`REALTIME_PERIOD`] ticks.
    pub fn new(
        policy: Box<dyn SchedulingAlgorithm<ThreadRef>>,
        threads: Vec<ThreadRef>,
        periodic: Option<ThreadRef>,
    ) -> Self {
        for thread in threads.iter().chain(periodic.iter()) {
            policy.add_to_runqueue(Arc::clone(thread));
        }
        info!(
            policy = policy.name(),
            threads = threads.len() + periodic.iter().count(),
            "Simulation population admitted"
        );

        Self {
            policy,
            threads,
            periodic_runnable: periodic.is_some(),
            periodic,
            tick: 0,
            idle_ticks: 0,
            picks: [0; PriorityClass::COUNT],
            per_thread: AHashMap::new(),
        }
    }

    /// One thread per class plus a periodic realtime worker
    pub fn with_demo_population(policy: Box<dyn SchedulingAlgorithm<ThreadRef>>) -> Self {
        let threads = vec![
            Arc::new(Thread::new(2, "compositor", PriorityClass::Interactive)),
            Arc::new(Thread::new(3, "shell", PriorityClass::Interactive)),
            Arc::new(Thread::new(4, "build-0", PriorityClass::Normal)),
            Arc::new(Thread::new(5, "build-1", PriorityClass::Normal)),
            Arc::new(Thread::new(6, "build-2", PriorityClass::Normal)),
            Arc::new(Thread::new(7, "logd", PriorityClass::Daemon)),
            Arc::new(Thread::new(8, "indexer", PriorityClass::Daemon)),
        ];
        let periodic = Arc::new(Thread::new(1, "audio-rt", PriorityClass::Realtime));
        Self::new(policy, threads, Some(periodic))
    }

    pub fn policy(&self) -> &dyn SchedulingAlgorithm<ThreadRef> {
        self.policy.as_ref()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Serve one timer tick
    pub fn step(&mut self) -> Option<ThreadRef> {
        self.tick += 1;
        self.drive_periodic();

        match self.policy.pick_next_entity() {
            Some(thread) => {
                if let Some(class) = thread.class() {
                    self.picks[class.index()] += 1;
                }
                *self.per_thread.entry(thread.id()).or_insert(0) += 1;
                debug!(tick = self.tick, thread = thread.name(), "Dispatch");
                Some(thread)
            }
            None => {
                self.idle_ticks += 1;
                debug!(tick = self.tick, "Idle");
                None
            }
        }
    }

    /// Serve `ticks` timer ticks back to back
    pub fn run(&mut self, ticks: u64) -> SimulationReport {
        for _ in 0..ticks {
            self.step();
        }
        self.report()
    }

    pub fn report(&self) -> SimulationReport {
        let per_thread = self
            .threads
            .iter()
            .chain(self.periodic.iter())
            .map(|thread| ThreadShare {
                id: thread.id(),
                name: thread.name().to_string(),
                class: thread.class(),
                picks: self.per_thread.get(&thread.id()).copied().unwrap_or(0),
            })
            .collect();

        SimulationReport {
            ticks: self.tick,
            idle_ticks: self.idle_ticks,
            picks: ClassCounts::from_array(self.picks),
            per_thread,
        }
    }

    /// Block the periodic worker after its burst, wake it at each period start
    fn drive_periodic(&mut self) {
        let Some(worker) = self.periodic.as_ref() else {
            return;
        };

        let phase = self.tick % REALTIME_PERIOD;
        if phase == REALTIME_BURST && self.periodic_runnable {
            self.policy.remove_from_runqueue(worker);
            self.periodic_runnable = false;
            debug!(tick = self.tick, thread = worker.name(), "Blocked");
        } else if phase == 0 && !self.periodic_runnable {
            self.policy.add_to_runqueue(Arc::clone(worker));
            self.periodic_runnable = true;
            debug!(tick = self.tick, thread = worker.name(), "Woken");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::LocalIrq;
    use crate::scheduler::{LotteryScheduler, MultipleQueueScheduler};

    fn round_robin() -> Box<dyn SchedulingAlgorithm<ThreadRef>> {
        Box::new(MultipleQueueScheduler::new(Arc::new(LocalIrq::new())))
    }

    #[test]
    fn test_periodic_worker_leaves_room_for_interactive() {
        let mut sim = Simulation::with_demo_population(round_robin());
        let report = sim.run(100);

        assert_eq!(report.ticks, 100);
        assert_eq!(report.idle_ticks, 0);
        // Ticks 1-4, five ticks from each of 10..=90, and the wake-up at tick 100
        assert_eq!(report.picks.realtime, 4 + 9 * 5 + 1);
        assert_eq!(report.picks.interactive, 100 - report.picks.realtime);
        assert_eq!(report.picks.daemon, 0);
    }

    #[test]
    fn test_lottery_serves_every_class() {
        let policy: Box<dyn SchedulingAlgorithm<ThreadRef>> = Box::new(LotteryScheduler::new(
            Arc::new(LocalIrq::new()),
            crate::scheduler::RngTickets::seeded(5),
        ));
        let mut sim = Simulation::with_demo_population(policy);
        let report = sim.run(1_000);

        for class in PriorityClass::PRECEDENCE {
            assert!(report.picks.get(class) > 0, "{} starved", class);
        }
        assert_eq!(report.picks.total(), 1_000);
    }

    #[test]
    fn test_empty_population_idles() {
        let mut sim = Simulation::new(round_robin(), Vec::new(), None);
        assert!(sim.step().is_none());
        let report = sim.report();
        assert_eq!(report.idle_ticks, 1);
        assert!(report.per_thread.is_empty());
    }
}
