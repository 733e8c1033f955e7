/*!
 * Scheduler Types
 * Priority classes, statistics snapshots and run-queue snapshots
 */

use crate::core::errors::SchedulerError;
use crate::core::types::{EntityId, Priority, Turn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority class of a scheduling entity
///
/// Closed set in decreasing strict precedence. The discriminant is the raw
/// [`Priority`] an entity reports and the index of its run queue.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityClass {
    Realtime = 0,
    Interactive = 1,
    Normal = 2,
    Daemon = 3,
}

impl PriorityClass {
    /// Number of classes (and run queues)
    pub const COUNT: usize = 4;

    /// All classes, highest precedence first
    pub const PRECEDENCE: [PriorityClass; Self::COUNT] = [
        PriorityClass::Realtime,
        PriorityClass::Interactive,
        PriorityClass::Normal,
        PriorityClass::Daemon,
    ];

    /// Classify a raw priority, `None` for unrecognized values
    ///
    /// # Performance
    /// Hot path - called on every admission and removal
    #[inline(always)]
    pub const fn from_raw(raw: Priority) -> Option<Self> {
        match raw {
            0 => Some(Self::Realtime),
            1 => Some(Self::Interactive),
            2 => Some(Self::Normal),
            3 => Some(Self::Daemon),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn as_raw(self) -> Priority {
        self as Priority
    }

    /// Run-queue index
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Realtime => "realtime",
            Self::Interactive => "interactive",
            Self::Normal => "normal",
            Self::Daemon => "daemon",
        }
    }
}

impl TryFrom<Priority> for PriorityClass {
    type Error = SchedulerError;

    fn try_from(raw: Priority) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(SchedulerError::InvalidPriority(raw))
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One counter per priority class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassCounts {
    pub realtime: u64,
    pub interactive: u64,
    pub normal: u64,
    pub daemon: u64,
}

impl ClassCounts {
    pub fn from_array(counts: [u64; PriorityClass::COUNT]) -> Self {
        Self {
            realtime: counts[0],
            interactive: counts[1],
            normal: counts[2],
            daemon: counts[3],
        }
    }

    #[inline]
    pub fn get(&self, class: PriorityClass) -> u64 {
        match class {
            PriorityClass::Realtime => self.realtime,
            PriorityClass::Interactive => self.interactive,
            PriorityClass::Normal => self.normal,
            PriorityClass::Daemon => self.daemon,
        }
    }

    pub fn total(&self) -> u64 {
        self.realtime + self.interactive + self.normal + self.daemon
    }
}

/// Scheduler statistics
///
/// # Performance
/// - Cache-line aligned for frequent reads by monitoring
#[repr(C, align(64))]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub policy: &'static str,
    /// Selection events that found a runnable entity
    pub turns: Turn,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub idle_selections: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub rotations: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub fast_path_hits: u64,
    pub picks: ClassCounts,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub admitted: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub removed: u64,
    /// Admissions/removals dropped for an unrecognized priority
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub ignored: u64,
    /// Removals of entities that were not queued
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub missed_removals: u64,
    pub runnable: usize,
}

fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

/// Point-in-time copy of the run queues, entity ids in queue order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunQueueSnapshot {
    queues: [Vec<EntityId>; PriorityClass::COUNT],
}

impl RunQueueSnapshot {
    pub fn new(queues: [Vec<EntityId>; PriorityClass::COUNT]) -> Self {
        Self { queues }
    }

    /// Ids queued for a class, head first
    #[inline]
    pub fn queue(&self, class: PriorityClass) -> &[EntityId] {
        &self.queues[class.index()]
    }

    /// Total number of queued handles
    pub fn len(&self) -> usize {
        self.queues.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(Vec::is_empty)
    }

    /// How many times `id` appears across all queues
    pub fn occurrences(&self, id: EntityId) -> usize {
        self.queues
            .iter()
            .map(|q| q.iter().filter(|&&queued| queued == id).count())
            .sum()
    }

    /// Class whose queue holds `id`, if any
    pub fn class_of(&self, id: EntityId) -> Option<PriorityClass> {
        PriorityClass::PRECEDENCE
            .into_iter()
            .find(|class| self.queue(*class).contains(&id))
    }
}
