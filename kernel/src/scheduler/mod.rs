/*!
 * Scheduler Module
 * Multiple-queue priority scheduling policies and their kernel-facing contract
 */

pub mod atomic_stats;
pub mod config;
pub mod policy;
pub mod registry;
pub mod runqueue;
pub mod ticket;
pub mod traits;
pub mod types;

// Re-export public API
pub use config::SchedulerConfig;
pub use policy::{search_order, LotteryScheduler, MultipleQueueScheduler, BAND_WEIGHTS};
pub use registry::{PolicyFactory, PolicyRegistry};
pub use runqueue::{RunQueue, RunQueues};
pub use ticket::{RngTickets, ScriptedTickets, TicketSource};
pub use traits::{EntityHandle, SchedulingAlgorithm, SchedulingEntity};
pub use types::{ClassCounts, PriorityClass, RunQueueSnapshot, SchedulerStats};
