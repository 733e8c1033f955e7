/*!
 * Priority Scheduler Kernel Library
 * Pluggable multiple-queue CPU scheduling policies exposed as a library
 */

pub mod core;
pub mod monitoring;
pub mod scheduler;
pub mod sim;

// Re-exports
pub use crate::core::errors::SchedulerError;
pub use crate::core::guard::{InterruptControl, IrqGuard, LocalIrq};
pub use crate::core::types::{EntityId, Priority, SchedulerResult, Ticket, Turn};
pub use monitoring::init_tracing;
pub use scheduler::{
    LotteryScheduler, MultipleQueueScheduler, PolicyRegistry, PriorityClass, RunQueueSnapshot,
    SchedulerConfig, SchedulerStats, SchedulingAlgorithm, SchedulingEntity, ScriptedTickets,
    RngTickets, TicketSource,
};
pub use sim::{Simulation, SimulationReport, Thread, ThreadRef};
