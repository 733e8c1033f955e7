/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 *
 * Only the configuration and registration surfaces can fail. The scheduling
 * hot path (admit/remove/pick) never returns an error.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Unknown scheduling policy: {0}")]
    #[diagnostic(
        code(scheduler::unknown_policy),
        help("Use one of the registered policy identifiers, e.g. `mq` or `adv`.")
    )]
    UnknownPolicy(String),

    #[error("Scheduling policy already registered: {0}")]
    #[diagnostic(
        code(scheduler::duplicate_policy),
        help("Each policy identifier may only be registered once.")
    )]
    DuplicatePolicy(String),

    #[error("Ticket {0} out of range")]
    #[diagnostic(
        code(scheduler::invalid_ticket),
        help("Lottery tickets must be between 1 and 100 inclusive.")
    )]
    InvalidTicket(u8),

    #[error("Priority {0} does not name a priority class")]
    #[diagnostic(
        code(scheduler::invalid_priority),
        help("Valid raw priorities: 0 (realtime), 1 (interactive), 2 (normal), 3 (daemon).")
    )]
    InvalidPriority(u8),

    #[error("Invalid scheduler configuration: {0}")]
    #[diagnostic(
        code(scheduler::invalid_config),
        help("Check KERNEL_SCHED_* environment variables or the JSON config document.")
    )]
    InvalidConfig(String),
}
