/*!
 * Core Module
 * Fundamental scheduler types, guards and error handling
 */

pub mod errors;
pub mod guard;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use guard::{
    Guard, GuardDrop, GuardError, GuardMetadata, GuardResult, InterruptControl, IrqGuard,
    IrqState, LocalIrq,
};
pub use types::*;
