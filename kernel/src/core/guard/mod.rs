/*!
 * Critical-Section Guards
 *
 * Every scheduler operation runs under a guard that is taken on entry and
 * dropped on every exit path, early returns and panics included. Guards
 * nest: an inner guard restores exactly the state its outer guard left.
 *
 * Only [`IrqGuard`] exists today; it masks interrupt delivery on the local
 * core through an injected [`InterruptControl`].
 *
 * ```rust
 * use prio_sched::core::guard::{IrqGuard, LocalIrq, InterruptControl};
 *
 * let irq = LocalIrq::new();
 * {
 *     let _guard = IrqGuard::acquire(&irq);
 *     assert!(!irq.enabled());
 * }
 * assert!(irq.enabled());
 * ```
 */

mod irq;
mod traits;

pub use irq::{InterruptControl, IrqGuard, IrqState, LocalIrq};
pub use traits::{Guard, GuardDrop};

pub type GuardResult<T> = Result<T, GuardError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("Critical section already left")]
    AlreadyReleased,
}

/// Bookkeeping attached to a held guard
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    /// Nesting depth at acquisition (1 = outermost)
    pub depth: usize,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str, depth: usize) -> Self {
        Self {
            resource_type,
            depth,
        }
    }

    #[inline]
    pub fn is_outermost(&self) -> bool {
        self.depth == 1
    }
}
