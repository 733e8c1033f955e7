/*!
 * Interrupt Guards
 *
 * Scoped masking of interrupt delivery on the local core.
 *
 * The kernel supplies an [`InterruptControl`] for the running core; policies
 * only ever touch it through [`IrqGuard`], which saves the prior state on
 * acquisition and restores it on every exit path.
 */

use super::traits::{Guard, GuardDrop};
use super::{GuardError, GuardMetadata, GuardResult};
use parking_lot::{const_mutex, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};

/// Interrupt state captured when a guard masks interrupts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqState {
    was_enabled: bool,
    depth: usize,
}

impl IrqState {
    #[inline]
    pub const fn new(was_enabled: bool, depth: usize) -> Self {
        Self { was_enabled, depth }
    }

    /// Whether delivery was enabled before the guard was taken
    #[inline]
    pub const fn was_enabled(&self) -> bool {
        self.was_enabled
    }

    /// Nesting depth including the guard that captured this state
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}

/// Local-core interrupt masking primitive
///
/// Implementations must be callable with interrupts already masked and
/// must not block.
pub trait InterruptControl: Send + Sync {
    /// Disable delivery and return the state to restore later
    fn save_and_disable(&self) -> IrqState;

    /// Restore a state previously returned by `save_and_disable`
    fn restore(&self, state: IrqState);

    /// Whether delivery is currently enabled
    fn enabled(&self) -> bool;
}

/// Interrupt line of the simulated core
#[derive(Debug)]
struct IrqLine {
    enabled: bool,
    depth: usize,
    /// State captured by the outermost guard, restored when depth returns to 0
    outer_enabled: bool,
}

/// Simulated interrupt flag for one core
///
/// Host stand-in for `cli`/`sti` style primitives. Besides the flag itself it
/// counts critical sections so callers can verify masking discipline.
///
/// Guards may be released in any order, including from different threads
/// sharing the same instance: delivery stays masked until the last held
/// guard is gone, then returns to the state the outermost guard found.
///
/// # Performance
/// - Cache-line aligned, every operation is one short uncontended lock
#[repr(C, align(64))]
#[derive(Debug)]
pub struct LocalIrq {
    line: Mutex<IrqLine>,
    masked_sections: AtomicU64,
}

impl LocalIrq {
    /// Create a core with interrupts enabled
    pub const fn new() -> Self {
        Self {
            line: const_mutex(IrqLine {
                enabled: true,
                depth: 0,
                outer_enabled: true,
            }),
            masked_sections: AtomicU64::new(0),
        }
    }

    /// Number of guards currently held
    #[inline]
    pub fn depth(&self) -> usize {
        self.line.lock().depth
    }

    /// Number of outermost critical sections entered so far
    #[inline]
    pub fn masked_sections(&self) -> u64 {
        self.masked_sections.load(Ordering::Relaxed)
    }
}

impl Default for LocalIrq {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptControl for LocalIrq {
    fn save_and_disable(&self) -> IrqState {
        let mut line = self.line.lock();
        let was_enabled = line.enabled;
        if line.depth == 0 {
            line.outer_enabled = was_enabled;
            if was_enabled {
                self.masked_sections.fetch_add(1, Ordering::Relaxed);
            }
        }
        line.enabled = false;
        line.depth += 1;
        IrqState::new(was_enabled, line.depth)
    }

    fn restore(&self, _state: IrqState) {
        let mut line = self.line.lock();
        line.depth = line.depth.saturating_sub(1);
        if line.depth == 0 {
            line.enabled = line.outer_enabled;
        }
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.line.lock().enabled
    }
}

/// RAII guard masking interrupts for its lifetime
///
/// # Example
///
/// ```rust
/// use prio_sched::core::guard::{InterruptControl, IrqGuard, LocalIrq};
///
/// let irq = LocalIrq::new();
/// let outer = IrqGuard::acquire(&irq);
/// {
///     let _inner = IrqGuard::acquire(&irq);
/// }
/// // Inner guard restored "masked", not "enabled"
/// assert!(!irq.enabled());
/// drop(outer);
/// assert!(irq.enabled());
/// ```
#[must_use = "interrupts are unmasked as soon as the guard is dropped"]
pub struct IrqGuard<'a> {
    control: &'a dyn InterruptControl,
    saved: Option<IrqState>,
    metadata: GuardMetadata,
}

impl<'a> IrqGuard<'a> {
    /// Mask interrupts on the local core
    #[inline]
    pub fn acquire(control: &'a dyn InterruptControl) -> Self {
        let saved = control.save_and_disable();
        Self {
            control,
            saved: Some(saved),
            metadata: GuardMetadata::new("irq", saved.depth()),
        }
    }

    /// State captured at acquisition, `None` once released
    #[inline]
    pub fn saved(&self) -> Option<IrqState> {
        self.saved
    }
}

impl Guard for IrqGuard<'_> {
    fn resource_type(&self) -> &'static str {
        "irq"
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.saved.is_some()
    }

    fn release(&mut self) -> GuardResult<()> {
        match self.saved.take() {
            Some(state) => {
                self.control.restore(state);
                Ok(())
            }
            None => Err(GuardError::AlreadyReleased),
        }
    }
}

impl GuardDrop for IrqGuard<'_> {
    fn on_drop(&mut self) {
        if let Some(state) = self.saved.take() {
            self.control.restore(state);
        }
    }
}

impl Drop for IrqGuard<'_> {
    fn drop(&mut self) {
        self.on_drop();
    }
}
