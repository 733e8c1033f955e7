/*!
 * Guard Traits
 * Shared surface of scoped critical-section guards
 */

use super::{GuardMetadata, GuardResult};

/// A held critical section
pub trait Guard: Send {
    /// Short name of what the guard protects, e.g. `"irq"`
    fn resource_type(&self) -> &'static str;

    fn metadata(&self) -> &GuardMetadata;

    /// False once the section was left through [`Guard::release`]
    fn is_active(&self) -> bool;

    /// Leave the critical section before scope end
    ///
    /// A second call fails with [`super::GuardError::AlreadyReleased`] and
    /// leaves the protected state untouched.
    fn release(&mut self) -> GuardResult<()>;
}

/// Exit hook run from `Drop`
pub trait GuardDrop: Guard {
    /// Leave the section if it is still held
    ///
    /// # Panics
    ///
    /// Must not panic. Runs with interrupts masked.
    fn on_drop(&mut self);
}
