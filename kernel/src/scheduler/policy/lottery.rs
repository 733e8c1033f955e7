/*!
 * Weighted Lottery Policy
 *
 * Each selection draws a ticket in [1, 100]. The ticket's band decides
 * which class is searched first; the remaining classes follow in cyclic
 * precedence order. Every class leads the search in some band, so a
 * non-empty daemon queue is served on roughly one draw in ten even under
 * sustained realtime load.
 *
 * | Ticket  | Search order                          |
 * |---------|---------------------------------------|
 * | 1-40    | realtime, interactive, normal, daemon |
 * | 41-70   | interactive, normal, daemon, realtime |
 * | 71-90   | normal, daemon, realtime, interactive |
 * | 91-100  | daemon, realtime, interactive, normal |
 */

use super::{PolicyCore, Selection};
use crate::core::guard::InterruptControl;
use crate::core::types::Ticket;
use crate::scheduler::ticket::TicketSource;
use crate::scheduler::traits::{EntityHandle, SchedulingAlgorithm};
use crate::scheduler::types::{PriorityClass, RunQueueSnapshot, SchedulerStats};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::trace;

use PriorityClass::{Daemon, Interactive, Normal, Realtime};

/// Nominal share of contested draws each class leads, in percent
pub const BAND_WEIGHTS: [(PriorityClass, u8); PriorityClass::COUNT] =
    [(Realtime, 40), (Interactive, 30), (Normal, 20), (Daemon, 10)];

const REALTIME_FIRST: [PriorityClass; 4] = [Realtime, Interactive, Normal, Daemon];
const INTERACTIVE_FIRST: [PriorityClass; 4] = [Interactive, Normal, Daemon, Realtime];
const NORMAL_FIRST: [PriorityClass; 4] = [Normal, Daemon, Realtime, Interactive];
const DAEMON_FIRST: [PriorityClass; 4] = [Daemon, Realtime, Interactive, Normal];

/// Preferred queue search order for a ticket
///
/// # Performance
/// Hot path - a single range match, no allocation
#[inline]
pub fn search_order(ticket: Ticket) -> &'static [PriorityClass; PriorityClass::COUNT] {
    match ticket.get() {
        0..=40 => &REALTIME_FIRST,
        41..=70 => &INTERACTIVE_FIRST,
        71..=90 => &NORMAL_FIRST,
        _ => &DAEMON_FIRST,
    }
}

/// Lottery scheduler (`adv`)
pub struct LotteryScheduler<H> {
    core: PolicyCore<H>,
    tickets: Mutex<Box<dyn TicketSource>>,
}

impl<H: EntityHandle> LotteryScheduler<H> {
    /// Policy identifier
    pub const NAME: &'static str = "adv";

    pub fn new<T>(irq: Arc<dyn InterruptControl>, tickets: T) -> Self
    where
        T: TicketSource + 'static,
    {
        Self::with_boxed_source(irq, Box::new(tickets))
    }

    pub fn with_boxed_source(irq: Arc<dyn InterruptControl>, tickets: Box<dyn TicketSource>) -> Self {
        Self {
            core: PolicyCore::new(Self::NAME, irq),
            tickets: Mutex::new(tickets),
        }
    }
}

impl<H: EntityHandle> SchedulingAlgorithm<H> for LotteryScheduler<H> {
    fn name(&self) -> &'static str {
        self.core.name()
    }

    fn init(&self) {
        self.core.init();
    }

    fn add_to_runqueue(&self, entity: H) {
        self.core.admit(entity);
    }

    fn remove_from_runqueue(&self, entity: &H) {
        self.core.remove(entity);
    }

    fn pick_next_entity(&self) -> Option<H> {
        self.core.select(|state| {
            let ticket = self.tickets.lock().draw(state.turns);
            let class = state.queues.first_non_empty(search_order(ticket))?;
            trace!(%ticket, %class, "Lottery draw");

            state
                .queues
                .queue_mut(class)
                .rotate()
                .map(|handle| Selection {
                    handle,
                    class,
                    rotated: true,
                })
        })
    }

    fn stats(&self) -> SchedulerStats {
        self.core.stats()
    }

    fn snapshot(&self) -> RunQueueSnapshot {
        self.core.snapshot()
    }
}
