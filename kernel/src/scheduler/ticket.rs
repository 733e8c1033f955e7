/*!
 * Ticket Sources
 * Injected randomness for the lottery policy
 */

use crate::core::errors::SchedulerError;
use crate::core::types::{SchedulerResult, Ticket, Turn};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Yields the next lottery ticket in `[1, 100]`
///
/// `turn` is the policy's turn counter for the selection being served,
/// starting at 1. Sources may ignore it.
pub trait TicketSource: Send {
    fn draw(&mut self, turn: Turn) -> Ticket;
}

impl<T: TicketSource + ?Sized> TicketSource for Box<T> {
    #[inline]
    fn draw(&mut self, turn: Turn) -> Ticket {
        (**self).draw(turn)
    }
}

/// Uniform tickets from any random number generator
pub struct RngTickets<R> {
    rng: R,
}

impl<R: RngCore + Send> RngTickets<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngTickets<StdRng> {
    /// Production source seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic source for tests and reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore + Send> TicketSource for RngTickets<R> {
    #[inline]
    fn draw(&mut self, _turn: Turn) -> Ticket {
        Ticket::clamped(self.rng.gen_range(Ticket::MIN..=Ticket::MAX))
    }
}

/// Fixed cyclic ticket script indexed by the turn counter
///
/// Turn 1 draws `script[0]`, turn `n` draws `script[(n - 1) % len]`.
#[derive(Debug, Clone)]
pub struct ScriptedTickets {
    script: Vec<Ticket>,
}

impl ScriptedTickets {
    pub fn new(script: Vec<Ticket>) -> SchedulerResult<Self> {
        if script.is_empty() {
            return Err(SchedulerError::InvalidConfig(
                "ticket script must not be empty".to_string(),
            ));
        }
        Ok(Self { script })
    }

    /// Build from raw values, validating each ticket
    pub fn from_values(values: &[u8]) -> SchedulerResult<Self> {
        let script = values
            .iter()
            .map(|&value| Ticket::new(value))
            .collect::<SchedulerResult<Vec<_>>>()?;
        Self::new(script)
    }
}

impl TicketSource for ScriptedTickets {
    #[inline]
    fn draw(&mut self, turn: Turn) -> Ticket {
        let index = (turn.saturating_sub(1) % self.script.len() as u64) as usize;
        self.script[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_tickets_in_range() {
        let mut source = RngTickets::seeded(7);
        for turn in 1..=1_000 {
            let ticket = source.draw(turn).get();
            assert!((1..=100).contains(&ticket));
        }
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RngTickets::seeded(42);
        let mut b = RngTickets::seeded(42);
        for turn in 1..=100 {
            assert_eq!(a.draw(turn), b.draw(turn));
        }
    }

    #[test]
    fn test_script_cycles_by_turn() {
        let mut source = ScriptedTickets::from_values(&[10, 50, 95]).unwrap();
        let drawn: Vec<_> = (1..=5).map(|turn| source.draw(turn).get()).collect();
        assert_eq!(drawn, vec![10, 50, 95, 10, 50]);
    }

    #[test]
    fn test_script_validation() {
        assert!(ScriptedTickets::from_values(&[]).is_err());
        assert_eq!(
            ScriptedTickets::from_values(&[5, 0]).unwrap_err(),
            SchedulerError::InvalidTicket(0)
        );
    }
}
