/*!
 * Core Types
 * Common types used across the scheduler
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a scheduling entity (thread id in the host kernel)
pub type EntityId = u32;

/// Raw priority classification as reported by an entity
///
/// Only `0..=3` map to a known class, see [`crate::scheduler::PriorityClass`].
pub type Priority = u8;

/// Number of selection events a policy has served
pub type Turn = u64;

/// Common result type for scheduler operations
pub type SchedulerResult<T> = Result<T, super::errors::SchedulerError>;

/// Lottery ticket in the closed range `[1, 100]`
///
/// # Performance
/// - Single byte, passed by value on the selection path
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Ticket(u8);

impl Ticket {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Create a ticket, rejecting values outside `[1, 100]`
    pub fn new(value: u8) -> SchedulerResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(super::errors::SchedulerError::InvalidTicket(value))
        }
    }

    /// Clamp any value into `[1, 100]`
    #[inline(always)]
    pub const fn clamped(value: u8) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    #[inline(always)]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Ticket {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
