/*!
 * Scheduler Configuration
 *
 * Environment variables:
 * - KERNEL_SCHED_POLICY: Policy identifier (default: mq)
 * - KERNEL_SCHED_SEED: Fixed lottery seed (default: OS entropy)
 * - KERNEL_SCHED_TICKS: Scheduling events the simulation drives (default: 100)
 */

use super::ticket::{RngTickets, TicketSource};
use crate::core::errors::SchedulerError;
use crate::core::types::SchedulerResult;
use serde::{Deserialize, Serialize};

pub const ENV_POLICY: &str = "KERNEL_SCHED_POLICY";
pub const ENV_SEED: &str = "KERNEL_SCHED_SEED";
pub const ENV_TICKS: &str = "KERNEL_SCHED_TICKS";

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Registered policy identifier
    pub policy: String,
    /// Lottery seed, `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Scheduling events driven by the simulation
    pub ticks: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: "mq".to_string(),
            seed: None,
            ticks: 100,
        }
    }
}

impl SchedulerConfig {
    /// Defaults overridden by any `KERNEL_SCHED_*` variables that are set
    pub fn from_env() -> SchedulerResult<Self> {
        let mut config = Self::default();

        if let Ok(policy) = std::env::var(ENV_POLICY) {
            config.policy = policy.trim().to_lowercase();
        }
        if let Ok(seed) = std::env::var(ENV_SEED) {
            config.seed = Some(parse_var(ENV_SEED, &seed)?);
        }
        if let Ok(ticks) = std::env::var(ENV_TICKS) {
            config.ticks = parse_var(ENV_TICKS, &ticks)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document, missing fields take their defaults
    pub fn from_json(json: &str) -> SchedulerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SchedulerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SchedulerResult<()> {
        if self.policy.is_empty() {
            return Err(SchedulerError::InvalidConfig(
                "policy identifier must not be empty".to_string(),
            ));
        }
        if self.ticks == 0 {
            return Err(SchedulerError::InvalidConfig(
                "ticks must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Ticket source for the lottery policy
    pub fn ticket_source(&self) -> Box<dyn TicketSource> {
        match self.seed {
            Some(seed) => Box::new(RngTickets::seeded(seed)),
            None => Box::new(RngTickets::from_entropy()),
        }
    }
}

fn parse_var(name: &str, value: &str) -> SchedulerResult<u64> {
    value.trim().parse().map_err(|e| {
        SchedulerError::InvalidConfig(format!("{}={:?}: {}", name, value, e))
    })
}
