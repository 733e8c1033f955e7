/*!
 * Policy Registry
 * Name-keyed installation and selection of scheduling policies
 */

use super::config::SchedulerConfig;
use super::policy::{LotteryScheduler, MultipleQueueScheduler};
use super::traits::{EntityHandle, SchedulingAlgorithm};
use crate::core::errors::SchedulerError;
use crate::core::guard::InterruptControl;
use crate::core::types::SchedulerResult;
use ahash::AHashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds a policy instance for one core
pub type PolicyFactory<H> =
    fn(&SchedulerConfig, Arc<dyn InterruptControl>) -> Box<dyn SchedulingAlgorithm<H>>;

/// Installed scheduling policies
pub struct PolicyRegistry<H> {
    factories: AHashMap<&'static str, PolicyFactory<H>>,
    order: Vec<&'static str>,
}

impl<H: EntityHandle + 'static> PolicyRegistry<H> {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            factories: AHashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registry with the `mq` and `adv` policies installed
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let builtin: [(&'static str, PolicyFactory<H>); 2] = [
            (MultipleQueueScheduler::<H>::NAME, build_round_robin::<H>),
            (LotteryScheduler::<H>::NAME, build_lottery::<H>),
        ];
        for (name, factory) in builtin {
            if let Err(e) = registry.register(name, factory) {
                warn!(error = %e, "Skipping built-in policy");
            }
        }
        registry
    }

    /// Install a policy under a new identifier
    pub fn register(&mut self, name: &'static str, factory: PolicyFactory<H>) -> SchedulerResult<()> {
        if self.factories.contains_key(name) {
            return Err(SchedulerError::DuplicatePolicy(name.to_string()));
        }
        self.factories.insert(name, factory);
        self.order.push(name);
        Ok(())
    }

    /// Registered identifiers in installation order
    pub fn names(&self) -> &[&'static str] {
        &self.order
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate a policy by identifier
    pub fn create(
        &self,
        name: &str,
        config: &SchedulerConfig,
        irq: Arc<dyn InterruptControl>,
    ) -> SchedulerResult<Box<dyn SchedulingAlgorithm<H>>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SchedulerError::UnknownPolicy(name.to_string()))?;
        Ok(factory(config, irq))
    }

    /// Instantiate and initialise the policy named by `config.policy`
    pub fn select(
        &self,
        config: &SchedulerConfig,
        irq: Arc<dyn InterruptControl>,
    ) -> SchedulerResult<Box<dyn SchedulingAlgorithm<H>>> {
        let policy = self.create(&config.policy, config, irq)?;
        policy.init();
        info!(policy = policy.name(), "Scheduling policy selected");
        Ok(policy)
    }
}

impl<H: EntityHandle + 'static> Default for PolicyRegistry<H> {
    fn default() -> Self {
        Self::with_builtin()
    }
}

fn build_round_robin<H: EntityHandle + 'static>(
    _config: &SchedulerConfig,
    irq: Arc<dyn InterruptControl>,
) -> Box<dyn SchedulingAlgorithm<H>> {
    Box::new(MultipleQueueScheduler::new(irq))
}

fn build_lottery<H: EntityHandle + 'static>(
    config: &SchedulerConfig,
    irq: Arc<dyn InterruptControl>,
) -> Box<dyn SchedulingAlgorithm<H>> {
    Box::new(LotteryScheduler::with_boxed_source(irq, config.ticket_source()))
}
