/*!
 * Configuration Tests
 * Environment loading and registry selection
 */

use pretty_assertions::assert_eq;
use prio_sched::scheduler::config::{ENV_POLICY, ENV_SEED, ENV_TICKS};
use prio_sched::{
    EntityId, LocalIrq, PolicyRegistry, Priority, SchedulerConfig, SchedulerError,
    SchedulingEntity,
};
use serial_test::serial;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
struct Task(EntityId, Priority);

impl SchedulingEntity for Task {
    fn id(&self) -> EntityId {
        self.0
    }

    fn priority(&self) -> Priority {
        self.1
    }
}

fn clear_env() {
    for name in [ENV_POLICY, ENV_SEED, ENV_TICKS] {
        std::env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = SchedulerConfig::from_env().unwrap();
    assert_eq!(config, SchedulerConfig::default());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    std::env::set_var(ENV_POLICY, " ADV ");
    std::env::set_var(ENV_SEED, "42");
    std::env::set_var(ENV_TICKS, "500");

    let config = SchedulerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.policy, "adv");
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.ticks, 500);
}

#[test]
#[serial]
fn test_malformed_environment_is_rejected() {
    clear_env();
    std::env::set_var(ENV_SEED, "not-a-number");
    let seed = SchedulerConfig::from_env();

    std::env::set_var(ENV_SEED, "1");
    std::env::set_var(ENV_TICKS, "0");
    let ticks = SchedulerConfig::from_env();
    clear_env();

    assert!(matches!(seed, Err(SchedulerError::InvalidConfig(_))));
    assert!(matches!(ticks, Err(SchedulerError::InvalidConfig(_))));
}

#[test]
#[serial]
fn test_unknown_policy_fails_selection() {
    clear_env();
    std::env::set_var(ENV_POLICY, "cfs");
    let config = SchedulerConfig::from_env().unwrap();
    clear_env();

    let registry = PolicyRegistry::<Task>::with_builtin();
    let result = registry.select(&config, Arc::new(LocalIrq::new()));

    assert_eq!(
        result.err(),
        Some(SchedulerError::UnknownPolicy("cfs".to_string()))
    );
}

#[test]
fn test_registry_selects_configured_policy() {
    let registry = PolicyRegistry::<Task>::with_builtin();
    assert_eq!(registry.names(), &["mq", "adv"]);

    for name in ["mq", "adv"] {
        let config = SchedulerConfig {
            policy: name.to_string(),
            seed: Some(3),
            ..Default::default()
        };
        let policy = registry.select(&config, Arc::new(LocalIrq::new())).unwrap();
        assert_eq!(policy.name(), name);

        policy.add_to_runqueue(Task(1, 0));
        assert_eq!(policy.pick_next_entity().map(|task| task.0), Some(1));
        assert_eq!(policy.stats().policy, name);
    }
}

#[test]
fn test_config_from_json_document() {
    let config = SchedulerConfig::from_json(r#"{"policy": "adv", "seed": 9, "ticks": 250}"#).unwrap();
    assert_eq!(
        config,
        SchedulerConfig {
            policy: "adv".to_string(),
            seed: Some(9),
            ticks: 250,
        }
    );
}
