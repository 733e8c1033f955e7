/*!
 * Priority Scheduler Kernel - Main Entry Point
 *
 * Host simulation of one core's scheduling loop:
 * - Loads scheduler configuration from KERNEL_SCHED_* variables
 * - Selects the configured policy from the registry
 * - Drives timer ticks into the policy until done or Ctrl+C
 */

use anyhow::Context;
use prio_sched::{
    init_tracing, LocalIrq, PolicyRegistry, SchedulerConfig, Simulation, ThreadRef,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Simulated timer interrupt period
const TICK_PERIOD: Duration = Duration::from_millis(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured tracing
    init_tracing();

    info!("Scheduler kernel starting...");
    info!("================================================");

    let config = SchedulerConfig::from_env().context("Failed to load scheduler configuration")?;
    info!(
        policy = %config.policy,
        seed = ?config.seed,
        ticks = config.ticks,
        "Configuration loaded"
    );

    let registry = PolicyRegistry::<ThreadRef>::with_builtin();
    info!(available = ?registry.names(), "Policies registered");

    let irq = Arc::new(LocalIrq::new());
    let policy = registry
        .select(&config, irq.clone())
        .with_context(|| format!("Failed to select policy '{}'", config.policy))?;

    let mut simulation = Simulation::with_demo_population(policy);

    info!("Kernel initialization complete");
    info!("================================================");
    info!("Driving {} timer ticks - press Ctrl+C to stop early", config.ticks);

    let mut timer = tokio::time::interval(TICK_PERIOD);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    while simulation.tick() < config.ticks {
        tokio::select! {
            _ = timer.tick() => {
                simulation.step();
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!(error = %e, "Failed to listen for Ctrl+C");
                }
                info!(tick = simulation.tick(), "Shutdown requested");
                break;
            }
        }
    }

    let report = simulation.report();
    let stats = simulation.policy().stats();

    for share in &report.per_thread {
        info!(
            thread = %share.name,
            class = ?share.class,
            picks = share.picks,
            "Thread share"
        );
    }
    info!(
        ticks = report.ticks,
        idle = report.idle_ticks,
        realtime = report.picks.realtime,
        interactive = report.picks.interactive,
        normal = report.picks.normal,
        daemon = report.picks.daemon,
        masked_sections = irq.masked_sections(),
        "Simulation finished"
    );
    let stats_json =
        serde_json::to_string(&stats).context("Failed to serialize scheduler stats")?;
    info!(stats = %stats_json, "Scheduler statistics");

    Ok(())
}
