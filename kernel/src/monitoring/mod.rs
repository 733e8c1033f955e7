/*!
 * Monitoring Module
 * Structured logging for the scheduler and the simulation binary
 */

mod tracer;

pub use tracer::{init_tracing, ENV_TRACE_JSON};
