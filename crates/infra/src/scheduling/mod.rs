//! Scheduling infrastructure for the recurring reminder ticks
//!
//! Two cron-based schedulers share one cadence (every minute) but run
//! independently: one for the patch rules, one for the Clash rules. They
//! share the ledger only through disjoint id namespaces, so no coordination
//! beyond the store's own locking is needed.
//!
//! Both schedulers follow the same runtime rules:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on all async operations

pub mod clash_scheduler;
pub mod error;
pub mod patch_scheduler;

use std::time::Duration;

pub use clash_scheduler::ClashScheduler;
pub use error::{SchedulerError, SchedulerResult};
pub use patch_scheduler::PatchScheduler;

/// Shared scheduler settings.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Cron expression describing the tick cadence.
    pub cron_expression: String,
    /// Timeout applied to a single tick execution.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
    /// Timeout for awaiting the monitor task join handle.
    pub join_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cron_expression: "0 * * * * *".into(), // every minute
            job_timeout: Duration::from_secs(30),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            join_timeout: Duration::from_secs(5),
        }
    }
}
