//! Scheduler error types

use std::time::Duration;

use poroherald_domain::HeraldError;
use thiserror::Error;
use tokio_cron_scheduler::JobSchedulerError;

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Scheduler is already running
    #[error("Scheduler already running")]
    AlreadyRunning,

    /// Scheduler is not running
    #[error("Scheduler not running")]
    NotRunning,

    /// Failed to create scheduler
    #[error("Failed to create scheduler: {source}")]
    CreationFailed { source: JobSchedulerError },

    /// Failed to start scheduler
    #[error("Failed to start scheduler: {source}")]
    StartFailed { source: JobSchedulerError },

    /// Failed to stop scheduler
    #[error("Failed to stop scheduler: {source}")]
    StopFailed { source: JobSchedulerError },

    /// Failed to register job
    #[error("Failed to register job: {source}")]
    JobRegistrationFailed { source: JobSchedulerError },

    /// Operation timed out
    #[error("Operation timed out after {duration:?}")]
    Timeout {
        duration: Duration,
        source: tokio::time::error::Elapsed,
    },

    /// Task join failed
    #[error("Task join failed: {0}")]
    TaskJoinFailed(#[from] tokio::task::JoinError),
}

impl From<SchedulerError> for HeraldError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => {
                HeraldError::InvalidInput(err.to_string())
            }
            _ => HeraldError::Internal(err.to_string()),
        }
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
