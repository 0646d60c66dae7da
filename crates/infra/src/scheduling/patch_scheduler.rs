//! Cron scheduler for the patch reminder tick.
//!
//! Wraps [`PatchReminderService`] in an every-minute job with explicit
//! lifecycle management: join handles are tracked, cancellation is explicit,
//! and every asynchronous operation is wrapped in a timeout. A tick that
//! fails or times out is logged and the cadence continues.

use std::sync::Arc;
use std::time::Instant;

use poroherald_core::PatchReminderService;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::error::{SchedulerError, SchedulerResult};
use super::SchedulerConfig;

/// Patch reminder scheduler with explicit lifecycle management.
pub struct PatchScheduler {
    scheduler: Option<JobScheduler>,
    config: SchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    service: Arc<PatchReminderService>,
}

impl PatchScheduler {
    /// Create a scheduler with the default every-minute cadence.
    pub fn new(service: Arc<PatchReminderService>) -> Self {
        Self::with_config(SchedulerConfig::default(), service)
    }

    /// Create a scheduler with a custom configuration.
    pub fn with_config(config: SchedulerConfig, service: Arc<PatchReminderService>) -> Self {
        Self {
            scheduler: None,
            config,
            monitor_handle: None,
            cancellation: CancellationToken::new(),
            service,
        }
    }

    /// Start the scheduler, spawning the monitoring task.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;
        let start_timeout = self.config.start_timeout;

        let start_result = tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?;

        start_result.map_err(|source| SchedulerError::StartFailed { source })?;

        self.scheduler = Some(scheduler_instance);

        let cancel = self.cancellation.clone();
        let handle = tokio::spawn(async move {
            cancel.cancelled().await;
            debug!("patch scheduler monitor cancelled");
        });

        self.monitor_handle = Some(handle);
        info!("Patch scheduler started");
        Ok(())
    }

    /// Stop the scheduler and wait for the monitor task to finish.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let mut scheduler = match self.scheduler.take() {
            Some(scheduler) => scheduler,
            None => return Err(SchedulerError::NotRunning),
        };

        let stop_timeout = self.config.stop_timeout;
        let stop_result =
            tokio::time::timeout(stop_timeout, async move { scheduler.shutdown().await })
                .await
                .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?;

        stop_result.map_err(|source| SchedulerError::StopFailed { source })?;

        if let Some(handle) = self.monitor_handle.take() {
            let join_timeout = self.config.join_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??
        }

        info!("Patch scheduler stopped");
        self.cancellation = CancellationToken::new();
        Ok(())
    }

    /// Returns true when a scheduler instance is active.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed { source })?;
        let cron_expr = self.config.cron_expression.clone();
        let service = self.service.clone();
        let job_timeout = self.config.job_timeout;

        let job_definition = Job::new_async(cron_expr.as_str(), move |_id, _lock| {
            let service = service.clone();

            Box::pin(async move {
                let started = Instant::now();

                match tokio::time::timeout(job_timeout, service.run_tick()).await {
                    Ok(Ok(())) => {
                        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "patch tick finished");
                    }
                    Ok(Err(err)) => {
                        error!(error = %err, "patch tick failed");
                    }
                    Err(_) => {
                        warn!(timeout_secs = job_timeout.as_secs(), "patch tick timed out");
                    }
                }
            })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        let job_id = job_definition.guid();
        scheduler
            .add(job_definition)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        debug!(cron = %self.config.cron_expression, job_id = %job_id, "Registered patch tick job");
        Ok(scheduler)
    }
}

impl Drop for PatchScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("PatchScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}
