//! Spawned daily jobs.

use crate::ScheduleTime;
use chrono::Local;
use herald_error::HeraldResult;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, instrument, warn};

/// Runs a job at each scheduled time of day.
///
/// Every time gets its own task. Job errors are logged and the task keeps
/// going; a task only ends if the job panics or the scheduler shuts down.
#[derive(Debug, Default)]
pub struct CycleScheduler {
    tasks: JoinSet<()>,
    times: Vec<ScheduleTime>,
}

impl CycleScheduler {
    /// Scheduler with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task firing `job` daily at `time`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the time cannot be compiled to a schedule.
    #[instrument(skip(self, job), fields(time = %time, cron = %time.cron_expression()))]
    pub fn schedule<F, Fut>(&mut self, time: ScheduleTime, job: F) -> HeraldResult<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HeraldResult<()>> + Send + 'static,
    {
        let schedule = time.schedule()?;
        if self.times.contains(&time) {
            warn!("Time already scheduled, skipping duplicate");
            return Ok(());
        }

        let job = Arc::new(job);
        self.tasks.spawn(async move {
            loop {
                let now = Local::now();
                let Some(next) = schedule.after(&now).next() else {
                    warn!(time = %time, "Schedule has no upcoming firing, stopping");
                    return;
                };
                let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
                debug!(time = %time, next = %next, "Waiting for next firing");
                tokio::time::sleep(wait).await;

                info!(time = %time, "Scheduled job firing");
                if let Err(e) = job().await {
                    error!(time = %time, error = %e, "Scheduled job failed");
                }
            }
        });

        self.times.push(time);
        info!("Job scheduled");
        Ok(())
    }

    /// Spawn `job` once, right now, alongside the daily tasks.
    ///
    /// The task ends when the job does, so [`join_next`](Self::join_next)
    /// yields `Ok(())` for it.
    pub fn run_once<Fut>(&mut self, job: Fut)
    where
        Fut: Future<Output = HeraldResult<()>> + Send + 'static,
    {
        self.tasks.spawn(async move {
            if let Err(e) = job.await {
                error!(error = %e, "Immediate job failed");
            }
        });
    }

    /// Times with a running task, in scheduling order.
    pub fn scheduled_times(&self) -> &[ScheduleTime] {
        &self.times
    }

    /// True when `time` has a task.
    pub fn is_scheduled(&self, time: ScheduleTime) -> bool {
        self.times.contains(&time)
    }

    /// Wait for the next task to end.
    ///
    /// Tasks run forever, so this only resolves when one panics or was
    /// aborted. `None` means nothing is scheduled.
    pub async fn join_next(&mut self) -> Option<Result<(), JoinError>> {
        self.tasks.join_next().await
    }

    /// Abort every task.
    pub fn shutdown(&mut self) {
        debug!(tasks = self.tasks.len(), "Aborting scheduled jobs");
        self.tasks.abort_all();
        self.times.clear();
    }
}
