//! Long-running scheduler.

use herald::{CycleScheduler, HeraldConfig, RunEnvironment, build_orchestrator};
use herald_error::{ConfigError, HeraldResult};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Schedule every configured time and run until a shutdown signal.
///
/// A scheduler task that panics ends the process with failure.
#[instrument(skip(config))]
pub async fn run_service(config: &HeraldConfig, now: bool) -> HeraldResult<ExitCode> {
    let orchestrator = Arc::new(build_orchestrator(config)?);
    if orchestrator.dispatcher().enabled_platforms().is_empty() {
        return Err(ConfigError::new(
            "No platform is enabled with credentials; check ENABLE_* and platform credentials",
        )
        .into());
    }

    let mut scheduler = CycleScheduler::new();
    for time in config.schedule_times() {
        let orchestrator = Arc::clone(&orchestrator);
        scheduler.schedule(*time, move || {
            let orchestrator = Arc::clone(&orchestrator);
            async move { orchestrator.run_cycle().await.map(|_| ()) }
        })?;
        info!(time = %time, cron = %time.cron_expression(), "Post cycle scheduled");
    }

    if now || *config.environment() == RunEnvironment::Development {
        info!("Running initial post cycle");
        let orchestrator = Arc::clone(&orchestrator);
        scheduler.run_once(async move { orchestrator.run_cycle().await.map(|_| ()) });
    }

    info!(
        platforms = ?orchestrator.dispatcher().enabled_platforms(),
        dry_run = *config.dry_run(),
        "Herald is running, press Ctrl+C to stop"
    );

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down");
                scheduler.shutdown();
                return Ok(ExitCode::SUCCESS);
            }
            ended = scheduler.join_next() => match ended {
                Some(Ok(())) => continue,
                Some(Err(e)) => {
                    error!(error = %e, "Scheduler task failed");
                    return Ok(ExitCode::FAILURE);
                }
                None => {
                    error!("No scheduled tasks left");
                    return Ok(ExitCode::FAILURE);
                }
            },
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
