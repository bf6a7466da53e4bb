//! Single-shot posting.

use herald::{CycleOutcome, HeraldConfig, build_orchestrator, describe_entry};
use herald_error::{ConfigError, HeraldResult};
use std::process::ExitCode;

/// Process one idea and print what was recorded.
pub async fn post_once(config: &HeraldConfig) -> HeraldResult<ExitCode> {
    let orchestrator = build_orchestrator(config)?;
    if orchestrator.dispatcher().enabled_platforms().is_empty() {
        return Err(ConfigError::new("No platform is enabled with credentials").into());
    }

    match orchestrator.process_next().await? {
        CycleOutcome::Completed(report) => {
            if report.entries().is_empty() {
                println!("No content ideas available");
            }
            for entry in report.entries() {
                println!("{}", describe_entry(entry));
                for result in entry.results() {
                    match result.error() {
                        Some(error) => println!("  {}: failed ({})", result.platform(), error),
                        None => println!(
                            "  {}: ok{}",
                            result.platform(),
                            result
                                .url()
                                .as_deref()
                                .map(|url| format!(" {}", url))
                                .unwrap_or_default()
                        ),
                    }
                }
            }
        }
        CycleOutcome::AlreadyRunning => println!("A post cycle is already running"),
    }
    Ok(ExitCode::SUCCESS)
}
