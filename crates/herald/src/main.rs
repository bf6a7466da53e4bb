//! Herald CLI binary.
//!
//! This binary provides command-line access to Herald:
//! - Run the post cycle scheduler
//! - Post a single idea on demand
//! - Report history statistics
//! - Verify platform credentials
//! - Show the configured schedule

use clap::Parser;
use herald::{HeraldSettings, ObservabilityConfig, init_observability};
use herald_error::HeraldResult;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::Cli;

    // Variables already in the environment take precedence over .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = match HeraldSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        settings.log_level()
    };
    let observability = ObservabilityConfig::new(log_level).with_format(settings.log_format());
    if let Err(e) = init_observability(&observability) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match execute(cli.command, &settings).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Herald failed");
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: cli::Commands, settings: &HeraldSettings) -> HeraldResult<ExitCode> {
    use cli::{
        Commands, post_once, run_service, show_schedule, show_stats, verify_credentials,
    };

    match command {
        Commands::Run { now } => {
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Herald starting");
            let config = settings.validate()?;
            run_service(&config, now).await
        }
        Commands::Stats { recent } => show_stats(&settings.post_history_path(), recent).await,
        Commands::Verify => verify_credentials(&settings.validate()?).await,
        Commands::Post => post_once(&settings.validate()?).await,
        Commands::Schedule => Ok(show_schedule(&settings.schedule_times()?)),
    }
}
