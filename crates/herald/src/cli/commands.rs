//! CLI command definitions.

use clap::{Parser, Subcommand};

/// Herald - scheduled multi-platform content publishing
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Generate and publish content on a schedule", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scheduler until interrupted
    Run {
        /// Run one post cycle immediately
        #[arg(long)]
        now: bool,
    },

    /// Print post history statistics
    Stats {
        /// Number of recent entries to list
        #[arg(long, default_value = "5")]
        recent: usize,
    },

    /// Check credentials of every enabled platform
    Verify,

    /// Process one idea now and exit
    Post,

    /// Print the configured schedule with cron expressions and next firings
    Schedule,
}
