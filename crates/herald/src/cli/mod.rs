//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the herald binary.

mod commands;
mod post;
mod run;
mod schedule;
mod stats;
mod verify;

pub use commands::{Cli, Commands};
pub use post::post_once;
pub use run::run_service;
pub use schedule::show_schedule;
pub use stats::show_stats;
pub use verify::verify_credentials;
