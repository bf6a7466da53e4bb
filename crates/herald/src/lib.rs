//! Herald - scheduled multi-platform content publishing.
//!
//! Herald picks an idea from a rotating content plan, has a text generation
//! provider write copy for each target platform, publishes it, and records the
//! outcome in an append-only history.
//!
//! # Architecture
//!
//! Herald is organized as a workspace with focused crates:
//!
//! - `herald_error` - Error types
//! - `herald_core` - Plan, content, result and history data types
//! - `herald_interface` - `TextCompletion` and `Publisher` traits
//! - `herald_rate_limit` - Retry with exponential backoff
//! - `herald_models` - Anthropic and OpenAI clients
//! - `herald_narrative` - Prompts, branding and response parsing
//! - `herald_social` - Twitter, Reddit and Blogger publishers
//! - `herald_actor` - Post cycle orchestration and the history ledger
//! - `herald_server` - Time-of-day scheduling
//!
//! This crate adds environment configuration, logging setup and service
//! wiring, and re-exports the rest for convenience.
//!
//! # Quick Start
//!
//! ```no_run
//! use herald::{HeraldSettings, build_orchestrator};
//!
//! # async fn example() -> herald::HeraldResult<()> {
//! let config = HeraldSettings::from_env()?.validate()?;
//! let orchestrator = build_orchestrator(&config)?;
//! orchestrator.run_cycle().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bootstrap;
mod config;
mod observability;

pub use bootstrap::{build_completion, build_dispatcher, build_orchestrator, user_agent};
pub use config::{
    AiProvider, BloggerConfig, HeraldConfig, HeraldSettings, LogFormat, ProviderConfig,
    RedditConfig, RunEnvironment, TwitterConfig,
};
pub use observability::{ObservabilityConfig, init_observability};

pub use herald_actor::*;
pub use herald_core::*;
pub use herald_error::*;
pub use herald_interface::*;
pub use herald_server::*;
