//! Post cycle orchestration for Herald.
//!
//! This crate holds the orchestration engine: everything between "a trigger
//! fired" and "the outcome is on disk".
//!
//! # Architecture
//!
//! - **ContentPlanStore**: loads ideas, branding and settings from JSON
//! - **HistoryLedger**: append-only post history with atomic writes
//! - **IdeaSelector**: sequential or random idea rotation
//! - **PlatformDispatcher**: routes content to publishers and isolates failures
//! - **CycleOrchestrator**: runs a post cycle under a single-slot guard
//! - **HistoryStats**: aggregates the ledger for reporting
//!
//! # Example
//!
//! ```no_run
//! use herald_actor::{CycleOrchestrator, CycleOutcome};
//!
//! # async fn example(orchestrator: CycleOrchestrator) -> herald_error::HeraldResult<()> {
//! match orchestrator.run_cycle().await? {
//!     CycleOutcome::Completed(report) => println!("processed {}", report.processed()),
//!     CycleOutcome::AlreadyRunning => println!("skipped, cycle in progress"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dispatcher;
mod ledger;
mod orchestrator;
mod plan_store;
mod selector;
mod stats;
mod verification;

pub use dispatcher::PlatformDispatcher;
pub use ledger::HistoryLedger;
pub use orchestrator::{
    CycleOrchestrator, CycleOutcome, CycleReport, OrchestratorSettings,
    OrchestratorSettingsBuilder,
};
pub use plan_store::ContentPlanStore;
pub use selector::IdeaSelector;
pub use stats::{HistoryStats, PlatformStats, describe_entry};
pub use verification::VerificationSummary;
