//! Core data types for the Herald publishing engine.
//!
//! This crate provides the data model shared by every Herald crate: the
//! content plan, generated copy, per-platform results and the post history.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod content;
mod history;
mod plan;
mod platform;
mod result;

pub use content::{GeneratedContent, Tweet};
pub use history::{HistoryEntry, PostHistory};
pub use plan::{
    Branding, ContentIdea, ContentIdeaBuilder, ContentIdeaBuilderError, ContentPlan, PlanSettings,
    RotationStrategy,
};
pub use platform::Platform;
pub use result::{PlatformResult, PostedTweet};
