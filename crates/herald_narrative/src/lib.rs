//! Content generation for Herald.
//!
//! This crate turns a content idea into platform-shaped copy:
//!
//! - **Prompts**: per-platform templates stating format, length, style, audience
//!   and the JSON shape the model must answer with
//! - **Branding**: the optional footer for each platform, with the Twitter
//!   character budget enforced after generation
//! - **Extraction**: fenced-code-block unwrapping and tolerant JSON parsing that
//!   falls back to raw text
//! - **ContentGenerator**: ties the above to a [`herald_interface::TextCompletion`]
//!   behind a retry policy
//!
//! # Example
//!
//! ```rust,ignore
//! use herald_narrative::{ContentGenerator, PromptContext};
//! use herald_core::Platform;
//!
//! let generator = ContentGenerator::new(completion, RetryPolicy::new(3));
//! let context = PromptContext::for_idea(&idea, plan.branding().as_ref());
//! let content = generator.generate(Platform::Reddit, idea.text(), &context).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod branding;
mod extraction;
mod generator;
mod prompt;

pub use branding::{
    TWEET_LIMIT, blogger_block, branding_instructions, enforce_twitter_branding, reddit_block,
    tweet_weight, twitter_block,
};
pub use extraction::{extract_from_code_block, parse_generated};
pub use generator::ContentGenerator;
pub use prompt::{
    PlatformSpec, PromptContext, PromptContextBuilder, build_prompt, build_variation_prompt,
};
