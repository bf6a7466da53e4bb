//! Text generation provider clients for Herald.
//!
//! Each provider implements [`herald_interface::TextCompletion`] with a plain
//! HTTPS request. Providers sit behind feature flags, both enabled by default.
//!
//! # Available Providers
//!
//! - **Anthropic** (Messages API) - `anthropic` feature
//! - **OpenAI** (Chat Completions API) - `openai` feature
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "anthropic")]
//! # {
//! use herald_interface::TextCompletion;
//! use herald_models::AnthropicClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnthropicClient::new("sk-ant-...", "claude-sonnet-4-20250514")?;
//! let text = client.complete("Write a haiku about Rust").await?;
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod http;

pub use http::{DEFAULT_REQUEST_TIMEOUT, build_http_client};

#[cfg(feature = "anthropic")]
mod anthropic;

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "anthropic")]
pub use anthropic::{
    ANTHROPIC_DEFAULT_MODEL, AnthropicClient, AnthropicContentBlock, AnthropicMessage,
    AnthropicRequest, AnthropicResponse,
};

#[cfg(feature = "openai")]
pub use openai::{
    OPENAI_DEFAULT_MODEL, OpenAIChatMessage, OpenAIChatRequest, OpenAIChatResponse, OpenAIChoice,
    OpenAIClient,
};
