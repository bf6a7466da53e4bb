//! Anthropic Messages API client.

mod client;
mod dto;

pub use client::{ANTHROPIC_DEFAULT_MODEL, AnthropicClient};
pub use dto::{AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicResponse};
