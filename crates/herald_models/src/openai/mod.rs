//! OpenAI Chat Completions API client.

mod client;
mod dto;

pub use client::{OPENAI_DEFAULT_MODEL, OpenAIClient};
pub use dto::{OpenAIChatMessage, OpenAIChatRequest, OpenAIChatResponse, OpenAIChoice};
