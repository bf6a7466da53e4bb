//! Anthropic wire types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A chat message in an Anthropic request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct AnthropicMessage {
    /// "user" or "assistant"
    role: String,
    /// Plain text content
    content: String,
}

impl AnthropicMessage {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AnthropicRequest {
    /// Model identifier
    model: String,
    /// Completion token cap
    max_tokens: u32,
    /// Conversation
    messages: Vec<AnthropicMessage>,
}

impl AnthropicRequest {
    /// Create a builder.
    pub fn builder() -> AnthropicRequestBuilder {
        AnthropicRequestBuilder::default()
    }
}

/// A content block in an Anthropic response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContentBlock {
    /// Text output
    Text {
        /// Generated text
        text: String,
    },
    /// Any block type Herald does not consume
    #[serde(other)]
    Other,
}

/// Response body from `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct AnthropicResponse {
    /// Message id
    id: String,
    /// Content blocks
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
}

impl AnthropicResponse {
    /// Concatenated text of all text blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.as_str()),
                AnthropicContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}
