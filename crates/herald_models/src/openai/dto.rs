//! OpenAI wire types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct OpenAIChatMessage {
    /// "system", "user" or "assistant"
    role: String,
    /// Message text; null for tool-only replies
    #[serde(default)]
    content: Option<String>,
}

impl OpenAIChatMessage {
    /// Create a message with the given role.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(content.into()),
        }
    }
}

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct OpenAIChatRequest {
    /// Model identifier
    model: String,
    /// Conversation
    messages: Vec<OpenAIChatMessage>,
    /// Sampling temperature
    temperature: f32,
}

impl OpenAIChatRequest {
    /// Create a builder.
    pub fn builder() -> OpenAIChatRequestBuilder {
        OpenAIChatRequestBuilder::default()
    }
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct OpenAIChoice {
    /// Generated message
    message: OpenAIChatMessage,
}

/// Response body from `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct OpenAIChatResponse {
    /// Completion id
    #[serde(default)]
    id: String,
    /// Choices, first one used
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

impl OpenAIChatResponse {
    /// Text of the first choice, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}
