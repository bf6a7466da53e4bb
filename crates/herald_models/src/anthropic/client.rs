use super::{AnthropicMessage, AnthropicRequest, AnthropicResponse};
use crate::http::{DEFAULT_REQUEST_TIMEOUT, build_http_client, ensure_success, transport_error};
use herald_error::{GenerationError, GenerationErrorKind, GenerationResult};
use herald_interface::TextCompletion;
use reqwest::Client;
use tracing::{debug, error, instrument};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2000;

/// Model used when `ANTHROPIC_MODEL` is not set.
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Anthropic API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model identifier (e.g., "claude-sonnet-4-20250514")
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` for an empty key.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> GenerationResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MissingApiKey(
                "anthropic".to_string(),
            )));
        }
        debug!("Creating new Anthropic client");
        Ok(Self {
            client: build_http_client(DEFAULT_REQUEST_TIMEOUT)?,
            api_key,
            model: model.into(),
            endpoint: ANTHROPIC_API_URL.to_string(),
        })
    }

    /// Point the client at a different messages endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Build the request body for a single-turn prompt.
    pub fn build_request(&self, prompt: &str) -> GenerationResult<AnthropicRequest> {
        AnthropicRequest::builder()
            .model(self.model.clone())
            .max_tokens(MAX_TOKENS)
            .messages(vec![AnthropicMessage::user(prompt)])
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Decode(e.to_string())))
    }

    /// Sends a request to the Anthropic API.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn send(&self, request: &AnthropicRequest) -> GenerationResult<AnthropicResponse> {
        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("anthropic", e))?;

        let response = ensure_success("anthropic", response).await?;

        let parsed: AnthropicResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Anthropic response");
            GenerationError::new(GenerationErrorKind::Decode(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(response_id = %parsed.id(), "Received response from Anthropic");
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl TextCompletion for AnthropicClient {
    #[instrument(skip(self, prompt), fields(provider = "anthropic", prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        let request = self.build_request(prompt)?;
        let text = self.send(&request).await?.text();
        if text.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
        }
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let client = AnthropicClient::new("key", ANTHROPIC_DEFAULT_MODEL).unwrap();
        let request = client.build_request("hello").unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "claude-sonnet-4-20250514");
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = AnthropicClient::new("  ", "m").unwrap_err();
        assert!(matches!(err.kind, GenerationErrorKind::MissingApiKey(_)));
    }
}
