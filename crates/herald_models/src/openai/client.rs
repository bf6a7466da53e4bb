use super::{OpenAIChatMessage, OpenAIChatRequest, OpenAIChatResponse};
use crate::http::{DEFAULT_REQUEST_TIMEOUT, build_http_client, ensure_success, transport_error};
use herald_error::{GenerationError, GenerationErrorKind, GenerationResult};
use herald_interface::TextCompletion;
use reqwest::Client;
use tracing::{debug, error, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const SYSTEM_PROMPT: &str =
    "You are a professional content creator specializing in social media and blog content.";
const TEMPERATURE: f32 = 0.7;

/// Model used when `OPENAI_MODEL` is not set.
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAIClient {
    /// Creates a new OpenAI client.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` for an empty key.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> GenerationResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MissingApiKey(
                "openai".to_string(),
            )));
        }
        debug!("Creating new OpenAI client");
        Ok(Self {
            client: build_http_client(DEFAULT_REQUEST_TIMEOUT)?,
            api_key,
            model: model.into(),
            endpoint: OPENAI_API_URL.to_string(),
        })
    }

    /// Point the client at a different chat completions endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Build the request body for a single-turn prompt.
    pub fn build_request(&self, prompt: &str) -> GenerationResult<OpenAIChatRequest> {
        OpenAIChatRequest::builder()
            .model(self.model.clone())
            .messages(vec![
                OpenAIChatMessage::new("system", SYSTEM_PROMPT),
                OpenAIChatMessage::new("user", prompt),
            ])
            .temperature(TEMPERATURE)
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Decode(e.to_string())))
    }

    /// Sends a request to the OpenAI API.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn send(&self, request: &OpenAIChatRequest) -> GenerationResult<OpenAIChatResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("openai", e))?;

        let response = ensure_success("openai", response).await?;

        let parsed: OpenAIChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            GenerationError::new(GenerationErrorKind::Decode(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(response_id = %parsed.id(), choices = parsed.choices().len(), "Received response from OpenAI");
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl TextCompletion for OpenAIClient {
    #[instrument(skip(self, prompt), fields(provider = "openai", prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        let request = self.build_request(prompt)?;
        let response = self.send(&request).await?;
        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(GenerationError::new(GenerationErrorKind::EmptyResponse)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
