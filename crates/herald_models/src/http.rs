//! Shared HTTP plumbing for provider clients.

use herald_error::{GenerationError, GenerationErrorKind};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::error;

/// Request timeout applied to every provider call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build a reqwest client with the given timeout.
///
/// # Errors
///
/// Returns a transport error if the TLS backend cannot be initialised.
pub fn build_http_client(timeout: Duration) -> Result<Client, GenerationError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GenerationError::new(GenerationErrorKind::Transport(e.to_string())))
}

/// Map a send failure to a transport error.
#[track_caller]
pub(crate) fn transport_error(provider: &str, e: reqwest::Error) -> GenerationError {
    error!(provider, error = ?e, "Failed to send request");
    GenerationError::new(GenerationErrorKind::Transport(format!(
        "{} request failed: {}",
        provider, e
    )))
}

/// Turn a non-success response into a provider error.
pub(crate) async fn ensure_success(
    provider: &str,
    response: Response,
) -> Result<Response, GenerationError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error!(provider, status = %status, body = %body, "Provider returned error");
    Err(GenerationError::new(GenerationErrorKind::Provider {
        status: status.as_u16(),
        message: body,
    }))
}
