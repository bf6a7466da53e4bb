//! Shared HTTP plumbing for platform API clients.

use herald_error::{PublishError, PublishErrorKind};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::error;

/// Request timeout applied to every platform call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build a reqwest client with a user agent and the default timeout.
pub(crate) fn build_client(user_agent: &str) -> Result<Client, PublishError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| PublishError::new(PublishErrorKind::Transport(e.to_string())))
}

/// Map a send failure to a transport error.
#[track_caller]
pub(crate) fn transport_error(platform: &str, e: reqwest::Error) -> PublishError {
    error!(platform, error = ?e, "Failed to send request");
    PublishError::new(PublishErrorKind::Transport(format!(
        "{} request failed: {}",
        platform, e
    )))
}

/// Map a decode failure to a permanent API error.
#[track_caller]
pub(crate) fn decode_error(platform: &str, e: reqwest::Error) -> PublishError {
    error!(platform, error = ?e, "Failed to parse response");
    PublishError::new(PublishErrorKind::Api {
        status: 200,
        message: format!("Failed to parse {} response: {}", platform, e),
    })
}

/// Classify a non-success status.
pub(crate) fn status_error(status: StatusCode, message: String) -> PublishError {
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PublishErrorKind::Authentication(message)
        }
        StatusCode::NOT_FOUND => PublishErrorKind::TargetNotFound(message),
        _ => PublishErrorKind::Api {
            status: status.as_u16(),
            message,
        },
    };
    PublishError::new(kind)
}

/// Pass successful responses through, classify the rest.
pub(crate) async fn ensure_success(
    platform: &str,
    response: Response,
) -> Result<Response, PublishError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error!(platform, status = %status, body = %body, "Platform returned error");
    Err(status_error(status, body))
}
