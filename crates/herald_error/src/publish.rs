//! Publishing error types.

use crate::RetryableError;

/// Publishing error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// Publisher has no client (credentials absent)
    #[display("{} client not initialized", _0)]
    NotConfigured(String),
    /// Content failed platform validation before any network call
    #[display("{}", _0)]
    Validation(String),
    /// Platform rejected the request for rate limiting
    #[display("Rate limited: {}", _0)]
    RateLimited(String),
    /// Posting target does not exist (subreddit, blog)
    #[display("Target not found: {}", _0)]
    TargetNotFound(String),
    /// Credentials were rejected
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
    /// Platform API returned an error status
    #[display("API returned HTTP {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or platform message
        message: String,
    },
    /// Request never reached the platform or the connection dropped
    #[display("Transport failure: {}", _0)]
    Transport(String),
}

impl PublishErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Validation, authentication and missing-target failures are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            PublishErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            PublishErrorKind::Transport(_) => true,
            _ => false,
        }
    }
}

/// Publishing error with source location tracking.
///
/// # Examples
///
/// ```
/// use herald_error::{PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::Validation(
///     "Reddit post requires both title and body".to_string(),
/// ));
/// assert_eq!(err.message(), "Reddit post requires both title and body");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Human-readable message without location, as recorded in history.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl RetryableError for PublishError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for publishing.
pub type PublishResult<T> = std::result::Result<T, PublishError>;
