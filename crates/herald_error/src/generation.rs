//! Text generation error types.

use crate::RetryableError;

/// Text generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not configured for the selected provider
    #[display("API key missing for provider {}", _0)]
    MissingApiKey(String),
    /// Provider returned a non-success status
    #[display("Provider returned HTTP {}: {}", status, message)]
    Provider {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },
    /// Request never reached the provider or the connection dropped
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// Provider response could not be decoded
    #[display("Malformed provider response: {}", _0)]
    Decode(String),
    /// Provider answered without any text
    #[display("Provider returned an empty completion")]
    EmptyResponse,
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::Provider { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504 | 529)
            }
            GenerationErrorKind::Transport(_) => true,
            _ => false,
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use herald_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::Provider {
///     status: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for text generation.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;
