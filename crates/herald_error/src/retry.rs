//! Retry classification shared by provider and platform errors.

/// Trait for errors that support retry logic.
///
/// Transient errors like 503 (service unavailable), 429 (rate limit),
/// or dropped connections should return true. Permanent errors like 401
/// (unauthorized) or a failed content validation should return false.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}
