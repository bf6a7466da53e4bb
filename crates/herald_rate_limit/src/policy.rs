//! Exponential backoff retry policy.

use derive_getters::Getters;
use herald_error::RetryableError;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};

const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1000;
const DEFAULT_MAX_DELAY_SECS: u64 = 30;

/// Retry budget with exponential backoff and jitter.
///
/// `max_retries` counts retries after the first attempt, so a policy with
/// `max_retries = 3` makes at most four attempts. Zero disables retry.
///
/// # Examples
///
/// ```
/// use herald_rate_limit::RetryPolicyBuilder;
///
/// let policy = RetryPolicyBuilder::default()
///     .max_retries(5usize)
///     .initial_backoff_ms(200u64)
///     .build()
///     .unwrap();
///
/// assert_eq!(*policy.max_retries(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct RetryPolicy {
    /// Retries after the first attempt
    #[builder(default = "3")]
    max_retries: usize,
    /// Delay before the first retry, doubled each time
    #[builder(default = "DEFAULT_INITIAL_BACKOFF_MS")]
    initial_backoff_ms: u64,
    /// Upper bound on a single delay
    #[builder(default = "Duration::from_secs(DEFAULT_MAX_DELAY_SECS)")]
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RetryPolicy {
    /// Policy with the given retry budget and default backoff.
    pub fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            max_delay: Duration::from_secs(DEFAULT_MAX_DELAY_SECS),
        }
    }

    /// Policy that makes exactly one attempt.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    fn strategy(&self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(self.initial_backoff_ms.max(1))
            .factor(2)
            .max_delay(self.max_delay)
            .map(jitter)
            .take(self.max_retries)
    }

    /// Run `operation`, retrying retryable failures with backoff.
    ///
    /// # Arguments
    ///
    /// * `label` - Name of the operation, used in logs
    /// * `operation` - Factory producing one attempt per call
    ///
    /// # Errors
    ///
    /// Returns the first permanent error, or the last retryable error once the
    /// budget is spent.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError + Display,
    {
        let budget = self.max_retries;
        let mut attempt = 0usize;

        Retry::spawn(self.strategy(), || {
            attempt += 1;
            let current = attempt;
            let fut = operation();
            async move {
                match fut.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() && current <= budget => {
                        tracing::warn!(
                            operation = label,
                            attempt = current,
                            max_retries = budget,
                            error = %e,
                            "Transient failure, will retry"
                        );
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        tracing::warn!(operation = label, attempt = current, error = %e, "Giving up");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }
}
