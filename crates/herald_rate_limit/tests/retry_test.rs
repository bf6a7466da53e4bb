use herald_error::RetryableError;
use herald_rate_limit::{RetryPolicy, RetryPolicyBuilder};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, derive_more::Display)]
#[display("{}", message)]
struct FakeError {
    message: &'static str,
    retryable: bool,
}

impl RetryableError for FakeError {
    fn is_retryable(&self) -> bool {
        self.retryable
    }
}

fn fast_policy(max_retries: usize) -> RetryPolicy {
    RetryPolicyBuilder::default()
        .max_retries(max_retries)
        .initial_backoff_ms(1u64)
        .max_delay(Duration::from_millis(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_succeeds_after_transient_failures() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result: Result<&str, FakeError> = fast_policy(3)
        .run("flaky", || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(FakeError {
                        message: "503",
                        retryable: true,
                    })
                } else {
                    Ok("done")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_stops_on_permanent_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result: Result<(), FakeError> = fast_policy(5)
        .run("invalid", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(FakeError {
                    message: "400",
                    retryable: false,
                })
            }
        })
        .await;

    assert_eq!(result.unwrap_err().message, "400");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_budget_is_respected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result: Result<(), FakeError> = fast_policy(2)
        .run("down", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(FakeError {
                    message: "timeout",
                    retryable: true,
                })
            }
        })
        .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_disabled_policy_makes_one_attempt() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result: Result<(), FakeError> = RetryPolicy::disabled()
        .run("once", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(FakeError {
                    message: "503",
                    retryable: true,
                })
            }
        })
        .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
