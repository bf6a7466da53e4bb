//! Retry and backoff for outbound calls.
//!
//! Every text completion and every individual platform API request runs
//! through a [`RetryPolicy`]. Errors classify themselves through
//! [`herald_error::RetryableError`]; permanent errors fail immediately.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod policy;

pub use policy::{RetryPolicy, RetryPolicyBuilder, RetryPolicyBuilderError};
