//! Capability traits for the Herald publishing engine.
//!
//! The orchestration core reaches text providers and publishing platforms only
//! through the traits defined here, so concrete clients can be swapped for
//! test doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{Publisher, TextCompletion};
pub use types::{CredentialCheck, CredentialStatus};
