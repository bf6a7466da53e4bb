//! Error types for Herald.
//!
//! This crate provides the foundation error types used throughout the Herald workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use herald_error::{ConfigError, HeraldResult};
//!
//! fn load() -> HeraldResult<String> {
//!     Err(ConfigError::new("AI_PROVIDER is not set"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod publish;
mod retry;
mod storage;

pub use config::ConfigError;
pub use error::{HeraldError, HeraldErrorKind, HeraldResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use publish::{PublishError, PublishErrorKind, PublishResult};
pub use retry::RetryableError;
pub use storage::{StorageError, StorageErrorKind, StorageResult};
