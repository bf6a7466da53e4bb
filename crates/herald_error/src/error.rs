//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, PublishError, StorageError};

/// Foundation error enum collecting every Herald error area.
///
/// # Examples
///
/// ```
/// use herald_error::{ConfigError, HeraldError};
///
/// let err: HeraldError = ConfigError::new("Missing AI_PROVIDER").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeraldErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Publishing error
    #[from(PublishError)]
    Publish(PublishError),
    /// Plan or history storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Herald error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Herald Error: {}", _0)]
pub struct HeraldError(Box<HeraldErrorKind>);

impl HeraldError {
    /// Create a new error from a kind.
    pub fn new(kind: HeraldErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeraldErrorKind {
        &self.0
    }

    /// True when the error is a configuration problem.
    pub fn is_config(&self) -> bool {
        matches!(self.kind(), HeraldErrorKind::Config(_))
    }
}

// Generic From implementation for any type that converts to HeraldErrorKind
impl<T> From<T> for HeraldError
where
    T: Into<HeraldErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Herald operations.
pub type HeraldResult<T> = std::result::Result<T, HeraldError>;
