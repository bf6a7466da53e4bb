//! Storage error types for the content plan and post history files.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Content plan could not be read
    #[display("Failed to read content plan: {}", _0)]
    PlanLoad(String),
    /// Content plan is not valid JSON or has the wrong shape
    #[display("Failed to parse content plan: {}", _0)]
    PlanParse(String),
    /// Post history could not be read
    #[display("Failed to read post history: {}", _0)]
    HistoryLoad(String),
    /// Post history is not valid JSON or has the wrong shape
    #[display("Failed to parse post history: {}", _0)]
    HistoryParse(String),
    /// Post history could not be written
    #[display("Failed to write post history: {}", _0)]
    HistoryWrite(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use herald_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::PlanLoad("data/plan.json".to_string()));
/// assert!(format!("{}", err).contains("content plan"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for plan and history storage.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
