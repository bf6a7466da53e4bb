//! Read-only access to the content plan file.

use herald_core::ContentPlan;
use herald_error::{StorageError, StorageErrorKind, StorageResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Loads the content plan from a JSON file.
#[derive(Debug, Clone)]
pub struct ContentPlanStore {
    path: PathBuf,
}

impl ContentPlanStore {
    /// Create a store for the plan at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Plan file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and parse the plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanLoad` if the file cannot be read and `PlanParse` if it is
    /// not a valid plan.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> StorageResult<ContentPlan> {
        debug!("Loading content plan");
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::PlanLoad(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        let plan: ContentPlan = serde_json::from_str(&json).map_err(|e| {
            StorageError::new(StorageErrorKind::PlanParse(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        info!(
            ideas = plan.ideas().len(),
            strategy = %plan.rotation_strategy(),
            branding = plan.branding().is_some(),
            "Loaded content plan"
        );
        Ok(plan)
    }
}
