//! Post history ledger types.

use crate::{ContentIdea, PlatformResult};
use chrono::{DateTime, Duration, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Record of one processed idea and its per-platform outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Id of the processed idea
    idea_id: u64,
    /// Idea text at the time of processing
    idea: String,
    /// When processing finished
    timestamp: DateTime<Utc>,
    /// Results in the idea's platform order
    results: Vec<PlatformResult>,
}

impl HistoryEntry {
    /// Record the outcome of processing `idea` now.
    pub fn new(idea: &ContentIdea, results: Vec<PlatformResult>) -> Self {
        Self::at(*idea.id(), idea.text().clone(), Utc::now(), results)
    }

    /// Record with an explicit timestamp.
    pub fn at(
        idea_id: u64,
        idea: impl Into<String>,
        timestamp: DateTime<Utc>,
        results: Vec<PlatformResult>,
    ) -> Self {
        Self {
            idea_id,
            idea: idea.into(),
            timestamp,
            results,
        }
    }

    /// True when at least one platform succeeded.
    pub fn any_success(&self) -> bool {
        self.results.iter().any(PlatformResult::is_success)
    }
}

/// The persisted, append-only post history.
///
/// # Examples
///
/// ```
/// use herald_core::{HistoryEntry, PostHistory};
///
/// let mut history = PostHistory::default();
/// let before = *history.last_updated();
/// history.append(HistoryEntry::at(1, "Idea", chrono::Utc::now(), vec![]), 1);
///
/// assert_eq!(history.posts().len(), 1);
/// assert!(*history.last_updated() > before);
/// assert_eq!(*history.rotation_cursor(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct PostHistory {
    /// Entries, oldest first
    #[serde(default)]
    posts: Vec<HistoryEntry>,
    /// Time of the last write
    last_updated: DateTime<Utc>,
    /// Persisted idea selector cursor
    #[serde(default)]
    rotation_cursor: u64,
}

impl Default for PostHistory {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            last_updated: Utc::now(),
            rotation_cursor: 0,
        }
    }
}

impl PostHistory {
    /// Append an entry, checkpoint the cursor and advance `last_updated`.
    pub fn append(&mut self, entry: HistoryEntry, rotation_cursor: u64) {
        self.posts.push(entry);
        self.rotation_cursor = rotation_cursor;
        self.touch();
    }

    /// Advance `last_updated` to now, or 1ms past its previous value if the
    /// clock has not moved.
    pub fn touch(&mut self) {
        let now = Utc::now();
        let floor = self.last_updated + Duration::milliseconds(1);
        self.last_updated = if now > self.last_updated { now } else { floor };
    }

    /// The `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.posts.iter().rev().take(n)
    }
}
