//! Aggregates over the post history.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use herald_core::{HistoryEntry, Platform, PostHistory};
use std::collections::{BTreeMap, BTreeSet};

/// Success and failure counts for one platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct PlatformStats {
    /// Successful results
    success: usize,
    /// Failed results
    failed: usize,
}

impl PlatformStats {
    /// Total results recorded.
    pub fn total(&self) -> usize {
        self.success + self.failed
    }

    /// Success rate as a percentage, 0 when nothing was recorded.
    pub fn rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.success as f64 * 100.0 / total as f64,
        }
    }
}

/// Summary of a post history.
///
/// # Examples
///
/// ```
/// use herald_actor::HistoryStats;
/// use herald_core::{HistoryEntry, Platform, PlatformResult, PostHistory};
///
/// let mut history = PostHistory::default();
/// history.append(
///     HistoryEntry::at(1, "Idea", chrono::Utc::now(), vec![
///         PlatformResult::success(Platform::Reddit),
///         PlatformResult::failure(Platform::Twitter, "boom"),
///     ]),
///     1,
/// );
///
/// let stats = HistoryStats::from_history(&history);
/// assert_eq!(*stats.total_success(), 1);
/// assert_eq!(*stats.total_failed(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct HistoryStats {
    /// Number of history entries
    total_posts: usize,
    /// Time of the last ledger write
    last_updated: DateTime<Utc>,
    /// Per-platform counts
    platforms: BTreeMap<Platform, PlatformStats>,
    /// Successful results across platforms
    total_success: usize,
    /// Failed results across platforms
    total_failed: usize,
    /// Distinct idea ids used
    unique_ideas: usize,
}

impl HistoryStats {
    /// Aggregate a history.
    pub fn from_history(history: &PostHistory) -> Self {
        let mut platforms: BTreeMap<Platform, PlatformStats> = BTreeMap::new();
        let mut ideas = BTreeSet::new();

        for entry in history.posts() {
            ideas.insert(*entry.idea_id());
            for result in entry.results() {
                let counts = platforms.entry(*result.platform()).or_default();
                if result.is_success() {
                    counts.success += 1;
                } else {
                    counts.failed += 1;
                }
            }
        }

        let total_success = platforms.values().map(|s| s.success).sum();
        let total_failed = platforms.values().map(|s| s.failed).sum();

        Self {
            total_posts: history.posts().len(),
            last_updated: *history.last_updated(),
            platforms,
            total_success,
            total_failed,
            unique_ideas: ideas.len(),
        }
    }

    /// Counts across all platforms.
    pub fn overall(&self) -> PlatformStats {
        PlatformStats {
            success: self.total_success,
            failed: self.total_failed,
        }
    }
}

/// One-line rendering of a history entry for listings.
///
/// A check mark means every platform succeeded.
pub fn describe_entry(entry: &HistoryEntry) -> String {
    let mark = if !entry.results().is_empty() && entry.results().iter().all(|r| r.is_success()) {
        "✓"
    } else {
        "✗"
    };
    let platforms: Vec<String> = entry
        .results()
        .iter()
        .map(|r| r.platform().to_string())
        .collect();
    format!(
        "{} [{}] #{} {} ({})",
        mark,
        entry.timestamp().format("%Y-%m-%d %H:%M"),
        entry.idea_id(),
        entry.idea(),
        platforms.join(", ")
    )
}
