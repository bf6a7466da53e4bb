//! Per-platform publishing outcomes.

use crate::Platform;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One posted tweet of a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedTweet {
    /// Tweet id (synthetic in dry run)
    pub id: String,
    /// Text as posted
    pub text: String,
}

/// Outcome of publishing one idea to one platform.
///
/// Built with [`PlatformResult::success`] or [`PlatformResult::failure`] and
/// the `with_*` setters, then never changed.
///
/// # Examples
///
/// ```
/// use herald_core::{Platform, PlatformResult};
///
/// let ok = PlatformResult::success(Platform::Reddit)
///     .with_url("https://reddit.com/r/test/")
///     .with_dry_run(true);
/// assert!(ok.is_success());
///
/// let failed = PlatformResult::failure(Platform::Twitter, "boom");
/// assert_eq!(failed.error().as_deref(), Some("boom"));
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[serde(rename_all = "camelCase")]
#[setters(prefix = "with_", into, strip_option)]
pub struct PlatformResult {
    /// Target platform
    #[setters(skip)]
    platform: Platform,
    /// Whether publishing succeeded
    #[getter(skip)]
    #[setters(skip)]
    success: bool,
    /// Platform post id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    post_id: Option<String>,
    /// Public URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    /// Title as published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    /// Subreddit posted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subreddit: Option<String>,
    /// Per-tweet results, in thread order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    results: Option<Vec<PostedTweet>>,
    /// Number of tweets posted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    /// Set when publishing was simulated
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    dry_run: bool,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(skip)]
    error: Option<String>,
}

impl PlatformResult {
    /// Successful result with no platform-specific fields yet.
    pub fn success(platform: Platform) -> Self {
        Self {
            platform,
            success: true,
            post_id: None,
            url: None,
            title: None,
            subreddit: None,
            results: None,
            count: None,
            dry_run: false,
            error: None,
        }
    }

    /// Failed result carrying the error message.
    pub fn failure(platform: Platform, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::success(platform)
        }
    }

    /// Whether publishing succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }
}
