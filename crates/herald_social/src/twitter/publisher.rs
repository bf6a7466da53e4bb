use super::{TwitterApi, format_tweet};
use crate::PublisherSettings;
use async_trait::async_trait;
use chrono::Utc;
use herald_core::{GeneratedContent, Platform, PlatformResult, PostedTweet};
use herald_error::{PublishError, PublishErrorKind, PublishResult};
use herald_interface::{CredentialStatus, Publisher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Delays between thread tweets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwitterPacing {
    /// Gap between live tweets of a thread
    pub tweet_gap: Duration,
    /// Simulated gap after each dry-run tweet
    pub dry_run_gap: Duration,
}

impl Default for TwitterPacing {
    fn default() -> Self {
        Self {
            tweet_gap: Duration::from_secs(3),
            dry_run_gap: Duration::from_secs(2),
        }
    }
}

impl TwitterPacing {
    /// No delays at all.
    pub fn none() -> Self {
        Self {
            tweet_gap: Duration::ZERO,
            dry_run_gap: Duration::ZERO,
        }
    }
}

/// Posts generated threads to Twitter.
pub struct TwitterPublisher {
    api: Option<Arc<dyn TwitterApi>>,
    settings: PublisherSettings,
    pacing: TwitterPacing,
}

impl TwitterPublisher {
    /// Create a publisher. `api` is `None` when credentials are missing.
    pub fn new(api: Option<Arc<dyn TwitterApi>>, settings: PublisherSettings) -> Self {
        if api.is_none() {
            tracing::warn!("Twitter API credentials not configured");
        }
        Self {
            api,
            settings,
            pacing: TwitterPacing::default(),
        }
    }

    /// Override thread pacing.
    pub fn with_pacing(mut self, pacing: TwitterPacing) -> Self {
        self.pacing = pacing;
        self
    }

    fn api(&self) -> PublishResult<&Arc<dyn TwitterApi>> {
        self.api.as_ref().ok_or_else(|| {
            PublishError::new(PublishErrorKind::NotConfigured("Twitter".to_string()))
        })
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn is_enabled(&self) -> bool {
        *self.settings.enabled() && self.api.is_some()
    }

    #[instrument(skip(self, content), fields(kind = content.kind(), dry_run = *self.settings.dry_run()))]
    async fn publish(&self, content: &GeneratedContent) -> PublishResult<PlatformResult> {
        let api = self.api()?;
        let texts = content.tweet_texts().ok_or_else(|| {
            PublishError::new(PublishErrorKind::Validation(format!(
                "Twitter cannot publish {} content",
                content.kind()
            )))
        })?;
        let tweets: Vec<String> = texts
            .iter()
            .map(|text| format_tweet(text))
            .filter(|text| !text.is_empty())
            .collect();
        if tweets.is_empty() {
            return Err(PublishError::new(PublishErrorKind::Validation(
                "Twitter thread has no tweet text".to_string(),
            )));
        }

        let total = tweets.len();
        let mut results = Vec::with_capacity(total);
        let mut last_id: Option<String> = None;

        for (i, text) in tweets.into_iter().enumerate() {
            if *self.settings.dry_run() {
                info!(
                    tweet = i + 1,
                    chars = text.chars().count(),
                    text = %text,
                    "[DRY RUN] Would post tweet"
                );
                results.push(PostedTweet {
                    id: format!("dry-run-{}", Utc::now().timestamp_millis()),
                    text,
                });
                tokio::time::sleep(self.pacing.dry_run_gap).await;
                continue;
            }

            let reply_to = last_id.clone();
            let id = self
                .settings
                .retry()
                .run("twitter.post_tweet", || api.post_tweet(&text, reply_to.as_deref()))
                .await?;

            info!(
                tweet = i + 1,
                total,
                chars = text.chars().count(),
                tweet_id = %id,
                "Posted tweet"
            );
            last_id = Some(id.clone());
            results.push(PostedTweet { id, text });

            if i + 1 < total {
                tokio::time::sleep(self.pacing.tweet_gap).await;
            }
        }

        let count = results.len();
        let mut result = PlatformResult::success(Platform::Twitter)
            .with_results(results)
            .with_count(count);
        if *self.settings.dry_run() {
            result = result.with_dry_run(true);
        }
        Ok(result)
    }

    async fn verify_credentials(&self) -> PublishResult<CredentialStatus> {
        let api = self.api()?;
        let username = self.settings.retry().run("twitter.me", || api.me()).await?;
        info!(username = %username, "Twitter authenticated");
        Ok(CredentialStatus::new(
            Platform::Twitter,
            format!("@{}", username),
            None,
        ))
    }
}
