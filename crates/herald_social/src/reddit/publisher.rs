use super::{RedditApi, SubredditInfo};
use crate::PublisherSettings;
use async_trait::async_trait;
use herald_core::{GeneratedContent, Platform, PlatformResult};
use herald_error::{PublishError, PublishErrorKind, PublishResult};
use herald_interface::{CredentialStatus, Publisher};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{info, instrument};

/// Posts generated content to Reddit as self posts.
pub struct RedditPublisher {
    api: Option<Arc<dyn RedditApi>>,
    settings: PublisherSettings,
    subreddits: Vec<String>,
}

impl RedditPublisher {
    /// Create a publisher posting to one of `subreddits`.
    pub fn new(
        api: Option<Arc<dyn RedditApi>>,
        settings: PublisherSettings,
        subreddits: Vec<String>,
    ) -> Self {
        if api.is_none() {
            tracing::warn!("Reddit API credentials not configured");
        }
        Self {
            api,
            settings,
            subreddits,
        }
    }

    /// Configured subreddits.
    pub fn subreddits(&self) -> &[String] {
        &self.subreddits
    }

    /// Look up a subreddit's public details.
    ///
    /// # Errors
    ///
    /// `NotConfigured` without credentials, otherwise API and transport errors.
    #[instrument(skip(self))]
    pub async fn subreddit_info(&self, subreddit: &str) -> PublishResult<SubredditInfo> {
        let api = self.api()?;
        let subreddit = subreddit.trim_start_matches("r/");
        let info = self
            .settings
            .retry()
            .run("reddit.subreddit_info", || api.subreddit_info(subreddit))
            .await?;
        info!(subreddit = %info.name(), subscribers = *info.subscribers(), "Fetched subreddit info");
        Ok(info)
    }

    fn api(&self) -> PublishResult<&Arc<dyn RedditApi>> {
        self.api
            .as_ref()
            .ok_or_else(|| PublishError::new(PublishErrorKind::NotConfigured("Reddit".to_string())))
    }

    fn select_subreddit(&self) -> PublishResult<String> {
        self.subreddits
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| {
                PublishError::new(PublishErrorKind::Validation(
                    "No subreddit configured".to_string(),
                ))
            })
    }

    /// Publish to an explicit subreddit, or a random configured one.
    ///
    /// # Errors
    ///
    /// Fails with a validation error before any network call when the title or
    /// body is missing.
    #[instrument(skip(self, content), fields(kind = content.kind(), dry_run = *self.settings.dry_run()))]
    pub async fn publish_to(
        &self,
        content: &GeneratedContent,
        subreddit: Option<&str>,
    ) -> PublishResult<PlatformResult> {
        let api = self.api()?;

        let (title, body) = match content {
            GeneratedContent::Post { title, body }
                if !title.trim().is_empty() && !body.trim().is_empty() =>
            {
                (title.as_str(), body.as_str())
            }
            _ => {
                return Err(PublishError::new(PublishErrorKind::Validation(
                    "Reddit post requires both title and body".to_string(),
                )));
            }
        };

        let target = match subreddit {
            Some(name) => name.to_string(),
            None => self.select_subreddit()?,
        };

        if *self.settings.dry_run() {
            info!(subreddit = %target, title = %title, "[DRY RUN] Would post to Reddit");
            return Ok(PlatformResult::success(Platform::Reddit)
                .with_url(format!("https://reddit.com/r/{}/", target))
                .with_subreddit(target)
                .with_dry_run(true));
        }

        let submission = self
            .settings
            .retry()
            .run("reddit.submit", || api.submit_self_post(&target, title, body))
            .await?;

        info!(subreddit = %target, post_id = %submission.id(), title = %title, "Posted to Reddit");
        Ok(PlatformResult::success(Platform::Reddit)
            .with_post_id(submission.id().clone())
            .with_url(submission.url().clone())
            .with_subreddit(target))
    }
}

#[async_trait]
impl Publisher for RedditPublisher {
    fn platform(&self) -> Platform {
        Platform::Reddit
    }

    fn is_enabled(&self) -> bool {
        *self.settings.enabled() && self.api.is_some()
    }

    async fn publish(&self, content: &GeneratedContent) -> PublishResult<PlatformResult> {
        self.publish_to(content, None).await
    }

    async fn verify_credentials(&self) -> PublishResult<CredentialStatus> {
        let api = self.api()?;
        let account = self.settings.retry().run("reddit.me", || api.me()).await?;
        info!(username = %account.name(), "Reddit authenticated");
        Ok(CredentialStatus::new(
            Platform::Reddit,
            format!("u/{}", account.name()),
            Some(format!("karma: {}", account.total_karma())),
        ))
    }
}
