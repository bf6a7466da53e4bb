use super::{BloggerApi, BloggerPost, format_content};
use crate::PublisherSettings;
use async_trait::async_trait;
use herald_core::{GeneratedContent, Platform, PlatformResult};
use herald_error::{PublishError, PublishErrorKind, PublishResult};
use herald_interface::{CredentialStatus, Publisher};
use std::sync::Arc;
use tracing::{info, instrument};

/// Posts generated articles to Blogger.
pub struct BloggerPublisher {
    api: Option<Arc<dyn BloggerApi>>,
    settings: PublisherSettings,
}

impl BloggerPublisher {
    /// Create a publisher. `api` is `None` when credentials are missing.
    pub fn new(api: Option<Arc<dyn BloggerApi>>, settings: PublisherSettings) -> Self {
        if api.is_none() {
            tracing::warn!("Blogger API credentials not configured");
        }
        Self { api, settings }
    }

    /// Recent posts on the configured blog.
    ///
    /// # Errors
    ///
    /// `NotConfigured` without credentials, otherwise API and transport errors.
    #[instrument(skip(self))]
    pub async fn list_posts(&self, max_results: usize) -> PublishResult<Vec<BloggerPost>> {
        let api = self.api()?;
        let posts = self
            .settings
            .retry()
            .run("blogger.list_posts", || api.list_posts(max_results))
            .await?;
        info!(count = posts.len(), "Listed Blogger posts");
        Ok(posts)
    }

    fn api(&self) -> PublishResult<&Arc<dyn BloggerApi>> {
        self.api.as_ref().ok_or_else(|| {
            PublishError::new(PublishErrorKind::NotConfigured("Blogger".to_string()))
        })
    }
}

#[async_trait]
impl Publisher for BloggerPublisher {
    fn platform(&self) -> Platform {
        Platform::Blogger
    }

    fn is_enabled(&self) -> bool {
        *self.settings.enabled() && self.api.is_some()
    }

    #[instrument(skip(self, content), fields(kind = content.kind(), dry_run = *self.settings.dry_run()))]
    async fn publish(&self, content: &GeneratedContent) -> PublishResult<PlatformResult> {
        let api = self.api()?;

        let (title, body, labels) = match content {
            GeneratedContent::Article {
                title,
                content,
                labels,
            } if !title.trim().is_empty() && !content.trim().is_empty() => {
                (title.as_str(), content.as_str(), labels.as_slice())
            }
            _ => {
                return Err(PublishError::new(PublishErrorKind::Validation(
                    "Blogger post requires both title and content".to_string(),
                )));
            }
        };

        if *self.settings.dry_run() {
            info!(title = %title, "[DRY RUN] Would post article");
            return Ok(PlatformResult::success(Platform::Blogger)
                .with_title(title)
                .with_dry_run(true));
        }

        let html = format_content(body);
        let post = self
            .settings
            .retry()
            .run("blogger.insert_post", || api.insert_post(title, &html, labels))
            .await?;

        info!(post_id = %post.id(), title = %post.title(), "Posted article");
        Ok(PlatformResult::success(Platform::Blogger)
            .with_post_id(post.id().clone())
            .with_url(post.url().clone())
            .with_title(post.title().clone()))
    }

    async fn verify_credentials(&self) -> PublishResult<CredentialStatus> {
        let api = self.api()?;
        let blog = self.settings.retry().run("blogger.blog", || api.blog()).await?;
        info!(blog = %blog.name(), "Blogger authenticated");
        Ok(CredentialStatus::new(
            Platform::Blogger,
            blog.name().clone(),
            Some(blog.url().clone()),
        ))
    }
}
