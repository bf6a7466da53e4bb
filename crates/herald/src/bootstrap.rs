//! Service construction from a validated configuration.

use crate::{AiProvider, HeraldConfig};
use herald_actor::{
    ContentPlanStore, CycleOrchestrator, HistoryLedger, OrchestratorSettingsBuilder,
    PlatformDispatcher,
};
use herald_error::{ConfigError, HeraldResult};
use herald_interface::TextCompletion;
use herald_models::{AnthropicClient, OpenAIClient};
use herald_narrative::ContentGenerator;
use herald_rate_limit::RetryPolicy;
use herald_social::{
    BloggerApi, BloggerPublisher, HttpBloggerApi, HttpRedditApi, HttpTwitterApi,
    PublisherSettings, PublisherSettingsBuilder, RedditApi, RedditPublisher, TwitterApi,
    TwitterPublisher,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// User agent sent by every HTTP client.
pub fn user_agent() -> String {
    format!("herald/{}", env!("CARGO_PKG_VERSION"))
}

/// Build the configured text completion client.
///
/// # Errors
///
/// Returns a generation error if the client cannot be created.
#[instrument(skip(config), fields(provider = %config.provider().provider()))]
pub fn build_completion(config: &HeraldConfig) -> HeraldResult<Arc<dyn TextCompletion>> {
    let provider = config.provider();
    let completion: Arc<dyn TextCompletion> = match provider.provider() {
        AiProvider::Anthropic => Arc::new(AnthropicClient::new(
            provider.api_key().as_str(),
            provider.model().as_str(),
        )?),
        AiProvider::OpenAI => Arc::new(OpenAIClient::new(
            provider.api_key().as_str(),
            provider.model().as_str(),
        )?),
    };
    info!(model = %provider.model(), "Text completion client ready");
    Ok(completion)
}

fn publisher_settings(config: &HeraldConfig, enabled: bool) -> HeraldResult<PublisherSettings> {
    PublisherSettingsBuilder::default()
        .enabled(enabled)
        .dry_run(*config.dry_run())
        .retry(RetryPolicy::new(*config.max_retries()))
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid publisher settings: {}", e)).into())
}

/// Build one publisher per platform and register them.
///
/// A platform whose switch is on but whose credentials are missing still gets
/// a publisher; it reports itself as not enabled.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be created.
#[instrument(skip(config))]
pub fn build_dispatcher(config: &HeraldConfig) -> HeraldResult<PlatformDispatcher> {
    let agent = user_agent();

    let twitter_api: Option<Arc<dyn TwitterApi>> = match config.twitter().access_token() {
        Some(token) => Some(Arc::new(HttpTwitterApi::new(token.as_str(), &agent)?)),
        None => None,
    };
    let reddit_api: Option<Arc<dyn RedditApi>> = match config.reddit().credentials() {
        Some(credentials) => Some(Arc::new(HttpRedditApi::new(credentials.clone())?)),
        None => None,
    };
    let blogger_api: Option<Arc<dyn BloggerApi>> =
        match (config.blogger().blog_id(), config.blogger().access_token()) {
            (Some(blog_id), Some(token)) => Some(Arc::new(HttpBloggerApi::new(
                blog_id.as_str(),
                token.as_str(),
                &agent,
            )?)),
            _ => None,
        };

    let dispatcher = PlatformDispatcher::new()
        .with_publisher(Arc::new(TwitterPublisher::new(
            twitter_api,
            publisher_settings(config, *config.twitter().enabled())?,
        )))
        .with_publisher(Arc::new(RedditPublisher::new(
            reddit_api,
            publisher_settings(config, *config.reddit().enabled())?,
            config.reddit().subreddits().clone(),
        )))
        .with_publisher(Arc::new(BloggerPublisher::new(
            blogger_api,
            publisher_settings(config, *config.blogger().enabled())?,
        )));

    let enabled = dispatcher.enabled_platforms();
    if enabled.is_empty() {
        warn!("No platform has both its switch on and credentials configured");
    } else {
        info!(platforms = ?enabled, dry_run = *config.dry_run(), "Publishers ready");
    }
    Ok(dispatcher)
}

/// Wire the full orchestrator.
///
/// # Errors
///
/// Returns an error if any client cannot be created.
#[instrument(skip(config))]
pub fn build_orchestrator(config: &HeraldConfig) -> HeraldResult<CycleOrchestrator> {
    let generator = ContentGenerator::new(
        build_completion(config)?,
        RetryPolicy::new(*config.max_retries()),
    );
    let settings = OrchestratorSettingsBuilder::default()
        .posts_per_run(*config.posts_per_run())
        .delay_between_posts(*config.delay_between_posts())
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid orchestrator settings: {}", e)))?;

    Ok(CycleOrchestrator::new(
        ContentPlanStore::new(config.content_plan_path()),
        Arc::new(HistoryLedger::new(config.post_history_path())),
        generator,
        build_dispatcher(config)?,
        settings,
    ))
}
