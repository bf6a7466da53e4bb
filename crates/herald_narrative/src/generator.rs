//! Platform content generation through a text completion backend.

use crate::branding::enforce_twitter_branding;
use crate::extraction::parse_generated;
use crate::prompt::{PromptContext, build_prompt, build_variation_prompt};
use herald_core::{GeneratedContent, Platform};
use herald_error::GenerationResult;
use herald_interface::TextCompletion;
use herald_rate_limit::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Generates platform-shaped copy for content ideas.
#[derive(Clone)]
pub struct ContentGenerator {
    completion: Arc<dyn TextCompletion>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("provider", &self.completion.provider_name())
            .field("model", &self.completion.model_name())
            .field("retry", &self.retry)
            .finish()
    }
}

impl ContentGenerator {
    /// Create a generator over a completion backend.
    pub fn new(completion: Arc<dyn TextCompletion>, retry: RetryPolicy) -> Self {
        Self { completion, retry }
    }

    /// Generate content for one platform.
    ///
    /// # Arguments
    ///
    /// * `platform` - Target platform, selects the template
    /// * `idea` - The idea text
    /// * `context` - Tone, audience, keywords and branding
    ///
    /// # Errors
    ///
    /// Returns the completion error once retries are exhausted. Unparseable
    /// output is not an error; it comes back as `GeneratedContent::Text`.
    #[instrument(skip(self, idea, context), fields(platform = %platform, provider = self.completion.provider_name()))]
    pub async fn generate(
        &self,
        platform: Platform,
        idea: &str,
        context: &PromptContext,
    ) -> GenerationResult<GeneratedContent> {
        let prompt = build_prompt(platform, idea, context);
        debug!(prompt_len = prompt.len(), "Built prompt");

        let content = self.complete_and_parse(&prompt).await?;

        let content = match (platform, context.active_branding()) {
            (Platform::Twitter, Some(branding)) => enforce_twitter_branding(content, branding),
            _ => content,
        };

        info!(kind = content.kind(), "Generated content");
        Ok(content)
    }

    /// Rewrite existing content with different wording on the same topic.
    ///
    /// # Errors
    ///
    /// Returns the completion error once retries are exhausted.
    #[instrument(skip(self, original), fields(platform = %platform))]
    pub async fn generate_variation(
        &self,
        original: &GeneratedContent,
        platform: Platform,
    ) -> GenerationResult<GeneratedContent> {
        let prompt = build_variation_prompt(original, platform);
        self.complete_and_parse(&prompt).await
    }

    async fn complete_and_parse(&self, prompt: &str) -> GenerationResult<GeneratedContent> {
        let text = self
            .retry
            .run("text_completion", || self.completion.complete(prompt))
            .await?;
        Ok(parse_generated(&text))
    }
}
