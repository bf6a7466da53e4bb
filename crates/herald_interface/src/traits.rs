//! Trait definitions for text providers and publishing platforms.

use crate::CredentialStatus;
use async_trait::async_trait;
use herald_core::{GeneratedContent, Platform, PlatformResult};
use herald_error::{GenerationResult, PublishResult};

/// Core trait that all text generation backends must implement.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete a prompt, returning the raw model text.
    ///
    /// # Errors
    ///
    /// Returns a `GenerationError` for transport failures, non-success
    /// provider responses or empty completions.
    async fn complete(&self, prompt: &str) -> GenerationResult<String>;

    /// Provider name (e.g., "anthropic", "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "claude-sonnet-4-20250514").
    fn model_name(&self) -> &str;
}

/// A publishing platform.
///
/// Implementations own their formatting, validation and dry-run behaviour.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// The platform this publisher posts to.
    fn platform(&self) -> Platform;

    /// True when the platform is switched on and its credentials are present.
    fn is_enabled(&self) -> bool;

    /// Publish generated content.
    ///
    /// # Arguments
    ///
    /// * `content` - Copy produced for this platform
    ///
    /// # Errors
    ///
    /// Returns a `PublishError` when validation fails or the platform rejects
    /// the request. The dispatcher converts it into a failed result.
    ///
    /// # Returns
    ///
    /// A successful `PlatformResult` with the platform-specific fields set.
    async fn publish(&self, content: &GeneratedContent) -> PublishResult<PlatformResult>;

    /// Check the configured credentials against the platform.
    ///
    /// # Errors
    ///
    /// Returns a `PublishError` if the client is missing or the platform
    /// rejects the credentials.
    async fn verify_credentials(&self) -> PublishResult<CredentialStatus>;
}
