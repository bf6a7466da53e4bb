//! Routing generated content to publishers.

use herald_core::{ContentIdea, GeneratedContent, Platform, PlatformResult};
use herald_interface::{CredentialCheck, Publisher};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Maps platforms to publishers and turns every failure into a result.
#[derive(Clone, Default)]
pub struct PlatformDispatcher {
    publishers: BTreeMap<Platform, Arc<dyn Publisher>>,
}

impl std::fmt::Debug for PlatformDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformDispatcher")
            .field("platforms", &self.publishers.keys().collect::<Vec<_>>())
            .field("enabled", &self.enabled_platforms())
            .finish()
    }
}

impl PlatformDispatcher {
    /// Empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a publisher under its own platform, replacing any previous one.
    pub fn register(&mut self, publisher: Arc<dyn Publisher>) {
        self.publishers.insert(publisher.platform(), publisher);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.register(publisher);
        self
    }

    /// Platforms whose publisher is enabled, in platform order.
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        self.publishers
            .iter()
            .filter(|(_, publisher)| publisher.is_enabled())
            .map(|(platform, _)| *platform)
            .collect()
    }

    /// True when a publisher for `platform` exists and is enabled.
    pub fn is_enabled(&self, platform: Platform) -> bool {
        self.publishers
            .get(&platform)
            .is_some_and(|publisher| publisher.is_enabled())
    }

    /// Publish to one platform.
    ///
    /// Never fails: publisher errors and missing publishers come back as a
    /// failed `PlatformResult`.
    #[instrument(skip(self, idea, content), fields(idea_id = *idea.id(), kind = content.kind()))]
    pub async fn dispatch(
        &self,
        platform: Platform,
        idea: &ContentIdea,
        content: &GeneratedContent,
    ) -> PlatformResult {
        let Some(publisher) = self.publishers.get(&platform) else {
            warn!("No publisher registered");
            return PlatformResult::failure(platform, format!("No publisher registered for {}", platform));
        };

        match publisher.publish(content).await {
            Ok(result) => {
                info!(dry_run = *result.dry_run(), "Posted successfully");
                result
            }
            Err(e) => {
                error!(error = %e, "Failed to post");
                PlatformResult::failure(platform, e.message())
            }
        }
    }

    /// Verify credentials of every enabled publisher.
    #[instrument(skip(self))]
    pub async fn verify_credentials(&self) -> Vec<CredentialCheck> {
        let mut checks = Vec::new();
        for (platform, publisher) in &self.publishers {
            if !publisher.is_enabled() {
                warn!(platform = %platform, "Disabled or not configured");
                continue;
            }
            let outcome = publisher
                .verify_credentials()
                .await
                .map_err(|e| e.message());
            match &outcome {
                Ok(status) => info!(platform = %platform, account = %status.account(), "Credentials verified"),
                Err(e) => error!(platform = %platform, error = %e, "Credential check failed"),
            }
            checks.push(CredentialCheck {
                platform: *platform,
                outcome,
            });
        }
        checks
    }
}
