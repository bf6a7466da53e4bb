//! Settings shared by every publisher.

use derive_getters::Getters;
use herald_rate_limit::RetryPolicy;

/// Switches and retry budget common to all publishers.
///
/// # Examples
///
/// ```
/// use herald_social::PublisherSettingsBuilder;
///
/// let settings = PublisherSettingsBuilder::default().dry_run(true).build().unwrap();
/// assert!(*settings.enabled());
/// assert!(*settings.dry_run());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct PublisherSettings {
    /// Platform switch from configuration
    #[builder(default = "true")]
    enabled: bool,
    /// Simulate publishing without network calls
    #[builder(default)]
    dry_run: bool,
    /// Retry budget for each API request
    #[builder(default)]
    retry: RetryPolicy,
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dry_run: false,
            retry: RetryPolicy::default(),
        }
    }
}
