//! Content plan types loaded from the plan JSON file.

use crate::Platform;
use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// One planned topic with its target platforms, tone and keywords.
///
/// Immutable once loaded; fields are exposed through getters.
///
/// # Examples
///
/// ```
/// use herald_core::{ContentIdeaBuilder, Platform};
///
/// let idea = ContentIdeaBuilder::default()
///     .id(7u64)
///     .text("Why backups matter")
///     .platforms(vec![Platform::Reddit])
///     .build()
///     .unwrap();
///
/// assert_eq!(idea.tone(), "professional");
/// assert_eq!(idea.target_audience(), "general");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct ContentIdea {
    /// Numeric identifier
    id: u64,
    /// The idea itself
    #[serde(rename = "idea")]
    text: String,
    /// Keywords to weave into the copy
    #[serde(default)]
    #[builder(default)]
    keywords: Vec<String>,
    /// Writing tone
    #[serde(default = "default_tone")]
    #[builder(default = "default_tone()")]
    tone: String,
    /// Intended readership
    #[serde(default = "default_audience")]
    #[builder(default = "default_audience()")]
    target_audience: String,
    /// Platforms this idea should be published to
    #[serde(default, deserialize_with = "deserialize_platforms")]
    #[builder(default)]
    platforms: Vec<Platform>,
    /// Whether to append the branding block
    #[serde(default)]
    #[builder(default)]
    include_branding: bool,
}

fn default_tone() -> String {
    "professional".to_string()
}

fn default_audience() -> String {
    "general".to_string()
}

/// Reads platform names, dropping unknown ones and duplicates.
fn deserialize_platforms<'de, D>(deserializer: D) -> Result<Vec<Platform>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    let mut platforms = Vec::with_capacity(names.len());
    for name in names {
        match Platform::from_str(name.trim()) {
            Ok(platform) => {
                if !platforms.contains(&platform) {
                    platforms.push(platform);
                }
            }
            Err(_) => tracing::warn!(platform = %name, "Ignoring unknown platform in content plan"),
        }
    }
    Ok(platforms)
}

/// Branding details appended to content when an idea opts in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Branding {
    /// Display name
    name: String,
    /// Website URL
    website: String,
    /// WhatsApp contact link or number
    whatsapp: String,
}

impl Branding {
    /// Create branding details.
    pub fn new(
        name: impl Into<String>,
        website: impl Into<String>,
        whatsapp: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            website: website.into(),
            whatsapp: whatsapp.into(),
        }
    }
}

/// How the next idea is chosen.
///
/// Any value other than `sequential` (case-insensitive) selects `Random`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase")]
pub enum RotationStrategy {
    /// Walk the plan in order, wrapping around
    Sequential,
    /// Pick uniformly on every call
    #[default]
    Random,
}

impl From<String> for RotationStrategy {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("sequential") {
            RotationStrategy::Sequential
        } else {
            RotationStrategy::Random
        }
    }
}

impl From<RotationStrategy> for String {
    fn from(value: RotationStrategy) -> Self {
        value.to_string()
    }
}

/// Plan-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct PlanSettings {
    /// Idea rotation strategy
    #[serde(default)]
    rotation_strategy: RotationStrategy,
}

impl PlanSettings {
    /// Settings with the given rotation strategy.
    pub fn new(rotation_strategy: RotationStrategy) -> Self {
        Self { rotation_strategy }
    }
}

/// The full content plan.
///
/// # Examples
///
/// ```
/// use herald_core::{ContentPlan, RotationStrategy};
///
/// let plan: ContentPlan = serde_json::from_str(
///     r#"{"contentPlan": [{"id": 1, "idea": "Hello", "platforms": ["twitter", "myspace"]}]}"#,
/// )
/// .unwrap();
///
/// assert_eq!(plan.ideas().len(), 1);
/// assert_eq!(plan.ideas()[0].platforms().len(), 1);
/// assert_eq!(*plan.settings().rotation_strategy(), RotationStrategy::Random);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ContentPlan {
    /// Ideas in plan order
    #[serde(rename = "contentPlan", default)]
    ideas: Vec<ContentIdea>,
    /// Optional branding details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    branding: Option<Branding>,
    /// Plan settings
    #[serde(default)]
    settings: PlanSettings,
}

impl ContentPlan {
    /// Assemble a plan from its parts.
    pub fn new(ideas: Vec<ContentIdea>, branding: Option<Branding>, settings: PlanSettings) -> Self {
        Self {
            ideas,
            branding,
            settings,
        }
    }

    /// The rotation strategy in effect.
    pub fn rotation_strategy(&self) -> RotationStrategy {
        *self.settings.rotation_strategy()
    }
}
