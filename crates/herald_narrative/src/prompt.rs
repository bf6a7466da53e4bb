//! Platform prompt templates.

use crate::branding::branding_instructions;
use derive_getters::Getters;
use herald_core::{Branding, ContentIdea, GeneratedContent, Platform};

/// Format, length and style requirements for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct PlatformSpec {
    /// What to create
    format: &'static str,
    /// Length constraint stated to the model
    max_length: &'static str,
    /// Writing style
    style: &'static str,
    /// JSON shape the model must answer with
    output_shape: &'static str,
}

const TWITTER_SPEC: PlatformSpec = PlatformSpec {
    format: "Twitter thread (2-3 tweets)",
    max_length: "250 characters per tweet (STRICT LIMIT)",
    style: "concise, engaging, with relevant hashtags",
    output_shape: r#"Format as a JSON array of tweets:
{
  "tweets": [
    {"text": "Tweet 1 content here..."},
    {"text": "Tweet 2 content here..."}
  ]
}"#,
};

const REDDIT_SPEC: PlatformSpec = PlatformSpec {
    format: "Reddit post with title and body",
    max_length: "Title: 300 chars, Body: 500-800 words",
    style: "conversational, informative, community-friendly",
    output_shape: r#"Format as JSON:
{
  "title": "Engaging title here",
  "body": "Main content here..."
}"#,
};

const BLOGGER_SPEC: PlatformSpec = PlatformSpec {
    format: "Blog article",
    max_length: "800-1200 words",
    style: "well-structured with introduction, main points, and conclusion",
    output_shape: r#"Format as JSON:
{
  "title": "Article title",
  "content": "Full HTML content with proper formatting"
}"#,
};

impl PlatformSpec {
    /// Requirements for a platform.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Twitter => TWITTER_SPEC,
            Platform::Reddit => REDDIT_SPEC,
            Platform::Blogger => BLOGGER_SPEC,
        }
    }
}

/// Idea attributes and branding that shape a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct PromptContext {
    /// Keywords to include
    #[builder(default)]
    keywords: Vec<String>,
    /// Writing tone
    #[builder(default = "\"professional\".to_string()")]
    tone: String,
    /// Intended readership
    #[builder(default = "\"general\".to_string()")]
    target_audience: String,
    /// Plan branding, if any
    #[builder(default)]
    branding: Option<Branding>,
    /// Whether the idea opted into branding
    #[builder(default)]
    include_branding: bool,
}

impl PromptContext {
    /// Context for an idea, with the plan's branding.
    pub fn for_idea(idea: &ContentIdea, branding: Option<&Branding>) -> Self {
        Self {
            keywords: idea.keywords().clone(),
            tone: idea.tone().clone(),
            target_audience: idea.target_audience().clone(),
            branding: branding.cloned(),
            include_branding: *idea.include_branding(),
        }
    }

    /// Branding to apply, present only when the idea opted in and the plan has it.
    pub fn active_branding(&self) -> Option<&Branding> {
        if self.include_branding {
            self.branding.as_ref()
        } else {
            None
        }
    }
}

/// Build the generation prompt for one platform.
///
/// # Examples
///
/// ```
/// use herald_core::Platform;
/// use herald_narrative::{PromptContextBuilder, build_prompt};
///
/// let context = PromptContextBuilder::default()
///     .keywords(vec!["rust".to_string(), "safety".to_string()])
///     .build()
///     .unwrap();
/// let prompt = build_prompt(Platform::Reddit, "Why Rust", &context);
///
/// assert!(prompt.starts_with("Create Reddit post with title and body about: \"Why Rust\""));
/// assert!(prompt.contains("- Include these keywords naturally: rust, safety"));
/// assert!(prompt.contains("\"body\""));
/// ```
pub fn build_prompt(platform: Platform, idea: &str, context: &PromptContext) -> String {
    let spec = PlatformSpec::for_platform(platform);

    let mut prompt = format!(
        "Create {} about: \"{}\"\n\nRequirements:\n- Target Audience: {}\n- Tone: {}\n- Style: {}\n- Length: {}\n",
        spec.format, idea, context.target_audience, context.tone, spec.style, spec.max_length
    );

    if !context.keywords.is_empty() {
        prompt.push_str(&format!(
            "- Include these keywords naturally: {}\n",
            context.keywords.join(", ")
        ));
    }

    if let Some(branding) = context.active_branding() {
        prompt.push_str(&branding_instructions(platform, branding));
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(spec.output_shape);
    prompt.push_str("\n\nMake it authentic, valuable, and engaging. Avoid promotional language.");
    prompt
}

/// Build the rewrite prompt for an existing piece of content.
pub fn build_variation_prompt(original: &GeneratedContent, platform: Platform) -> String {
    let serialized = serde_json::to_string(original).unwrap_or_default();
    format!(
        "Rewrite the following {} content with a fresh perspective while keeping the core message:\n\n\
         Original: {}\n\n\
         Create a completely different version (different wording, structure, examples) but same topic.\n\
         Return in the same JSON format.",
        platform, serialized
    )
}
