//! Environment configuration.
//!
//! Variables are read through the `config` crate's environment source into
//! [`HeraldSettings`], a raw view where everything is an optional string.
//! [`HeraldSettings::validate`] turns that into a checked [`HeraldConfig`].

use config::{Config, Environment};
use derive_getters::Getters;
use herald_core::Platform;
use herald_error::{ConfigError, HeraldError, HeraldResult};
use herald_models::{ANTHROPIC_DEFAULT_MODEL, OPENAI_DEFAULT_MODEL};
use herald_server::{ScheduleTime, parse_schedule_times};
use herald_social::{RedditCredentials, RedditCredentialsBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default daily firing times.
pub const DEFAULT_SCHEDULE_TIMES: &str = "09:00,15:00,21:00";
const DEFAULT_POSTS_PER_RUN: usize = 3;
const DEFAULT_MAX_RETRIES: usize = 3;
const DEFAULT_DELAY_SECS: u64 = 60;
const DEFAULT_PLAN_PATH: &str = "data/content-plan.json";
const DEFAULT_HISTORY_PATH: &str = "data/post-history.json";

/// Text generation backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AiProvider {
    /// Anthropic Messages API
    Anthropic,
    /// OpenAI Chat Completions API
    #[strum(serialize = "openai")]
    OpenAI,
}

/// Deployment mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RunEnvironment {
    /// Runs one cycle at startup
    Development,
    /// Waits for the first scheduled time
    #[default]
    Production,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Raw configuration as read from the environment.
///
/// Every field is optional; defaults and checks are applied by
/// [`validate`](Self::validate).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeraldSettings {
    ai_provider: Option<String>,
    anthropic_api_key: Option<String>,
    anthropic_model: Option<String>,
    openai_api_key: Option<String>,
    openai_model: Option<String>,
    twitter_access_token: Option<String>,
    reddit_client_id: Option<String>,
    reddit_client_secret: Option<String>,
    reddit_username: Option<String>,
    reddit_password: Option<String>,
    reddit_user_agent: Option<String>,
    reddit_subreddits: Option<String>,
    blogger_blog_id: Option<String>,
    blogger_access_token: Option<String>,
    posts_per_run: Option<String>,
    schedule_times: Option<String>,
    enable_twitter: Option<String>,
    enable_reddit: Option<String>,
    enable_blogger: Option<String>,
    max_retries: Option<String>,
    delay_between_posts: Option<String>,
    dry_run: Option<String>,
    content_plan_path: Option<String>,
    post_history_path: Option<String>,
    herald_env: Option<String>,
    log_level: Option<String>,
    log_format: Option<String>,
}

/// Checked text generation settings.
#[derive(Clone, Getters)]
pub struct ProviderConfig {
    /// Selected backend
    provider: AiProvider,
    /// API key for the backend
    api_key: String,
    /// Model identifier
    model: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Twitter switch and token.
#[derive(Clone, Getters)]
pub struct TwitterConfig {
    /// `ENABLE_TWITTER`
    enabled: bool,
    /// OAuth 2.0 user-context token
    access_token: Option<String>,
}

impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("enabled", &self.enabled)
            .field("has_token", &self.access_token.is_some())
            .finish()
    }
}

/// Reddit switch, script-app credentials and target subreddits.
#[derive(Debug, Clone, Getters)]
pub struct RedditConfig {
    /// `ENABLE_REDDIT`
    enabled: bool,
    /// Present only when every credential variable is set
    credentials: Option<RedditCredentials>,
    /// Candidate subreddits
    subreddits: Vec<String>,
}

/// Blogger switch, blog and token.
#[derive(Clone, Getters)]
pub struct BloggerConfig {
    /// `ENABLE_BLOGGER`
    enabled: bool,
    /// Target blog id
    blog_id: Option<String>,
    /// OAuth access token
    access_token: Option<String>,
}

impl std::fmt::Debug for BloggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloggerConfig")
            .field("enabled", &self.enabled)
            .field("blog_id", &self.blog_id)
            .field("has_token", &self.access_token.is_some())
            .finish()
    }
}

/// Validated Herald configuration.
#[derive(Debug, Clone, Getters)]
pub struct HeraldConfig {
    /// Text generation backend
    provider: ProviderConfig,
    /// Twitter settings
    twitter: TwitterConfig,
    /// Reddit settings
    reddit: RedditConfig,
    /// Blogger settings
    blogger: BloggerConfig,
    /// Ideas per cycle
    posts_per_run: usize,
    /// Daily firing times
    schedule_times: Vec<ScheduleTime>,
    /// Retry budget for provider and publisher requests
    max_retries: usize,
    /// Pause between ideas
    delay_between_posts: Duration,
    /// Simulate publishing
    dry_run: bool,
    /// Content plan JSON
    content_plan_path: PathBuf,
    /// Post history JSON
    post_history_path: PathBuf,
    /// Deployment mode
    environment: RunEnvironment,
}

impl HeraldConfig {
    /// Platforms whose switch is on, in platform order.
    ///
    /// Credentials are not considered; see the dispatcher for what can
    /// actually publish.
    pub fn switched_on(&self) -> Vec<Platform> {
        let mut platforms = Vec::new();
        if self.twitter.enabled {
            platforms.push(Platform::Twitter);
        }
        if self.reddit.enabled {
            platforms.push(Platform::Reddit);
        }
        if self.blogger.enabled {
            platforms.push(Platform::Blogger);
        }
        platforms
    }
}

impl HeraldSettings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the environment cannot be deserialized.
    #[instrument]
    pub fn from_env() -> HeraldResult<Self> {
        debug!("Loading configuration from environment");
        Self::from_source(Environment::default())
    }

    /// Read settings from an explicit variable map instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the map cannot be deserialized.
    pub fn from_vars(vars: HashMap<String, String>) -> HeraldResult<Self> {
        Self::from_source(Environment::default().source(Some(vars)))
    }

    fn from_source(source: Environment) -> HeraldResult<Self> {
        Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| {
                HeraldError::from(ConfigError::new(format!(
                    "Failed to read environment: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                HeraldError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// `LOG_LEVEL`, defaulting to `info`.
    pub fn log_level(&self) -> String {
        value(&self.log_level).unwrap_or("info").to_string()
    }

    /// `LOG_FORMAT`; `json` selects JSON output.
    pub fn log_format(&self) -> LogFormat {
        match value(&self.log_format) {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    /// `POST_HISTORY_PATH`.
    pub fn post_history_path(&self) -> PathBuf {
        PathBuf::from(value(&self.post_history_path).unwrap_or(DEFAULT_HISTORY_PATH))
    }

    /// `CONTENT_PLAN_PATH`.
    pub fn content_plan_path(&self) -> PathBuf {
        PathBuf::from(value(&self.content_plan_path).unwrap_or(DEFAULT_PLAN_PATH))
    }

    /// `SCHEDULE_TIMES`, parsed.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for any invalid time.
    pub fn schedule_times(&self) -> Result<Vec<ScheduleTime>, ConfigError> {
        parse_schedule_times(value(&self.schedule_times).unwrap_or(DEFAULT_SCHEDULE_TIMES))
    }

    /// Apply defaults and check everything needed to run.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the provider or its key is missing, every
    /// platform is switched off, a schedule time is invalid, or a numeric
    /// variable does not parse.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<HeraldConfig, ConfigError> {
        let provider = self.provider()?;

        let twitter = TwitterConfig {
            enabled: flag_on(&self.enable_twitter),
            access_token: owned(&self.twitter_access_token),
        };
        let reddit = RedditConfig {
            enabled: flag_on(&self.enable_reddit),
            credentials: self.reddit_credentials(),
            subreddits: self.subreddits(),
        };
        let blogger = BloggerConfig {
            enabled: flag_on(&self.enable_blogger),
            blog_id: owned(&self.blogger_blog_id),
            access_token: owned(&self.blogger_access_token),
        };

        if !twitter.enabled && !reddit.enabled && !blogger.enabled {
            return Err(ConfigError::new("At least one platform must be enabled"));
        }

        let posts_per_run = number(&self.posts_per_run, "POSTS_PER_RUN", DEFAULT_POSTS_PER_RUN)?;
        if posts_per_run == 0 {
            return Err(ConfigError::new("POSTS_PER_RUN must be at least 1"));
        }

        let config = HeraldConfig {
            provider,
            twitter,
            reddit,
            blogger,
            posts_per_run,
            schedule_times: self.schedule_times()?,
            max_retries: number(&self.max_retries, "MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            delay_between_posts: Duration::from_secs(number(
                &self.delay_between_posts,
                "DELAY_BETWEEN_POSTS",
                DEFAULT_DELAY_SECS,
            )?),
            dry_run: value(&self.dry_run).is_some_and(|v| v.eq_ignore_ascii_case("true")),
            content_plan_path: self.content_plan_path(),
            post_history_path: self.post_history_path(),
            environment: match value(&self.herald_env) {
                Some(env) if env.eq_ignore_ascii_case("development") => RunEnvironment::Development,
                _ => RunEnvironment::Production,
            },
        };

        debug!(?config, "Configuration validated");
        Ok(config)
    }

    fn provider(&self) -> Result<ProviderConfig, ConfigError> {
        let name = value(&self.ai_provider)
            .ok_or_else(|| ConfigError::new("Missing required environment variable: AI_PROVIDER"))?;
        let provider = AiProvider::from_str(name).map_err(|_| {
            ConfigError::new(format!(
                "Unsupported AI_PROVIDER '{}', expected anthropic or openai",
                name
            ))
        })?;

        let (key, model, key_var, default_model) = match provider {
            AiProvider::Anthropic => (
                &self.anthropic_api_key,
                &self.anthropic_model,
                "ANTHROPIC_API_KEY",
                ANTHROPIC_DEFAULT_MODEL,
            ),
            AiProvider::OpenAI => (
                &self.openai_api_key,
                &self.openai_model,
                "OPENAI_API_KEY",
                OPENAI_DEFAULT_MODEL,
            ),
        };

        let api_key = owned(key).ok_or_else(|| {
            ConfigError::new(format!(
                "{} is required when AI_PROVIDER is {}",
                key_var, provider
            ))
        })?;

        Ok(ProviderConfig {
            provider,
            api_key,
            model: value(model).unwrap_or(default_model).to_string(),
        })
    }

    fn reddit_credentials(&self) -> Option<RedditCredentials> {
        RedditCredentialsBuilder::default()
            .client_id(owned(&self.reddit_client_id)?)
            .client_secret(owned(&self.reddit_client_secret)?)
            .username(owned(&self.reddit_username)?)
            .password(owned(&self.reddit_password)?)
            .user_agent(
                owned(&self.reddit_user_agent).unwrap_or_else(crate::bootstrap::user_agent),
            )
            .build()
            .ok()
    }

    fn subreddits(&self) -> Vec<String> {
        let subreddits: Vec<String> = value(&self.reddit_subreddits)
            .unwrap_or("test")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if subreddits.is_empty() {
            vec!["test".to_string()]
        } else {
            subreddits
        }
    }
}

/// Non-blank value of an optional variable.
fn value(var: &Option<String>) -> Option<&str> {
    var.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn owned(var: &Option<String>) -> Option<String> {
    value(var).map(str::to_string)
}

/// Anything except `false` switches a platform on.
fn flag_on(var: &Option<String>) -> bool {
    value(var) != Some("false")
}

fn number<T: FromStr>(var: &Option<String>, name: &str, default: T) -> Result<T, ConfigError> {
    match value(var) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            ConfigError::new(format!(
                "{} must be a non-negative integer, got '{}'",
                name, raw
            ))
        }),
    }
}
