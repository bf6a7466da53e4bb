use crate::http::{build_client, decode_error, ensure_success, transport_error};
use async_trait::async_trait;
use derive_getters::Getters;
use herald_error::{PublishError, PublishErrorKind, PublishResult};
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error, instrument, warn};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_API_URL: &str = "https://oauth.reddit.com";

/// A created self post.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RedditSubmission {
    /// Post id
    id: String,
    /// Permalink URL
    url: String,
}

impl RedditSubmission {
    /// Create a submission record.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// The authenticated Reddit account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct RedditAccount {
    /// Username
    name: String,
    /// Link karma
    #[serde(default)]
    link_karma: i64,
    /// Comment karma
    #[serde(default)]
    comment_karma: i64,
}

impl RedditAccount {
    /// Create an account record.
    pub fn new(name: impl Into<String>, link_karma: i64, comment_karma: i64) -> Self {
        Self {
            name: name.into(),
            link_karma,
            comment_karma,
        }
    }

    /// Link plus comment karma.
    pub fn total_karma(&self) -> i64 {
        self.link_karma + self.comment_karma
    }
}

/// Public details of a subreddit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct SubredditInfo {
    /// Display name without the `r/` prefix
    #[serde(rename = "display_name")]
    name: String,
    /// Subscriber count
    #[serde(default)]
    subscribers: u64,
    /// Public description
    #[serde(default, rename = "public_description")]
    description: String,
}

impl SubredditInfo {
    /// Create a subreddit record.
    pub fn new(name: impl Into<String>, subscribers: u64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subscribers,
            description: description.into(),
        }
    }
}

/// The Reddit API calls Herald needs.
#[async_trait]
pub trait RedditApi: Send + Sync {
    /// Submit a self post.
    async fn submit_self_post(
        &self,
        subreddit: &str,
        title: &str,
        body: &str,
    ) -> PublishResult<RedditSubmission>;

    /// The authenticated account.
    async fn me(&self) -> PublishResult<RedditAccount>;

    /// Public details of `subreddit`.
    async fn subreddit_info(&self, subreddit: &str) -> PublishResult<SubredditInfo>;
}

/// Script-app credentials for the password grant.
#[derive(Clone, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct RedditCredentials {
    /// OAuth client id
    client_id: String,
    /// OAuth client secret
    client_secret: String,
    /// Account username
    username: String,
    /// Account password
    password: String,
    /// User agent sent with every request
    user_agent: String,
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: u64,
    error: Option<String>,
}

#[derive(Deserialize)]
struct AboutEnvelope {
    data: SubredditInfo,
}

#[derive(Deserialize)]
struct SubmitEnvelope {
    json: SubmitJson,
}

#[derive(Deserialize)]
struct SubmitJson {
    #[serde(default)]
    errors: Vec<Vec<serde_json::Value>>,
    data: Option<SubmitData>,
}

#[derive(Deserialize)]
struct SubmitData {
    id: String,
    url: String,
}

/// Classify a Reddit `json.errors` entry.
fn submit_error(errors: &[Vec<serde_json::Value>]) -> PublishError {
    let parts: Vec<String> = errors
        .first()
        .map(|entry| {
            entry
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    let code = parts.first().cloned().unwrap_or_default();
    let message = parts.join(": ");

    let kind = match code.as_str() {
        "RATELIMIT" => {
            warn!(message = %message, "Reddit rate limit hit, will retry later");
            PublishErrorKind::RateLimited(message)
        }
        "SUBREDDIT_NOEXIST" => {
            error!(message = %message, "Subreddit does not exist");
            PublishErrorKind::TargetNotFound(message)
        }
        _ => PublishErrorKind::Validation(message),
    };
    PublishError::new(kind)
}

/// Reddit OAuth client authenticating with the script-app password grant.
#[derive(Debug)]
pub struct HttpRedditApi {
    client: Client,
    credentials: RedditCredentials,
    token: Mutex<Option<(String, Instant)>>,
}

impl HttpRedditApi {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(credentials: RedditCredentials) -> PublishResult<Self> {
        Ok(Self {
            client: build_client(&credentials.user_agent)?,
            credentials,
            token: Mutex::new(None),
        })
    }

    /// Cached bearer token, refreshed a minute before expiry.
    #[instrument(skip(self))]
    async fn access_token(&self) -> PublishResult<String> {
        let mut guard = self.token.lock().await;
        if let Some((token, expires)) = guard.as_ref() {
            if Instant::now() < *expires {
                return Ok(token.clone());
            }
        }

        debug!("Requesting Reddit access token");
        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport_error("reddit", e))?;

        let token: TokenResponse = ensure_success("reddit", response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("reddit", e))?;

        let access_token = match (token.access_token, token.error) {
            (Some(access_token), None) => access_token,
            (_, error) => {
                return Err(PublishError::new(PublishErrorKind::Authentication(
                    error.unwrap_or_else(|| "no access token returned".to_string()),
                )));
            }
        };

        let lifetime = Duration::from_secs(token.expires_in.saturating_sub(60));
        *guard = Some((access_token.clone(), Instant::now() + lifetime));
        Ok(access_token)
    }
}

#[async_trait]
impl RedditApi for HttpRedditApi {
    #[instrument(skip(self, title, body))]
    async fn submit_self_post(
        &self,
        subreddit: &str,
        title: &str,
        body: &str,
    ) -> PublishResult<RedditSubmission> {
        let token = self.access_token().await?;
        let response = self
            .client
            .post(format!("{}/api/submit", OAUTH_API_URL))
            .bearer_auth(token)
            .form(&[
                ("sr", subreddit),
                ("kind", "self"),
                ("title", title),
                ("text", body),
                ("api_type", "json"),
            ])
            .send()
            .await
            .map_err(|e| transport_error("reddit", e))?;

        let envelope: SubmitEnvelope = ensure_success("reddit", response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("reddit", e))?;

        if !envelope.json.errors.is_empty() {
            return Err(submit_error(&envelope.json.errors));
        }

        let data = envelope.json.data.ok_or_else(|| {
            PublishError::new(PublishErrorKind::Api {
                status: 200,
                message: "Reddit submit returned no data".to_string(),
            })
        })?;

        Ok(RedditSubmission::new(data.id, data.url))
    }

    async fn me(&self) -> PublishResult<RedditAccount> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(format!("{}/api/v1/me", OAUTH_API_URL))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport_error("reddit", e))?;

        ensure_success("reddit", response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("reddit", e))
    }

    #[instrument(skip(self))]
    async fn subreddit_info(&self, subreddit: &str) -> PublishResult<SubredditInfo> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(format!("{}/r/{}/about", OAUTH_API_URL, subreddit))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport_error("reddit", e))?;

        let about: AboutEnvelope = ensure_success("reddit", response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("reddit", e))?;
        Ok(about.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ratelimit_error_is_classified() {
        let errors = vec![vec![
            json!("RATELIMIT"),
            json!("you are doing that too much"),
            json!("ratelimit"),
        ]];
        let err = submit_error(&errors);
        assert!(matches!(err.kind, PublishErrorKind::RateLimited(ref m) if m.starts_with("RATELIMIT")));
    }

    #[test]
    fn test_missing_subreddit_is_classified() {
        let errors = vec![vec![json!("SUBREDDIT_NOEXIST"), json!("that subreddit doesn't exist"), json!("sr")]];
        assert!(matches!(submit_error(&errors).kind, PublishErrorKind::TargetNotFound(_)));
    }

    #[test]
    fn test_about_payload_decodes() {
        let payload = json!({
            "kind": "t5",
            "data": {
                "display_name": "rust",
                "subscribers": 312000,
                "public_description": "A place for all things Rust",
                "over18": false
            }
        });
        let about: AboutEnvelope = serde_json::from_value(payload).unwrap();
        assert_eq!(about.data, SubredditInfo::new("rust", 312000, "A place for all things Rust"));
    }

    #[test]
    fn test_credentials_debug_hides_secrets() {
        let credentials = RedditCredentialsBuilder::default()
            .client_id("id")
            .client_secret("hunter2")
            .username("bot")
            .password("swordfish")
            .user_agent("herald/test")
            .build()
            .unwrap();
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("swordfish"));
    }
}
