use crate::http::{build_client, decode_error, ensure_success, transport_error};
use async_trait::async_trait;
use herald_error::PublishResult;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const TWITTER_API_URL: &str = "https://api.twitter.com";

/// The Twitter API calls Herald needs.
#[async_trait]
pub trait TwitterApi: Send + Sync {
    /// Post a tweet, optionally as a reply, returning the new tweet id.
    async fn post_tweet(&self, text: &str, reply_to: Option<&str>) -> PublishResult<String>;

    /// Username of the authenticated account.
    async fn me(&self) -> PublishResult<String>;
}

#[derive(Serialize)]
struct TweetRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<ReplyTo<'a>>,
}

#[derive(Serialize)]
struct ReplyTo<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct CreatedTweet {
    id: String,
}

#[derive(Deserialize)]
struct TwitterUser {
    username: String,
}

/// Twitter API v2 client using an OAuth 2.0 user-context bearer token.
#[derive(Debug, Clone)]
pub struct HttpTwitterApi {
    client: Client,
    access_token: String,
    base_url: String,
}

impl HttpTwitterApi {
    /// Create a client for the given access token.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(access_token: impl Into<String>, user_agent: &str) -> PublishResult<Self> {
        Ok(Self {
            client: build_client(user_agent)?,
            access_token: access_token.into(),
            base_url: TWITTER_API_URL.to_string(),
        })
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TwitterApi for HttpTwitterApi {
    #[instrument(skip(self, text))]
    async fn post_tweet(&self, text: &str, reply_to: Option<&str>) -> PublishResult<String> {
        let body = TweetRequest {
            text,
            reply: reply_to.map(|id| ReplyTo {
                in_reply_to_tweet_id: id,
            }),
        };

        let response = self
            .client
            .post(format!("{}/2/tweets", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("twitter", e))?;

        let created: DataEnvelope<CreatedTweet> = ensure_success("twitter", response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("twitter", e))?;

        debug!(tweet_id = %created.data.id, "Tweet created");
        Ok(created.data.id)
    }

    async fn me(&self) -> PublishResult<String> {
        let response = self
            .client
            .get(format!("{}/2/users/me", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| transport_error("twitter", e))?;

        let user: DataEnvelope<TwitterUser> = ensure_success("twitter", response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("twitter", e))?;

        Ok(user.data.username)
    }
}
