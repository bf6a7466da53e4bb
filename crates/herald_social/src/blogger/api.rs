use crate::http::{build_client, decode_error, ensure_success, transport_error};
use async_trait::async_trait;
use derive_getters::Getters;
use herald_error::PublishResult;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

const BLOGGER_API_URL: &str = "https://www.googleapis.com/blogger/v3";

/// Posts returned by a listing when no limit is given.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// A published Blogger post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct BloggerPost {
    /// Post id
    id: String,
    /// Public URL
    #[serde(default)]
    url: String,
    /// Title as stored by Blogger
    #[serde(default)]
    title: String,
}

impl BloggerPost {
    /// Create a post record.
    pub fn new(id: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Blog metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct BloggerBlog {
    /// Blog name
    name: String,
    /// Blog URL
    #[serde(default)]
    url: String,
}

impl BloggerBlog {
    /// Create a blog record.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The Blogger API calls Herald needs.
#[async_trait]
pub trait BloggerApi: Send + Sync {
    /// Insert a post with HTML content.
    async fn insert_post(
        &self,
        title: &str,
        html: &str,
        labels: &[String],
    ) -> PublishResult<BloggerPost>;

    /// Fetch the configured blog.
    async fn blog(&self) -> PublishResult<BloggerBlog>;

    /// Most recent posts, newest first, at most `max_results`.
    async fn list_posts(&self, max_results: usize) -> PublishResult<Vec<BloggerPost>>;
}

#[derive(Deserialize)]
struct PostList {
    #[serde(default)]
    items: Vec<BloggerPost>,
}

#[derive(Serialize)]
struct InsertPost<'a> {
    kind: &'static str,
    title: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    labels: &'a [String],
}

/// Blogger API v3 client using an OAuth access token.
#[derive(Debug, Clone)]
pub struct HttpBloggerApi {
    client: Client,
    blog_id: String,
    access_token: String,
    base_url: String,
}

impl HttpBloggerApi {
    /// Create a client for one blog.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(
        blog_id: impl Into<String>,
        access_token: impl Into<String>,
        user_agent: &str,
    ) -> PublishResult<Self> {
        Ok(Self {
            client: build_client(user_agent)?,
            blog_id: blog_id.into(),
            access_token: access_token.into(),
            base_url: BLOGGER_API_URL.to_string(),
        })
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl BloggerApi for HttpBloggerApi {
    #[instrument(skip(self, html, labels), fields(blog_id = %self.blog_id))]
    async fn insert_post(
        &self,
        title: &str,
        html: &str,
        labels: &[String],
    ) -> PublishResult<BloggerPost> {
        let body = InsertPost {
            kind: "blogger#post",
            title,
            content: html,
            labels,
        };

        let response = self
            .client
            .post(format!("{}/blogs/{}/posts/", self.base_url, self.blog_id))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("blogger", e))?;

        ensure_success("blogger", response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("blogger", e))
    }

    async fn blog(&self) -> PublishResult<BloggerBlog> {
        let response = self
            .client
            .get(format!("{}/blogs/{}", self.base_url, self.blog_id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| transport_error("blogger", e))?;

        ensure_success("blogger", response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("blogger", e))
    }
    #[instrument(skip(self), fields(blog_id = %self.blog_id))]
    async fn list_posts(&self, max_results: usize) -> PublishResult<Vec<BloggerPost>> {
        let response = self
            .client
            .get(format!("{}/blogs/{}/posts", self.base_url, self.blog_id))
            .bearer_auth(&self.access_token)
            .query(&[("maxResults", max_results)])
            .send()
            .await
            .map_err(|e| transport_error("blogger", e))?;

        let list: PostList = ensure_success("blogger", response)
            .await?
            .json()
            .await
            .map_err(|e| decode_error("blogger", e))?;
        Ok(list.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_has_no_items() {
        let list: PostList = serde_json::from_str(r#"{"kind": "blogger#postList"}"#).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_listing_decodes_posts() {
        let list: PostList = serde_json::from_str(
            r#"{"kind": "blogger#postList", "items": [
                {"id": "1", "url": "https://blog.example.com/1", "title": "First", "labels": ["rust"]},
                {"id": "2", "title": "Draft"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            list.items,
            vec![
                BloggerPost::new("1", "https://blog.example.com/1", "First"),
                BloggerPost::new("2", "", "Draft"),
            ]
        );
    }
}
