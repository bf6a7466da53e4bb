//! Publishing platform integrations for Herald.
//!
//! Each platform lives in its own submodule and follows the same layout:
//! - an API client trait covering the handful of HTTP calls Herald makes
//! - a reqwest implementation of that trait
//! - a [`herald_interface::Publisher`] that formats, validates, honours dry run
//!   and retries each individual request
//!
//! The API traits let the orchestration tests swap in doubles without a
//! network.
//!
//! # Platform Support
//!
//! - `twitter` - API v2 threads with an OAuth 2.0 user token
//! - `reddit` - self posts through the script-app password grant
//! - `blogger` - API v3 articles with an OAuth access token

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blogger;
mod http;
mod reddit;
mod settings;
mod twitter;

pub use blogger::{
    BloggerApi, BloggerBlog, BloggerPost, BloggerPublisher, DEFAULT_LIST_LIMIT, HttpBloggerApi,
    format_content,
};
pub use http::DEFAULT_REQUEST_TIMEOUT;
pub use reddit::{
    HttpRedditApi, RedditAccount, RedditApi, RedditCredentials, RedditCredentialsBuilder,
    RedditPublisher, RedditSubmission, SubredditInfo,
};
pub use settings::{PublisherSettings, PublisherSettingsBuilder};
pub use twitter::{HttpTwitterApi, TWEET_MAX_CHARS, TwitterApi, TwitterPacing, TwitterPublisher, format_tweet};
