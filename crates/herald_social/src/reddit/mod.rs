//! Reddit OAuth API integration.

mod api;
mod publisher;

pub use api::{
    HttpRedditApi, RedditAccount, RedditApi, RedditCredentials, RedditCredentialsBuilder,
    RedditSubmission, SubredditInfo,
};
pub use publisher::RedditPublisher;
