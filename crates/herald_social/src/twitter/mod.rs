//! Twitter (X) API v2 integration.

mod api;
mod format;
mod publisher;

pub use api::{HttpTwitterApi, TwitterApi};
pub use format::{TWEET_MAX_CHARS, format_tweet};
pub use publisher::{TwitterPacing, TwitterPublisher};
