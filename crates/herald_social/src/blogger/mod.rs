//! Blogger API v3 integration.

mod api;
mod format;
mod publisher;

pub use api::{BloggerApi, BloggerBlog, BloggerPost, DEFAULT_LIST_LIMIT, HttpBloggerApi};
pub use format::format_content;
pub use publisher::BloggerPublisher;
