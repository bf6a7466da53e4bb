//! Generated copy in its platform-specific shapes.

use serde::{Deserialize, Serialize};

/// A single tweet of a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TweetRepr")]
pub struct Tweet {
    /// Tweet text
    pub text: String,
}

impl Tweet {
    /// Create a tweet from text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

// Models sometimes answer with bare strings instead of `{ "text": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TweetRepr {
    Object { text: String },
    Bare(String),
}

impl From<TweetRepr> for Tweet {
    fn from(value: TweetRepr) -> Self {
        match value {
            TweetRepr::Object { text } | TweetRepr::Bare(text) => Tweet { text },
        }
    }
}

/// Copy produced by the text generator.
///
/// Variants are matched structurally against the model's JSON output, in
/// declaration order. Anything that matches no variant becomes [`GeneratedContent::Text`].
///
/// # Examples
///
/// ```
/// use herald_core::GeneratedContent;
///
/// let content: GeneratedContent =
///     serde_json::from_str(r#"{"title": "Hi", "body": "There"}"#).unwrap();
/// assert!(matches!(content, GeneratedContent::Post { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedContent {
    /// Twitter thread
    Thread {
        /// Tweets in posting order
        tweets: Vec<Tweet>,
    },
    /// Reddit self post
    Post {
        /// Post title
        title: String,
        /// Markdown body
        body: String,
    },
    /// Blogger article
    Article {
        /// Article title
        title: String,
        /// Markdown or HTML content
        content: String,
        /// Blogger labels
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        labels: Vec<String>,
    },
    /// Unstructured fallback
    Text {
        /// Raw text
        text: String,
    },
}

impl GeneratedContent {
    /// Wrap raw text as the fallback variant.
    pub fn text(text: impl Into<String>) -> Self {
        GeneratedContent::Text { text: text.into() }
    }

    /// Short variant name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratedContent::Thread { .. } => "thread",
            GeneratedContent::Post { .. } => "post",
            GeneratedContent::Article { .. } => "article",
            GeneratedContent::Text { .. } => "text",
        }
    }

    /// Tweet texts, treating a `Text` fallback as a one-tweet thread.
    ///
    /// Returns `None` for posts and articles.
    pub fn tweet_texts(&self) -> Option<Vec<String>> {
        match self {
            GeneratedContent::Thread { tweets } => {
                Some(tweets.iter().map(|t| t.text.clone()).collect())
            }
            GeneratedContent::Text { text } => Some(vec![text.clone()]),
            _ => None,
        }
    }
}
