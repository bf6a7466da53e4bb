/// Hard per-tweet character cap enforced before posting.
pub const TWEET_MAX_CHARS: usize = 250;

/// Trim a tweet and cut it to the character cap.
///
/// Over-long text keeps its first 247 characters followed by `...`.
///
/// # Examples
///
/// ```
/// use herald_social::format_tweet;
///
/// let tweet = format_tweet(&"a".repeat(300));
/// assert_eq!(tweet.chars().count(), 250);
/// assert!(tweet.ends_with("..."));
///
/// assert_eq!(format_tweet("  short  "), "short");
/// ```
pub fn format_tweet(text: &str) -> String {
    let text = text.trim();
    let length = text.chars().count();
    if length <= TWEET_MAX_CHARS {
        return text.to_string();
    }
    tracing::warn!(
        length,
        limit = TWEET_MAX_CHARS,
        "Tweet exceeds character limit, truncating"
    );
    let mut truncated: String = text.chars().take(TWEET_MAX_CHARS - 3).collect();
    truncated.push_str("...");
    truncated
}
