//! Branding blocks and the Twitter character budget.

use herald_core::{Branding, GeneratedContent, Platform, Tweet};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum weighted length of a tweet.
pub const TWEET_LIMIT: usize = 250;

const ELLIPSIS: &str = "...";
const SEPARATOR: &str = "\n\n";

static PICTOGRAPHIC: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\p{Extended_Pictographic}").ok());

/// Weighted tweet length: characters, with emoji counted as 2.
///
/// # Examples
///
/// ```
/// use herald_narrative::tweet_weight;
///
/// assert_eq!(tweet_weight("abc"), 3);
/// assert_eq!(tweet_weight("🌐 site"), 7);
/// ```
pub fn tweet_weight(text: &str) -> usize {
    let emoji = PICTOGRAPHIC
        .as_ref()
        .map(|re| re.find_iter(text).count())
        .unwrap_or(0);
    text.chars().count() + emoji
}

/// Branding block for the final tweet of a thread.
pub fn twitter_block(branding: &Branding) -> String {
    format!(
        "🌐 {}: {}\n📱 WhatsApp: {}",
        branding.name(),
        branding.website(),
        branding.whatsapp()
    )
}

/// Markdown footer for Reddit posts.
pub fn reddit_block(branding: &Branding) -> String {
    format!(
        "---\n**Learn More:**\n- 🌐 Website: [{}]({})\n- 📱 WhatsApp: {}",
        branding.name(),
        branding.website(),
        branding.whatsapp()
    )
}

/// HTML footer for Blogger articles.
pub fn blogger_block(branding: &Branding) -> String {
    format!(
        "<div style=\"border-top: 2px solid #ddd; margin-top: 30px; padding-top: 20px;\">\n\
         <h3>Learn More About {name}</h3>\n\
         <p>🌐 Visit our website: <a href=\"{website}\" target=\"_blank\">{website}</a></p>\n\
         <p>📱 Contact us on WhatsApp: <a href=\"{whatsapp}\" target=\"_blank\">Click here</a></p>\n\
         </div>",
        name = branding.name(),
        website = branding.website(),
        whatsapp = branding.whatsapp()
    )
}

/// Prompt section telling the model where and how to place branding.
pub fn branding_instructions(platform: Platform, branding: &Branding) -> String {
    match platform {
        Platform::Twitter => format!(
            "\nCRITICAL TWITTER RULES:\n\
             - Each tweet MUST be MAXIMUM 250 characters (including branding)\n\
             - Add branding ONLY in the LAST tweet\n\
             - Branding format for last tweet:\n\
             \"{}\"\n\
             - This branding is approximately 80 characters\n\
             - So main content in last tweet must be MAX 170 characters\n\
             - Count characters carefully - exceeding 250 will cause posting to FAIL\n\
             - Emojis count as 2 characters each",
            twitter_block(branding)
        ),
        Platform::Reddit => format!(
            "\nIMPORTANT: Add this section at the END of the post body:\n\n{}",
            reddit_block(branding)
        ),
        Platform::Blogger => format!(
            "\nIMPORTANT: Add this HTML section at the END of the article:\n\n{}",
            blogger_block(branding)
        ),
    }
}

/// Cut `text` so its weight plus the ellipsis fits `budget`.
fn truncate_to_weight(text: &str, budget: usize) -> String {
    if tweet_weight(text) <= budget {
        return text.to_string();
    }
    let room = budget.saturating_sub(ELLIPSIS.len());
    let mut out = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let weight = tweet_weight(ch.encode_utf8(&mut buf));
        if used + weight > room {
            break;
        }
        used += weight;
        out.push(ch);
    }
    let mut out = out.trim_end().to_string();
    if !out.is_empty() {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Branding block shortened until it fits a tweet on its own.
///
/// Drops the website first, then the name. The WhatsApp line always stays,
/// cut with an ellipsis only if it alone is over the limit.
fn fitted_twitter_block(branding: &Branding) -> String {
    let whatsapp = format!("📱 WhatsApp: {}", branding.whatsapp());
    let candidates = [
        twitter_block(branding),
        format!("🌐 {}\n{}", branding.name(), whatsapp),
        whatsapp.clone(),
    ];
    candidates
        .into_iter()
        .find(|candidate| tweet_weight(candidate) <= TWEET_LIMIT)
        .unwrap_or_else(|| truncate_to_weight(&whatsapp, TWEET_LIMIT))
}

/// Strip branding lines the model already wrote from a tweet.
///
/// Only lines equal to a line of a rendered block are removed.
fn strip_branding(text: &str, blocks: &[&str]) -> String {
    let branding_lines: Vec<&str> = blocks
        .iter()
        .flat_map(|block| block.lines())
        .map(str::trim)
        .collect();
    text.lines()
        .filter(|line| !branding_lines.contains(&line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Make the final tweet end with the branding block and fit the limit.
///
/// A `Text` fallback is treated as a one-tweet thread. Posts and articles are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use herald_core::{Branding, GeneratedContent};
/// use herald_narrative::{enforce_twitter_branding, tweet_weight};
///
/// let branding = Branding::new("Acme", "https://acme.test", "https://wa.me/1");
/// let content = GeneratedContent::text("x".repeat(400));
/// let branded = enforce_twitter_branding(content, &branding);
///
/// let tweets = branded.tweet_texts().unwrap();
/// assert!(tweet_weight(tweets.last().unwrap()) <= 250);
/// assert!(tweets.last().unwrap().ends_with("WhatsApp: https://wa.me/1"));
/// ```
pub fn enforce_twitter_branding(content: GeneratedContent, branding: &Branding) -> GeneratedContent {
    let Some(mut texts) = content.tweet_texts() else {
        return content;
    };

    let full_block = twitter_block(branding);
    let block = fitted_twitter_block(branding);
    if block != full_block {
        tracing::warn!(
            weight = tweet_weight(&full_block),
            "Branding block exceeds tweet limit, using shortened block"
        );
    }
    let budget = TWEET_LIMIT
        .saturating_sub(tweet_weight(SEPARATOR))
        .saturating_sub(tweet_weight(&block));

    let last = texts.pop().unwrap_or_default();
    let body = truncate_to_weight(&strip_branding(&last, &[&full_block, &block]), budget);
    let final_tweet = if body.is_empty() {
        block
    } else {
        format!("{}{}{}", body, SEPARATOR, block)
    };

    tracing::debug!(
        weight = tweet_weight(&final_tweet),
        tweets = texts.len() + 1,
        "Applied branding to final tweet"
    );

    texts.push(final_tweet);
    GeneratedContent::Thread {
        tweets: texts.into_iter().map(Tweet::new).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_tweet(content: &GeneratedContent) -> String {
        content.tweet_texts().unwrap().pop().unwrap()
    }

    #[test]
    fn test_oversized_website_keeps_whatsapp_within_limit() {
        let website = format!("https://{}.example.com", "x".repeat(200));
        let branding = Branding::new("Acme", website.as_str(), "https://wa.me/1");
        let branded = enforce_twitter_branding(GeneratedContent::text("Backups matter."), &branding);

        let last = last_tweet(&branded);
        assert!(tweet_weight(&last) <= TWEET_LIMIT, "weight {}", tweet_weight(&last));
        assert!(last.ends_with("📱 WhatsApp: https://wa.me/1"));
        assert!(!last.contains(&website));
        assert!(last.starts_with("Backups matter."));
    }

    #[test]
    fn test_oversized_whatsapp_is_cut_to_limit() {
        let whatsapp = format!("https://wa.me/{}", "9".repeat(300));
        let branding = Branding::new("Acme", "https://acme.test", whatsapp.as_str());
        let branded = enforce_twitter_branding(GeneratedContent::text("hi"), &branding);

        let last = last_tweet(&branded);
        assert!(tweet_weight(&last) <= TWEET_LIMIT);
        assert!(last.starts_with("📱 WhatsApp: https://wa.me/"));
    }

    #[test]
    fn test_unrelated_emoji_lines_survive() {
        let branding = Branding::new("Acme", "https://acme.test", "https://wa.me/1");
        let text = "🌐 The web turns 35 today\n📱 Phones came later";
        let branded = enforce_twitter_branding(GeneratedContent::text(text), &branding);

        let last = last_tweet(&branded);
        assert!(last.starts_with(text));
        assert_eq!(last.matches("🌐").count(), 2);
    }

    #[test]
    fn test_written_branding_lines_are_replaced_once() {
        let branding = Branding::new("Acme", "https://acme.test", "https://wa.me/1");
        let text = format!("Tip of the day\n{}", twitter_block(&branding));
        let branded = enforce_twitter_branding(GeneratedContent::text(text), &branding);

        assert_eq!(
            last_tweet(&branded),
            format!("Tip of the day\n\n{}", twitter_block(&branding))
        );
    }
}
