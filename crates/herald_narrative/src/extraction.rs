//! Utilities for extracting structured content from LLM responses.
//!
//! Models often wrap JSON in markdown code blocks or answer in prose. Parsing
//! never fails: anything that is not usable JSON becomes
//! [`GeneratedContent::Text`].

use herald_core::GeneratedContent;
use regex::Regex;
use std::sync::LazyLock;

static JSON_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```json\n?([\s\S]*?)\n?```").ok());
static ANY_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```[\w-]*\n?([\s\S]*?)\n?```").ok());

/// Extract the body of the first fenced code block.
///
/// A block labelled `json` wins over an earlier unlabelled one.
///
/// # Examples
///
/// ```
/// use herald_narrative::extract_from_code_block;
///
/// let response = "Sure!\n```json\n{\"text\": \"hi\"}\n```\nEnjoy.";
/// assert_eq!(extract_from_code_block(response).as_deref(), Some("{\"text\": \"hi\"}"));
/// assert_eq!(extract_from_code_block("no fences here"), None);
/// ```
pub fn extract_from_code_block(response: &str) -> Option<String> {
    [&*JSON_FENCE, &*ANY_FENCE]
        .into_iter()
        .flatten()
        .find_map(|re| re.captures(response))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Parse a model response into generated content.
///
/// Takes the first fenced block if present, otherwise the whole text, and
/// parses it as JSON. A fenced block that does not parse falls back to the
/// whole text, which covers bare JSON carrying a code sample in a field. Invalid JSON, or JSON matching no content shape, yields
/// `Text` carrying the full raw response.
///
/// # Examples
///
/// ```
/// use herald_core::GeneratedContent;
/// use herald_narrative::parse_generated;
///
/// let prose = "Backups are boring until you need one.";
/// assert_eq!(parse_generated(prose), GeneratedContent::text(prose));
///
/// let post = parse_generated("```\n{\"title\": \"T\", \"body\": \"B\"}\n```");
/// assert!(matches!(post, GeneratedContent::Post { .. }));
/// ```
pub fn parse_generated(response: &str) -> GeneratedContent {
    let whole = response.trim();
    let parsed = match extract_from_code_block(response) {
        // A fence inside a JSON string field is not a wrapper
        Some(fenced) => serde_json::from_str::<GeneratedContent>(&fenced)
            .or_else(|_| serde_json::from_str::<GeneratedContent>(whole)),
        None => serde_json::from_str::<GeneratedContent>(whole),
    };

    match parsed {
        Ok(content) => {
            tracing::debug!(kind = content.kind(), "Parsed structured response");
            content
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                response_length = response.len(),
                "Response is not structured content, using raw text"
            );
            GeneratedContent::text(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_fence_preferred() {
        let response = "```text\nignore me\n```\n```json\n{\"text\": \"real\"}\n```";
        assert_eq!(
            extract_from_code_block(response).as_deref(),
            Some("{\"text\": \"real\"}")
        );
    }

    #[test]
    fn test_unlabelled_fence() {
        let response = "```\n{\"tweets\": [{\"text\": \"a\"}]}\n```";
        let content = parse_generated(response);
        assert_eq!(content.tweet_texts(), Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_unknown_shape_falls_back() {
        let response = "{\"headline\": \"nope\"}";
        assert_eq!(parse_generated(response), GeneratedContent::text(response));
    }

    #[test]
    fn test_bare_json_with_fenced_code_in_field() {
        let response = "{\"title\": \"Rust\", \"content\": \"<p>Try this:</p>\\n```rust\\nfn main() {}\\n```\", \"labels\": []}";
        match parse_generated(response) {
            GeneratedContent::Article { title, content, .. } => {
                assert_eq!(title, "Rust");
                assert!(content.contains("fn main() {}"));
            }
            other => panic!("expected article, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_json_without_fence() {
        let content = parse_generated("  {\"title\": \"A\", \"content\": \"<p>x</p>\", \"labels\": [\"rust\"]}  ");
        match content {
            GeneratedContent::Article { labels, .. } => assert_eq!(labels, vec!["rust"]),
            other => panic!("expected article, got {:?}", other),
        }
    }
}
