use regex::Regex;
use std::sync::LazyLock;

static BLOCK_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)<(p|div|h[1-6]|ul|ol|blockquote|pre|table)[\s>]").ok());

/// True when `content` already carries block-level HTML.
fn is_html(content: &str) -> bool {
    BLOCK_TAG
        .as_ref()
        .is_some_and(|re| re.is_match(content))
}

/// Convert Markdown-ish article text to Blogger HTML.
///
/// Content already containing a block-level tag (`<p>`, `<div id=..>`,
/// `<h2>`, lists, quotes) is returned verbatim. Otherwise
/// blank-line separated paragraphs become `<hN>` headings (for leading `#`
/// runs, capped at 6) or `<p>` blocks with line breaks as `<br>`.
///
/// # Examples
///
/// ```
/// use herald_social::format_content;
///
/// assert_eq!(format_content("# Title\n\nBody text"), "<h1>Title</h1>\n<p>Body text</p>");
/// assert_eq!(format_content("<p>kept</p>"), "<p>kept</p>");
/// ```
pub fn format_content(content: &str) -> String {
    if is_html(content) {
        return content.to_string();
    }

    content
        .split("\n\n")
        .map(|paragraph| {
            let trimmed = paragraph.trim();
            if trimmed.starts_with('#') {
                let level = trimmed.chars().take_while(|c| *c == '#').count().min(6);
                let text = trimmed.trim_start_matches('#').trim_start();
                format!("<h{level}>{text}</h{level}>")
            } else {
                format!("<p>{}</p>", paragraph.replace('\n', "<br>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels_are_capped() {
        assert_eq!(format_content("######## Deep"), "<h6>Deep</h6>");
        assert_eq!(format_content("### Three"), "<h3>Three</h3>");
    }

    #[test]
    fn test_line_breaks_inside_paragraph() {
        assert_eq!(
            format_content("line one\nline two\n\nnext"),
            "<p>line one<br>line two</p>\n<p>next</p>"
        );
    }

    #[test]
    fn test_tags_with_attributes_pass_through() {
        for html in [
            "<p class=\"lead\">intro</p>\n\n<p>more</p>",
            "<DIV id=\"post\">body</DIV>",
            "<h2>Section</h2>\n\ntext",
            "<ul>\n<li>one</li>\n</ul>",
        ] {
            assert_eq!(format_content(html), html);
        }
    }

    #[test]
    fn test_inline_tags_still_wrapped() {
        assert_eq!(format_content("<b>bold</b> claim"), "<p><b>bold</b> claim</p>");
        assert_eq!(format_content("<pa>not a tag we know"), "<p><pa>not a tag we know</p>");
    }

    #[test]
    fn test_div_passes_through() {
        let html = "<div>already html\n\nwith gaps</div>";
        assert_eq!(format_content(html), html);
    }
}
