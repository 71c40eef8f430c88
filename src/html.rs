//! HTML utilities: excerpts, sanitization, entity handling
//!
//! Post content and error messages arrive as raw HTML. All truncation and
//! sanitization lives here so no component does its own string slicing.

use regex::Regex;
use std::sync::OnceLock;

/// Character budget for post excerpts shown in the listing grid
pub const EXCERPT_CHARS: usize = 200;

/// Tags that survive sanitization. Everything else is dropped, and script
/// and style elements are removed together with their content.
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "b", "i", "u", "a", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5",
    "h6", "blockquote", "code", "pre",
];

fn script_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")
            .expect("script block pattern is valid")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)</?([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").expect("tag pattern is valid"))
}

/// Truncate raw content to at most [`EXCERPT_CHARS`] characters.
///
/// Contract: input of `EXCERPT_CHARS` characters or fewer is returned
/// unchanged. Longer input is cut at exactly the character budget, which can
/// land mid-tag when the content is HTML; callers rendering excerpts must
/// strip tags after truncation.
pub fn excerpt(content: &str) -> String {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((byte_idx, _)) => content[..byte_idx].to_string(),
        None => content.to_string(),
    }
}

/// Allow-list HTML sanitizer.
///
/// Keeps the tags in [`ALLOWED_TAGS`] with all attributes stripped (closing
/// tags keep their slash), removes script/style elements including their
/// content, and drops every other tag while preserving its inner text.
pub fn sanitize(html: &str) -> String {
    let without_scripts = script_block_re().replace_all(html, "");
    tag_re()
        .replace_all(&without_scripts, |caps: &regex::Captures| {
            let name = caps[1].to_lowercase();
            if ALLOWED_TAGS.contains(&name.as_str()) {
                let closing = caps[0].starts_with("</");
                if closing {
                    format!("</{}>", name)
                } else {
                    format!("<{}>", name)
                }
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Remove all tags and collapse whitespace, for plain-text terminal display.
pub fn strip_tags(html: &str) -> String {
    let without_scripts = script_block_re().replace_all(html, "");
    let stripped = tag_re().replace_all(&without_scripts, " ");
    let decoded = decode_entities(&stripped);
    let mut out = String::with_capacity(decoded.len());
    let mut last_was_space = true;
    for ch in decoded.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out.trim_end().to_string()
}

/// Decode the HTML entities the content API is known to emit in error
/// messages and content (`&lt; &gt; &quot; &#039; &amp;`).
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

/// Escape text for contexts that will be rendered as HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_input_unchanged() {
        let short = "A brief announcement.";
        assert_eq!(excerpt(short), short);
    }

    #[test]
    fn test_excerpt_exactly_at_budget_unchanged() {
        let exact: String = "x".repeat(EXCERPT_CHARS);
        assert_eq!(excerpt(&exact), exact);
    }

    #[test]
    fn test_excerpt_long_input_cut_to_budget() {
        let long: String = "y".repeat(EXCERPT_CHARS * 3);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS);
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        // Multibyte characters: the budget is 200 characters, not bytes
        let long: String = "é".repeat(EXCERPT_CHARS + 50);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS);
    }

    #[test]
    fn test_sanitize_keeps_allowed_tags_without_attributes() {
        let html = r#"<p class="lead">Hello <strong>world</strong></p>"#;
        assert_eq!(sanitize(html), "<p>Hello <strong>world</strong></p>");
    }

    #[test]
    fn test_sanitize_removes_script_with_content() {
        let html = "<p>ok</p><script>alert('x')</script><p>fin</p>";
        assert_eq!(sanitize(html), "<p>ok</p><p>fin</p>");
    }

    #[test]
    fn test_sanitize_drops_unknown_tags_keeps_text() {
        let html = "<div onclick=\"evil()\">text</div>";
        assert_eq!(sanitize(html), "text");
    }

    #[test]
    fn test_strip_tags_collapses_whitespace() {
        let html = "<p>Un  article</p>\n<p>en deux paragraphes</p>";
        assert_eq!(strip_tags(html), "Un article en deux paragraphes");
    }

    #[test]
    fn test_decode_entities_round_trips_escape() {
        let original = "<a href=\"x\">c'est & fini</a>";
        assert_eq!(decode_entities(&escape(original)), original);
    }
}
