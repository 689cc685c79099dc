//! HTML cleanup utilities for feed content.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Remove HTML tags from a string, leaving the text between them.
pub fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Decode the small set of HTML entities that show up in feed snippets.
///
/// Only these entities are decoded; anything else passes through untouched.
pub fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Derive a plain-text description from an HTML fragment.
///
/// Decodes entities, strips tags (including tags that arrive
/// entity-encoded), and collapses whitespace runs so the result is a
/// single trimmed line of text.
pub fn clean_description(s: &str) -> String {
    let decoded = decode_entities(s);
    let stripped = strip_tags(&decoded);
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_basic() {
        assert_eq!(strip_tags("hello"), "hello");
        assert_eq!(strip_tags("<p>hello</p>"), "hello");
        assert_eq!(strip_tags("<a href=\"x\">link</a> text"), "link text");
    }

    #[test]
    fn test_strip_tags_unclosed() {
        assert_eq!(strip_tags("before <img src='x'> after"), "before  after");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&quot;hi&quot; &#39;there&#39;"), "\"hi\" 'there'");
        assert_eq!(decode_entities("one&nbsp;two"), "one two");
    }

    #[test]
    fn test_decode_entities_unknown_passthrough() {
        assert_eq!(decode_entities("&copy; 2025"), "&copy; 2025");
    }

    #[test]
    fn test_clean_description_strips_and_decodes() {
        assert_eq!(clean_description("A &amp; B &lt;tag&gt;"), "A & B");
    }

    #[test]
    fn test_clean_description_collapses_whitespace() {
        assert_eq!(
            clean_description("<p>Durham   approves</p>\n\n<p>new  housing</p>"),
            "Durham approves new housing"
        );
    }

    #[test]
    fn test_clean_description_empty() {
        assert_eq!(clean_description(""), "");
        assert_eq!(clean_description("<br/>"), "");
    }
}
