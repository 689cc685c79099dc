//! URL-safe slug derivation for stored feed items.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9 -]").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static HYPHEN_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Derive a URL-safe slug from a title.
///
/// Lowercases, drops characters outside `[a-z0-9 -]`, turns whitespace runs
/// into single hyphens, collapses repeated hyphens, and trims hyphens from
/// both ends. The result contains only `[a-z0-9-]` and the function is
/// idempotent.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let cleaned = DISALLOWED_RE.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RE.replace_all(cleaned.trim(), "-");
    let collapsed = HYPHEN_RUN_RE.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Durham Approves New Housing"), "durham-approves-new-housing");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(
            slugify("Raleigh's \"Missing Middle\" Plan: What's Next?"),
            "raleighs-missing-middle-plan-whats-next"
        );
    }

    #[test]
    fn test_slugify_collapses_hyphens() {
        assert_eq!(slugify("single - stair -- reform"), "single-stair-reform");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("- leading and trailing -"), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_idempotent() {
        let once = slugify("NC House Bill 409: Single-Stair Pilot!");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_slugify_output_alphabet() {
        let slug = slugify("Vision Zero & the 15-minute city (Durham, NC)");
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
        assert!(!slug.contains("--"));
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
