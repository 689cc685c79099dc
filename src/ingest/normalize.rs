//! Entry normalization: raw feed entries into storable news items.

use chrono::Utc;
use thiserror::Error;

use super::fetch::RawEntry;
use super::tags::extract_tags;
use crate::models::NewFeedItem;
use crate::utils::{clean_description, slugify};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("entry has no link")]
    MissingLink,
}

/// Normalize one feed entry.
///
/// Fallbacks: title "Untitled", guid falls back to the link, publish date
/// falls back to now, source label falls back to the feed label. The
/// description is the cleaned summary, or cleaned content when the feed
/// carries no summary. An entry without a link cannot be stored.
pub fn normalize_entry(entry: RawEntry, feed_label: &str) -> Result<NewFeedItem, NormalizeError> {
    let link = entry
        .link
        .filter(|l| !l.trim().is_empty())
        .ok_or(NormalizeError::MissingLink)?;

    let title = entry
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let guid = entry
        .guid
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| link.clone());

    let published_at = entry.published.unwrap_or_else(Utc::now);

    let raw_description = entry
        .summary
        .as_deref()
        .or(entry.content.as_deref())
        .unwrap_or_default();
    let description = clean_description(raw_description);

    let source_label = entry
        .author
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| feed_label.to_string());

    let slug = slugify(&title);
    let tags = extract_tags(&title, &description);

    Ok(NewFeedItem {
        title,
        slug,
        link,
        guid,
        published_at,
        description,
        content: entry.content,
        source_label,
        tags,
        featured: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry() -> RawEntry {
        RawEntry {
            guid: Some("guid-1".to_string()),
            title: Some("Durham approves new housing".to_string()),
            link: Some("https://example.org/a".to_string()),
            published: Some(Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()),
            summary: Some("<p>More &amp; denser homes</p>".to_string()),
            content: None,
            author: Some("The Herald".to_string()),
        }
    }

    #[test]
    fn test_full_entry() {
        let item = normalize_entry(entry(), "Fallback Label").unwrap();
        assert_eq!(item.title, "Durham approves new housing");
        assert_eq!(item.slug, "durham-approves-new-housing");
        assert_eq!(item.guid, "guid-1");
        assert_eq!(item.description, "More & denser homes");
        assert_eq!(item.source_label, "The Herald");
        assert_eq!(item.tags, vec!["durham", "housing"]);
        assert!(!item.featured);
    }

    #[test]
    fn test_missing_link_is_error() {
        let mut e = entry();
        e.link = None;
        assert!(matches!(
            normalize_entry(e, "L"),
            Err(NormalizeError::MissingLink)
        ));
    }

    #[test]
    fn test_title_fallback() {
        let mut e = entry();
        e.title = None;
        let item = normalize_entry(e, "L").unwrap();
        assert_eq!(item.title, "Untitled");
        assert_eq!(item.slug, "untitled");
    }

    #[test]
    fn test_guid_falls_back_to_link() {
        let mut e = entry();
        e.guid = None;
        let item = normalize_entry(e, "L").unwrap();
        assert_eq!(item.guid, "https://example.org/a");
    }

    #[test]
    fn test_date_falls_back_to_now() {
        let mut e = entry();
        e.published = None;
        let before = Utc::now();
        let item = normalize_entry(e, "L").unwrap();
        assert!(item.published_at >= before);
        assert!(item.published_at <= Utc::now());
    }

    #[test]
    fn test_description_falls_back_to_content() {
        let mut e = entry();
        e.summary = None;
        e.content = Some("<div>Full <b>story</b> text</div>".to_string());
        let item = normalize_entry(e, "L").unwrap();
        assert_eq!(item.description, "Full story text");
        assert_eq!(item.content.as_deref(), Some("<div>Full <b>story</b> text</div>"));
    }

    #[test]
    fn test_source_label_fallback() {
        let mut e = entry();
        e.author = None;
        let item = normalize_entry(e, "Google News").unwrap();
        assert_eq!(item.source_label, "Google News");
    }
}
