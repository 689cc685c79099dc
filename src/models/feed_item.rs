//! News feed item models.
//!
//! Items are created once per provider GUID and never updated or deleted by
//! the ingestion job; curation (the featured flag) is patched separately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news item as stored in the content store.
///
/// Field names follow the store's camelCase document convention; `id` maps
/// to the store-assigned `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Store document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Item headline.
    pub title: String,
    /// URL-safe slug derived from the title.
    pub slug: String,
    /// Canonical URL of the article.
    pub link: String,
    /// Provider-assigned GUID, unique within the store (dedup key).
    pub guid: String,
    /// Publication timestamp reported by the feed.
    pub published_at: DateTime<Utc>,
    /// Plain-text description derived from the feed snippet.
    pub description: String,
    /// Raw article content when the provider supplies it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Author or feed label the item came from.
    pub source_label: String,
    /// Keyword tags matched from the fixed vocabulary (at most 5).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether this item is the curated front-page feature.
    #[serde(default)]
    pub featured: bool,
}

/// A normalized item that has not been written to the store yet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedItem {
    pub title: String,
    pub slug: String,
    pub link: String,
    pub guid: String,
    pub published_at: DateTime<Utc>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub source_label: String,
    pub tags: Vec<String>,
    pub featured: bool,
}

impl NewFeedItem {
    /// Attach a store-assigned id, producing the stored form.
    pub fn into_item(self, id: String) -> FeedItem {
        FeedItem {
            id,
            title: self.title,
            slug: self.slug,
            link: self.link,
            guid: self.guid,
            published_at: self.published_at,
            description: self.description,
            content: self.content,
            source_label: self.source_label,
            tags: self.tags,
            featured: self.featured,
        }
    }
}
