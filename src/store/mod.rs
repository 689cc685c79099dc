//! Persistence layer for ingested news items.
//!
//! The canonical backend is a hosted content API (`ContentApiStore`) that
//! speaks GROQ-style queries and mutation batches over HTTP. An in-memory
//! implementation backs tests and dry runs.

mod content_api;
mod memory;

pub use content_api::ContentApiStore;
pub use memory::MemoryContentStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{FeedItem, NewFeedItem};

/// Errors from content store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(
        "store credentials not configured (set STAIRWELL_STORE_URL, STAIRWELL_STORE_DATASET, STAIRWELL_STORE_TOKEN)"
    )]
    MissingCredentials,

    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected store response: {0}")]
    Decode(String),
}

/// Document persistence for news items.
///
/// Lookup is keyed on the feed GUID, which is the dedup key for ingestion.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Find an item by its feed GUID.
    async fn find_by_guid(&self, guid: &str) -> Result<Option<FeedItem>, StoreError>;

    /// Create a new item, assigning it a document id.
    async fn create_item(&self, item: NewFeedItem) -> Result<FeedItem, StoreError>;

    /// Whether any stored item is currently featured.
    async fn has_featured(&self) -> Result<bool, StoreError>;

    /// Total number of stored items.
    async fn count_items(&self) -> Result<usize, StoreError>;

    /// The most recently published items, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<FeedItem>, StoreError>;

    /// Set or clear the featured flag on an item.
    async fn set_featured(&self, id: &str, featured: bool) -> Result<(), StoreError>;
}
