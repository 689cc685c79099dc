//! In-memory content store for tests and dry runs.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ContentStore, StoreError};
use crate::models::{FeedItem, NewFeedItem};

/// A `ContentStore` backed by a plain `Vec`.
#[derive(Default)]
pub struct MemoryContentStore {
    items: Mutex<Vec<FeedItem>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing items.
    pub fn with_items(items: Vec<FeedItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// Snapshot of everything stored, in insertion order.
    pub async fn all(&self) -> Vec<FeedItem> {
        self.items.lock().await.clone()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn find_by_guid(&self, guid: &str) -> Result<Option<FeedItem>, StoreError> {
        let items = self.items.lock().await;
        Ok(items.iter().find(|item| item.guid == guid).cloned())
    }

    async fn create_item(&self, item: NewFeedItem) -> Result<FeedItem, StoreError> {
        let item = item.into_item(Uuid::new_v4().to_string());
        let mut items = self.items.lock().await;
        items.push(item.clone());
        Ok(item)
    }

    async fn has_featured(&self) -> Result<bool, StoreError> {
        let items = self.items.lock().await;
        Ok(items.iter().any(|item| item.featured))
    }

    async fn count_items(&self) -> Result<usize, StoreError> {
        Ok(self.items.lock().await.len())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<FeedItem>, StoreError> {
        let items = self.items.lock().await;
        let mut sorted: Vec<FeedItem> = items.clone();
        sorted.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        sorted.truncate(limit);
        Ok(sorted)
    }

    async fn set_featured(&self, id: &str, featured: bool) -> Result<(), StoreError> {
        let mut items = self.items.lock().await;
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.featured = featured;
                Ok(())
            }
            None => Err(StoreError::Api {
                status: 404,
                message: format!("no item with id {id}"),
            }),
        }
    }
}
