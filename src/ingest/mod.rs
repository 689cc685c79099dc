//! Feed ingestion pipeline.
//!
//! Fetches configured RSS/Atom feeds, normalizes entries, deduplicates by
//! provider GUID against the content store, and persists new items. Feed
//! and item failures are isolated so one bad feed never sinks a run.

mod fetch;
mod lock;
mod normalize;
mod runner;
mod tags;

pub use fetch::{parse_feed, FeedFetcher, FetchError, FetchedFeed, HttpFeedFetcher, RawEntry};
pub use lock::RunLock;
pub use normalize::{normalize_entry, NormalizeError};
pub use runner::IngestRunner;
pub use tags::{extract_tags, MAX_TAGS, TAG_VOCABULARY};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Feed polled when no feeds are configured.
pub const DEFAULT_FEED_URL: &str = "https://news.google.com/rss/search?q=%22single+stair%22+OR+housing+%22north+carolina%22&hl=en-US&gl=US&ceid=US:en";

/// Label applied to items from the default feed when the entry names no author.
pub const DEFAULT_FEED_LABEL: &str = "Google News";

fn default_enabled() -> bool {
    true
}

/// One configured feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSource {
    pub url: String,
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            enabled: true,
        }
    }

    /// The built-in feed used when the configuration lists none.
    pub fn default_feed() -> Self {
        Self::new(DEFAULT_FEED_URL, DEFAULT_FEED_LABEL)
    }
}

/// A feed that could not be fetched or parsed during a run.
#[derive(Debug, Clone)]
pub struct FeedFailure {
    pub label: String,
    pub url: String,
    pub error: String,
}

/// Outcome tallies for one ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Items newly created in the store.
    pub imported: usize,
    /// Items skipped because their GUID was already stored.
    pub skipped: usize,
    /// Items dropped by per-item errors.
    pub failed: usize,
    /// Feeds that failed wholesale.
    pub feed_failures: Vec<FeedFailure>,
}

/// Run-level ingestion errors. Per-feed and per-item problems are reported
/// in the [`IngestReport`] instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("another ingestion run is in progress (lock file: {})", .0.display())]
    AlreadyRunning(PathBuf),

    #[error("failed to create run lock: {0}")]
    Lock(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
