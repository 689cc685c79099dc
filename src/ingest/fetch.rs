//! Feed retrieval and parsing.
//!
//! `HttpFeedFetcher` downloads a feed document and parses it with `feed-rs`,
//! which handles both RSS and Atom. Entries are flattened into `RawEntry`
//! so the rest of the pipeline never touches the parser's model directly.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

/// Errors from fetching or parsing a single feed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP {0}")]
    Status(u16),

    #[error("feed parse failed: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

/// A feed entry reduced to the fields ingestion cares about.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

/// A parsed feed: its title plus entries in native order.
#[derive(Debug, Clone, Default)]
pub struct FetchedFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

/// Retrieves and parses one feed URL.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedFeed, FetchError>;
}

/// Parse a feed document already in memory.
pub fn parse_feed(bytes: &[u8]) -> Result<FetchedFeed, FetchError> {
    let feed = feed_rs::parser::parse(bytes)?;
    Ok(convert(feed))
}

fn convert(feed: feed_rs::model::Feed) -> FetchedFeed {
    FetchedFeed {
        title: feed.title.map(|t| t.content),
        entries: feed.entries.into_iter().map(convert_entry).collect(),
    }
}

fn convert_entry(entry: feed_rs::model::Entry) -> RawEntry {
    RawEntry {
        link: entry.links.first().map(|l| l.href.clone()),
        author: entry.authors.first().map(|p| p.name.clone()),
        guid: (!entry.id.is_empty()).then_some(entry.id),
        title: entry.title.map(|t| t.content),
        published: entry.published.or(entry.updated),
        summary: entry.summary.map(|t| t.content),
        content: entry.content.and_then(|c| c.body),
    }
}

/// HTTP-backed fetcher used by real ingestion runs.
pub struct HttpFeedFetcher {
    client: reqwest::Client,
    delay: Duration,
}

impl HttpFeedFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            delay: Duration::ZERO,
        })
    }

    /// Pause this long before each fetch. Keeps multi-feed runs polite to
    /// shared feed hosts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedFeed, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        debug!(url, "fetching feed");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        parse_feed(&bytes)
    }
}
