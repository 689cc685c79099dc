//! Ingestion run orchestration.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::fetch::FeedFetcher;
use super::lock::RunLock;
use super::normalize::normalize_entry;
use super::{FeedFailure, FeedSource, IngestError, IngestReport};
use crate::store::ContentStore;

/// Drives one ingestion run across a list of feeds.
///
/// Failure handling is layered: run-level problems (lock conflict, store
/// unreachable at start) abort with an error; a feed that cannot be fetched
/// is recorded and skipped; a bad entry is tallied and skipped.
pub struct IngestRunner<'a> {
    store: &'a dyn ContentStore,
    fetcher: &'a dyn FeedFetcher,
    lock_path: Option<PathBuf>,
    dry_run: bool,
}

impl<'a> IngestRunner<'a> {
    pub fn new(store: &'a dyn ContentStore, fetcher: &'a dyn FeedFetcher) -> Self {
        Self {
            store,
            fetcher,
            lock_path: None,
            dry_run: false,
        }
    }

    /// Guard the run with a lockfile at the given path.
    pub fn with_lock_path(mut self, path: PathBuf) -> Self {
        self.lock_path = Some(path);
        self
    }

    /// Process feeds and report what would happen without writing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self, feeds: &[FeedSource]) -> Result<IngestReport, IngestError> {
        let _lock = match &self.lock_path {
            Some(path) => Some(RunLock::acquire(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    IngestError::AlreadyRunning(path.clone())
                } else {
                    IngestError::Lock(e)
                }
            })?),
            None => None,
        };

        let mut report = IngestReport::default();

        // Read featured state once. The first item created while the store
        // has no featured item becomes featured; existing items are never
        // refeatured or unfeatured by ingestion.
        let mut want_featured = !self.store.has_featured().await?;

        for feed in feeds {
            if !feed.enabled {
                debug!(label = %feed.label, "feed disabled, skipping");
                continue;
            }

            info!(label = %feed.label, url = %feed.url, "processing feed");
            let fetched = match self.fetcher.fetch(&feed.url).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!(label = %feed.label, error = %e, "feed failed, continuing with next");
                    report.feed_failures.push(FeedFailure {
                        label: feed.label.clone(),
                        url: feed.url.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            for entry in fetched.entries {
                let mut item = match normalize_entry(entry, &feed.label) {
                    Ok(item) => item,
                    Err(e) => {
                        warn!(label = %feed.label, error = %e, "dropping entry");
                        report.failed += 1;
                        continue;
                    }
                };

                match self.store.find_by_guid(&item.guid).await {
                    Ok(Some(_)) => {
                        debug!(guid = %item.guid, "already stored, skipping");
                        report.skipped += 1;
                        continue;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(guid = %item.guid, error = %e, "dedup lookup failed");
                        report.failed += 1;
                        continue;
                    }
                }

                if want_featured {
                    item.featured = true;
                }

                if self.dry_run {
                    info!(title = %item.title, "dry run, would import");
                    if item.featured {
                        want_featured = false;
                    }
                    report.imported += 1;
                    continue;
                }

                match self.store.create_item(item).await {
                    Ok(created) => {
                        info!(title = %created.title, guid = %created.guid, featured = created.featured, "imported");
                        if created.featured {
                            want_featured = false;
                        }
                        report.imported += 1;
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to store item");
                        report.failed += 1;
                    }
                }
            }
        }

        info!(
            imported = report.imported,
            skipped = report.skipped,
            failed = report.failed,
            feed_failures = report.feed_failures.len(),
            "ingestion run complete"
        );
        Ok(report)
    }
}
