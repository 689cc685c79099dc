//! Append-only engagement log and read-side stats.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::{ContactAction, NewContactAction};

/// How many actions `engagement_stats` returns as recent activity.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("engagement log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("engagement log is corrupt: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Append-only record of outreach actions.
///
/// `append` assigns the id and timestamp; records are never mutated after
/// being written.
pub trait EngagementLog: Send + Sync {
    fn append(&self, action: NewContactAction) -> Result<ContactAction, EngagementError>;
    fn read_all(&self) -> Result<Vec<ContactAction>, EngagementError>;
}

/// Log stored as one JSON array in a file.
///
/// Reads the whole array, appends, and rewrites it. Assumes a single
/// writer; concurrent processes would clobber each other.
pub struct JsonFileEngagementLog {
    path: PathBuf,
}

impl JsonFileEngagementLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<Vec<ContactAction>, EngagementError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

impl EngagementLog for JsonFileEngagementLog {
    fn append(&self, action: NewContactAction) -> Result<ContactAction, EngagementError> {
        let action = action.into_action(Uuid::new_v4().to_string(), Utc::now());

        let mut actions = self.load()?;
        actions.push(action.clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&actions)?)?;
        debug!(path = %self.path.display(), total = actions.len(), "engagement recorded");
        Ok(action)
    }

    fn read_all(&self) -> Result<Vec<ContactAction>, EngagementError> {
        self.load()
    }
}

/// In-memory log for tests.
#[derive(Default)]
pub struct MemoryEngagementLog {
    actions: Mutex<Vec<ContactAction>>,
}

impl MemoryEngagementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actions(actions: Vec<ContactAction>) -> Self {
        Self {
            actions: Mutex::new(actions),
        }
    }
}

impl EngagementLog for MemoryEngagementLog {
    fn append(&self, action: NewContactAction) -> Result<ContactAction, EngagementError> {
        let action = action.into_action(Uuid::new_v4().to_string(), Utc::now());
        let mut actions = self
            .actions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        actions.push(action.clone());
        Ok(action)
    }

    fn read_all(&self) -> Result<Vec<ContactAction>, EngagementError> {
        let actions = self
            .actions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(actions.clone())
    }
}

/// Aggregated view of the engagement log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngagementStats {
    pub total_actions: usize,
    pub by_method: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub recent_activity: Vec<ContactAction>,
}

/// Recompute stats from the full log.
///
/// Recent activity is the newest [`RECENT_ACTIVITY_LIMIT`] actions by
/// descending timestamp.
pub fn engagement_stats(log: &dyn EngagementLog) -> Result<EngagementStats, EngagementError> {
    let actions = log.read_all()?;

    let mut stats = EngagementStats {
        total_actions: actions.len(),
        ..Default::default()
    };
    for action in &actions {
        *stats
            .by_method
            .entry(action.method.as_str().to_string())
            .or_insert(0) += 1;
        *stats
            .by_status
            .entry(action.status.as_str().to_string())
            .or_insert(0) += 1;
    }

    let mut recent = actions;
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(RECENT_ACTIVITY_LIMIT);
    stats.recent_activity = recent;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::models::{ContactMethod, ContactStatus};

    fn new_action(method: ContactMethod, status: ContactStatus) -> NewContactAction {
        NewContactAction {
            user_name: "Pat Doe".to_string(),
            user_email: Some("pat@example.net".to_string()),
            legislator_id: "nc-house-31-rep".to_string(),
            legislator_name: "Rep. Alex Whitfield".to_string(),
            method,
            template_id: Some("formal-email".to_string()),
            template_title: Some("Formal email".to_string()),
            message: "Dear Rep. Whitfield, please support single-stair reform.".to_string(),
            status,
            notes: None,
            response: None,
        }
    }

    #[test]
    fn test_json_log_round_trips_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engagement.json");

        let log = JsonFileEngagementLog::new(&path);
        log.append(new_action(ContactMethod::Email, ContactStatus::Sent))
            .unwrap();
        log.append(new_action(ContactMethod::Phone, ContactStatus::Failed))
            .unwrap();

        // A fresh instance reads what the first one wrote
        let reopened = JsonFileEngagementLog::new(&path);
        let actions = reopened.read_all().unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].method, ContactMethod::Email);
        assert_eq!(actions[0].user_name, "Pat Doe");
        assert_eq!(actions[0].user_email.as_deref(), Some("pat@example.net"));
        assert_eq!(actions[0].template_title.as_deref(), Some("Formal email"));
        assert!(actions[0].message.contains("single-stair"));
        assert_eq!(actions[1].status, ContactStatus::Failed);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let log = JsonFileEngagementLog::new(dir.path().join("never-written.json"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_assigns_unique_ids() {
        let log = MemoryEngagementLog::new();
        let a = log
            .append(new_action(ContactMethod::Email, ContactStatus::Sent))
            .unwrap();
        let b = log
            .append(new_action(ContactMethod::Email, ContactStatus::Sent))
            .unwrap();
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn test_stats_aggregation() {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut seeded = Vec::new();
        for i in 0..12 {
            let method = if i % 3 == 0 {
                ContactMethod::Phone
            } else {
                ContactMethod::Email
            };
            let status = if i == 5 {
                ContactStatus::Failed
            } else {
                ContactStatus::Sent
            };
            seeded.push(new_action(method, status).into_action(
                format!("action-{i}"),
                base + Duration::hours(i),
            ));
        }
        let log = MemoryEngagementLog::with_actions(seeded);

        let stats = engagement_stats(&log).unwrap();
        assert_eq!(stats.total_actions, 12);
        assert_eq!(stats.by_method["phone"], 4);
        assert_eq!(stats.by_method["email"], 8);
        assert_eq!(stats.by_status["failed"], 1);
        assert_eq!(stats.by_status["sent"], 11);

        assert_eq!(stats.recent_activity.len(), RECENT_ACTIVITY_LIMIT);
        assert_eq!(stats.recent_activity[0].id, "action-11");
        assert_eq!(stats.recent_activity[9].id, "action-2");
    }

    #[test]
    fn test_stats_on_empty_log() {
        let stats = engagement_stats(&MemoryEngagementLog::new()).unwrap();
        assert_eq!(stats.total_actions, 0);
        assert!(stats.by_method.is_empty());
        assert!(stats.recent_activity.is_empty());
    }
}
