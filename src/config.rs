//! Configuration management for Stairwell.
//!
//! Two layers, applied in order: [`Settings`] holds the resolved runtime
//! values with sensible defaults, and [`Config`] is the optional
//! `stairwell.{toml,yaml,json}` file that overrides them. Environment
//! variables (loaded from `.env` by `main`) win over the file for
//! credentials, so tokens never have to live on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ingest::FeedSource;

/// Default request timeout in seconds for all outbound HTTP.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10;

/// Default delay between feed requests in milliseconds.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;

/// Default content API version segment.
pub const DEFAULT_API_VERSION: &str = "v2021-10-21";

/// Default public geocoding endpoint.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Filename of the engagement log inside the data directory.
const ENGAGEMENT_LOG_FILENAME: &str = "engagement.json";

/// Filename of the ingestion run lock inside the data directory.
const INGEST_LOCK_FILENAME: &str = "ingest.lock";

/// Config file basenames probed in the working directory, in order.
const CONFIG_BASENAMES: &[&str] = &[
    "stairwell.toml",
    "stairwell.yaml",
    "stairwell.yml",
    "stairwell.json",
];

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory (lock file, engagement log, starter config).
    pub data_dir: PathBuf,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Delay between feed requests in milliseconds.
    pub request_delay_ms: u64,
    /// Base URL of the geocoding endpoint.
    pub geocoder_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to the platform data directory, falling back to the home
        // directory and finally the current directory.
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stairwell");

        Self {
            data_dir,
            user_agent: "Stairwell/0.3 (+https://singlestairnc.org)".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Path of the append-only engagement log.
    pub fn engagement_log_path(&self) -> PathBuf {
        self.data_dir.join(ENGAGEMENT_LOG_FILENAME)
    }

    /// Path of the ingestion run lock.
    pub fn ingest_lock_path(&self) -> PathBuf {
        self.data_dir.join(INGEST_LOCK_FILENAME)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }
}

/// Content store connection section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the content API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Dataset name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// Write token. Prefer STAIRWELL_STORE_TOKEN over putting it here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// API version path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// Resolved store credentials, environment over file.
///
/// Fields default to empty strings when unset; the store client rejects
/// empty credentials before any request is made.
#[derive(Debug, Clone)]
pub struct StoreCredentials {
    pub url: String,
    pub dataset: String,
    pub token: String,
    pub api_version: String,
}

/// Geocoder section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL of a Nominatim-compatible endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Delay between feed requests in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_delay_ms: Option<u64>,
    /// Content store connection.
    #[serde(default)]
    pub store: StoreConfig,
    /// Geocoder endpoint.
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    /// Feeds to ingest, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feeds: Vec<FeedSource>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, probing the working directory and then the
    /// default data directory for a `stairwell.*` file. Missing file means
    /// defaults; a file that exists but fails to parse is an error worth
    /// surfacing, not ignoring.
    pub async fn load() -> Result<Self, String> {
        let data_dir = Settings::default().data_dir;
        for dir in [Path::new("."), data_dir.as_path()] {
            for basename in CONFIG_BASENAMES {
                let path = dir.join(basename);
                if path.exists() {
                    return Self::load_from_path(&path).await;
                }
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    /// Supports TOML, YAML, and JSON based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    /// `base_dir` is used to resolve relative paths.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(delay) = self.request_delay_ms {
            settings.request_delay_ms = delay;
        }
        if let Some(ref base_url) = self.geocoder.base_url {
            settings.geocoder_url = base_url.clone();
        }
    }

    /// Resolve store credentials, with environment variables taking
    /// precedence over the config file.
    pub fn store_credentials(&self) -> StoreCredentials {
        let from_env = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        StoreCredentials {
            url: from_env("STAIRWELL_STORE_URL")
                .or_else(|| self.store.url.clone())
                .unwrap_or_default(),
            dataset: from_env("STAIRWELL_STORE_DATASET")
                .or_else(|| self.store.dataset.clone())
                .unwrap_or_default(),
            token: from_env("STAIRWELL_STORE_TOKEN")
                .or_else(|| self.store.token.clone())
                .unwrap_or_default(),
            api_version: from_env("STAIRWELL_STORE_API_VERSION")
                .or_else(|| self.store.api_version.clone())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        }
    }

    /// The feeds to ingest: the configured list, or the built-in default
    /// feed when none are configured.
    pub fn feeds(&self) -> Vec<FeedSource> {
        if self.feeds.is_empty() {
            vec![FeedSource::default_feed()]
        } else {
            self.feeds.clone()
        }
    }

    /// Render a starter config file for `stairwell init`.
    pub fn starter_toml() -> String {
        let config = Config {
            store: StoreConfig {
                url: Some("https://content.example.org".to_string()),
                dataset: Some("production".to_string()),
                token: None,
                api_version: None,
            },
            feeds: vec![FeedSource::default_feed()],
            ..Default::default()
        };
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Load settings with CLI overrides applied.
/// Returns (Settings, Config) tuple.
pub async fn load_settings(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
) -> Result<(Settings, Config), String> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::load().await?,
    };

    let mut settings = Settings::default();

    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    config.apply_to_settings(&mut settings, &base_dir);

    // --data-dir wins over both defaults and the config file
    if let Some(data_dir) = data_dir {
        settings.data_dir = data_dir;
    }
    if let Some(data_dir) = std::env::var("STAIRWELL_DATA_DIR")
        .ok()
        .filter(|v| !v.is_empty())
    {
        settings.data_dir = PathBuf::from(shellexpand::tilde(&data_dir).as_ref());
    }

    Ok((settings, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(settings.geocoder_url, DEFAULT_GEOCODER_URL);
        assert!(settings.data_dir.ends_with("stairwell"));
        assert!(settings
            .engagement_log_path()
            .ends_with(ENGAGEMENT_LOG_FILENAME));
    }

    #[tokio::test]
    async fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stairwell.toml");
        tokio::fs::write(
            &path,
            r#"
user_agent = "test-agent"
request_timeout = 5

[store]
url = "https://content.example.org"
dataset = "production"

[geocoder]
base_url = "https://geo.example.org"

[[feeds]]
url = "https://example.org/rss"
label = "Example"
"#,
        )
        .await
        .unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.user_agent.as_deref(), Some("test-agent"));
        assert_eq!(config.feeds.len(), 1);

        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, dir.path());
        assert_eq!(settings.user_agent, "test-agent");
        assert_eq!(settings.request_timeout, 5);
        assert_eq!(settings.geocoder_url, "https://geo.example.org");
    }

    #[tokio::test]
    async fn test_load_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stairwell.json");
        tokio::fs::write(&path, r#"{"request_delay_ms": 100}"#)
            .await
            .unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.request_delay_ms, Some(100));
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stairwell.toml");
        tokio::fs::write(&path, "not = [valid").await.unwrap();

        assert!(Config::load_from_path(&path).await.is_err());
    }

    #[test]
    fn test_relative_data_dir_resolves_against_base() {
        let config = Config {
            data_dir: Some("data".to_string()),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/srv/stairwell"));
        assert_eq!(settings.data_dir, PathBuf::from("/srv/stairwell/data"));
    }

    #[test]
    fn test_default_feed_when_none_configured() {
        let config = Config::default();
        let feeds = config.feeds();
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].label, crate::ingest::DEFAULT_FEED_LABEL);
    }

    #[test]
    fn test_starter_toml_parses_back() {
        let rendered = Config::starter_toml();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert!(parsed.store.url.is_some());
        assert_eq!(parsed.feeds.len(), 1);
    }
}
