//! Application configuration
//!
//! Read once at startup from the environment. There is no runtime
//! reconfiguration; a running view keeps the config it was built with.

use crate::error::{NavError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Environment variable holding the Search API base URL
pub const ENV_API_URL: &str = "FOSSNAV_API_URL";
/// Environment variable holding a backend session cookie (`name=value`)
pub const ENV_SESSION: &str = "FOSSNAV_SESSION";
/// Environment variable overriding the log file location
pub const ENV_LOG_FILE: &str = "FOSSNAV_LOG";
/// Environment variable overriding the log level filter
pub const ENV_LOG_LEVEL: &str = "FOSSNAV_LOG_LEVEL";

/// Base URL used when nothing is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Debounce quiet window for incremental search
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(300);

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Search API base URL
    pub api_base: Url,
    /// Session cookie forwarded with every request
    pub session_cookie: Option<String>,
    /// Quiet window before a typed query is sent
    pub quiet_window: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// How long a toast stays on screen
    pub toast_ttl: Duration,
    /// Log file path
    pub log_file: PathBuf,
    /// Log filter directive (e.g. `info`, `fossnav=debug`)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            session_cookie: None,
            quiet_window: DEFAULT_QUIET_WINDOW,
            request_timeout: Duration::from_secs(15),
            toast_ttl: Duration::from_secs(4),
            log_file: std::env::temp_dir().join("fossnav.log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_api_base(base.trim())?;
        }
        config.session_cookie = lookup(ENV_SESSION).filter(|v| !v.trim().is_empty());
        if let Some(path) = lookup(ENV_LOG_FILE).filter(|v| !v.trim().is_empty()) {
            config.log_file = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Replace the API base URL
    pub fn with_api_base(mut self, base: &str) -> Result<Self> {
        let url = Url::parse(base)?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(NavError::Config(format!(
                "API base must be an http(s) URL, got '{}'",
                base
            )));
        }
        self.api_base = url;
        Ok(self)
    }
}
