//! Environment-driven configuration

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://meal-ideas.onrender.com/api";

/// Default per-request timeout. Generation on the hosted backend is slow,
/// especially on a cold start.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MEAL_IDEAS_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
    #[error("MEAL_IDEAS_API_URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL the three contract paths are appended to
    pub api_url: String,
    pub request_timeout: Duration,
    /// Emit logs as JSON instead of the human-readable format
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_json: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("MEAL_IDEAS_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        let request_timeout = match lookup("MEAL_IDEAS_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_json = lookup("MEAL_IDEAS_LOG_JSON")
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        Ok(Self {
            api_url,
            request_timeout,
            log_json,
        })
    }
}
