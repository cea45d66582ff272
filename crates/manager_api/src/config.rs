//! Build-time embedded manager configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

include!(concat!(env!("OUT_DIR"), "/manager_config_generated.rs"));

/// Request timeout used when no configuration overrides it.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Where the manager lives and how long a request may take.
pub struct ManagerConfig {
    /// Manager base URL; empty selects the page's own origin.
    #[serde(default)]
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ManagerConfig {
    /// Parses the configuration embedded from `manager.config.toml` at build time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Embedded`] when the embedded JSON does not match this shape.
    pub fn embedded() -> Result<Self, ConfigError> {
        serde_json::from_str(MANAGER_CONFIG_JSON).map_err(ConfigError::Embedded)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Error)]
/// Client construction failure.
pub enum ConfigError {
    /// The embedded configuration could not be parsed.
    #[error("embedded manager config is invalid: {0}")]
    Embedded(#[source] serde_json::Error),
    /// The base URL is not an absolute http(s) URL.
    #[error("base URL `{url}` is invalid: {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// No base URL was configured and there is no page origin to fall back to.
    #[error("no base URL configured and the page origin is unavailable")]
    MissingPageOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_checked_in_defaults() {
        let config = ManagerConfig::embedded().expect("embedded config parses");
        assert_eq!(config, ManagerConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn base_url_defaults_to_empty_when_omitted() {
        let config: ManagerConfig =
            serde_json::from_str(r#"{"request_timeout_ms": 15000}"#).expect("parse");
        assert!(config.base_url.is_empty());
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }
}
