//! Dashboard configuration.

use crate::consts::dashboard_consts::{endpoints, polling};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} interval must be at least one second")]
    ZeroInterval(&'static str),

    #[error("request timeout must be at least one second")]
    ZeroTimeout,

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Scheme and authority of the status API, e.g. `http://localhost:8080`.
    pub base_url: String,
    pub status_path: String,
    pub incidents_path: String,
    pub status_interval_secs: u64,
    pub incidents_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: endpoints::DEFAULT_BASE_URL.to_string(),
            status_path: endpoints::STATUS_PATH.to_string(),
            incidents_path: endpoints::OPEN_INCIDENTS_PATH.to_string(),
            status_interval_secs: polling::STATUS_INTERVAL_SECS,
            incidents_interval_secs: polling::INCIDENTS_INTERVAL_SECS,
            request_timeout_secs: polling::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl DashboardConfig {
    /// Create a default config pointing at the given API base URL.
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn status_url(&self) -> String {
        join_url(&self.base_url, &self.status_path)
    }

    pub fn incidents_url(&self) -> String {
        join_url(&self.base_url, &self.incidents_path)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }

    pub fn incidents_interval(&self) -> Duration {
        Duration::from_secs(self.incidents_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reject values the pollers cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval("status"));
        }
        if self.incidents_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval("incidents"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme {}", other))),
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: DashboardConfig = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
