//! Configuration management for the community client
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files and environment variables.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides the configured API base URL.
pub const API_BASE_ENV: &str = "COMMUNITY_API_BASE";

/// Client configuration
///
/// Holds everything the request pipeline needs: where the backend
/// lives, how long to wait for it, and which path prefix marks the
/// administrative area of the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend API, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent string sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Path prefix of the administrative area
    ///
    /// When a session is invalidated while the current navigation path
    /// starts with this prefix, the pipeline redirects to the admin
    /// login route instead of the standard one.
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("community-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
            admin_prefix: default_admin_prefix(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file
    ///
    /// Missing fields fall back to their defaults. After parsing, the
    /// `COMMUNITY_API_BASE` environment variable (when set and
    /// non-empty) overrides the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid
    /// YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(ClientError::Io)?;
        let mut config: ClientConfig = serde_yaml::from_str(&contents).map_err(ClientError::Yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment-variable overrides to this configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                tracing::debug!("overriding base URL from {}", API_BASE_ENV);
                self.base_url = base;
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL does not parse as
    /// an absolute http(s) URL, if the timeout is zero, or if the admin
    /// prefix is not an absolute path.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Config(format!("invalid base URL: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::Config(format!(
                "unsupported base URL scheme: {}",
                parsed.scheme()
            ))
            .into());
        }
        if self.timeout_seconds == 0 {
            return Err(ClientError::Config("timeout must be greater than zero".to_string()).into());
        }
        if !self.admin_prefix.starts_with('/') {
            return Err(ClientError::Config(format!(
                "admin prefix must be an absolute path: {}",
                self.admin_prefix
            ))
            .into());
        }
        Ok(())
    }

    /// The per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The base URL with any trailing slash removed.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
