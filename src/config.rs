//! Configuration management for Tempodash
//!
//! This module handles loading, validation, and management of the
//! application configuration from YAML files.

use crate::error::{Result, TempoError};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://www.api-couleur-tempo.fr/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8089
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream tariff API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Web server binding configuration
    #[serde(default)]
    pub web: WebConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream api-couleur-tempo endpoint parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Web server binding parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path or directory; empty disables file logging
    #[serde(default)]
    pub file: String,

    /// Whether to also log to stdout
    #[serde(default = "default_true")]
    pub console_output: bool,

    /// Emit JSON-formatted log lines
    #[serde(default)]
    pub json_format: bool,

    /// Number of rotated log files to keep
    #[serde(default = "default_backup_count")]
    pub backup_count: u32,
}

fn default_backup_count() -> u32 {
    3
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
            console_output: true,
            json_format: false,
            backup_count: default_backup_count(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            web: WebConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            TempoError::config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.upstream.base_url.trim().is_empty() {
            return Err(TempoError::validation(
                "upstream.base_url",
                "base URL must not be empty",
            ));
        }
        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            return Err(TempoError::validation(
                "upstream.base_url",
                "base URL must be http(s)",
            ));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(TempoError::validation(
                "upstream.timeout_secs",
                "timeout must be at least 1 second",
            ));
        }
        if self.web.host.trim().is_empty() {
            return Err(TempoError::validation("web.host", "host must not be empty"));
        }
        if self.web.port == 0 {
            return Err(TempoError::validation("web.port", "port must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.upstream.base_url, "https://www.api-couleur-tempo.fr/api");
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.web.port, 8089);
        assert!(config.logging.console_output);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.upstream.base_url = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upstream.base_url = "ftp://example.org".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upstream.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.web.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let deserialized: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.upstream.base_url, deserialized.upstream.base_url);
        assert_eq!(config.web.port, deserialized.web.port);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("web:\n  port: 9000\n").unwrap();
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.upstream.timeout_secs, 10);
    }
}
