//! Configuration for MailTrust
//!
//! The authenticity decision table is fixed and has no configuration of its
//! own. What is configurable here is the ambient runtime: logging and the
//! batch scanner's resource limits.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Batch scan configuration
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "json" or "text"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Batch scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum number of chunks evaluated at the same time
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,

    /// Number of messages evaluated per blocking task
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: default_concurrency_limit(),
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_concurrency_limit() -> usize {
    4
}

fn default_chunk_size() -> usize {
    256
}

impl Config {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from the default locations, falling back to
    /// built-in defaults when no file exists
    pub fn load() -> crate::Result<Self> {
        let paths = [
            PathBuf::from("./mailtrust.toml"),
            PathBuf::from("/etc/mailtrust/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    fn validate(&self) -> crate::Result<()> {
        if self.scan.concurrency_limit == 0 {
            return Err(crate::Error::Config(
                "scan.concurrency_limit must be at least 1".to_string(),
            ));
        }
        if self.scan.chunk_size == 0 {
            return Err(crate::Error::Config(
                "scan.chunk_size must be at least 1".to_string(),
            ));
        }
        match self.logging.format.as_str() {
            "json" | "text" => Ok(()),
            other => Err(crate::Error::Config(format!(
                "Unknown logging.format: {}",
                other
            ))),
        }
    }
}
