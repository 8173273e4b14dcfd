//! Configuration handling for drift_sync

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::{Error, Result};

/// Load configuration from a TOML file
pub fn load_from_file(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::ConfigError(format!("Failed to read config file: {}", e)))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    Ok(config)
}

/// Represents the complete drift_sync configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    pub tracker: TrackerConfig,
    pub logging: Option<LoggingConfig>,
}

/// Database connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub driver: String,
    pub url: String,
    pub pool_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
    pub schema: Option<String>,
}

/// Sizing knobs for the reconciliation engine
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SyncConfig {
    /// Source records fetched per page, ordered by primary key
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Keys embedded in a single target lookup
    #[serde(default = "default_lookup_batch_size")]
    pub lookup_batch_size: usize,
    /// Pending writes flushed together as one save operation
    #[serde(default = "default_save_group_size")]
    pub save_group_size: usize,
}

fn default_page_size() -> usize {
    500
}

fn default_lookup_batch_size() -> usize {
    100
}

fn default_save_group_size() -> usize {
    20
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            lookup_batch_size: default_lookup_batch_size(),
            save_group_size: default_save_group_size(),
        }
    }
}

/// Progress tracker state file configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrackerConfig {
    pub state_file: String,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: String,
    pub stdout: bool,
}
