use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use syllabus_sync::RetryPolicy;

pub const DEFAULT_CONFIG_NAME: &str = "syllabus.config.json";

/// Syllabus configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Course outline file the commands operate on
    #[serde(default = "default_outline_file")]
    pub outline_file: String,

    /// Persistence behavior for committed orders
    #[serde(default)]
    pub save: SaveOptions,
}

fn default_outline_file() -> String {
    "course.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOptions {
    /// Attempts per save, first try included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay in milliseconds before the second attempt; doubles afterwards
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// File the save envelope is written to after a reorder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emit_path: Option<String>,
}

fn default_max_attempts() -> u32 {
    4
}

fn default_backoff_ms() -> u64 {
    250
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the course outline file
    pub fn outline_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.outline_file)
    }
}

impl SaveOptions {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outline_file: default_outline_file(),
            save: SaveOptions::default(),
        }
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            emit_path: None,
        }
    }
}
