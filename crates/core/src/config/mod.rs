//! Cache configuration with layered loading.
//!
//! Loading precedence (highest wins):
//! 1. Environment variables (COLDSTART_*)
//! 2. TOML config file (if COLDSTART_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Configuration for one cache directory and the session round-trips that
/// feed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory for this logical client.
    ///
    /// Set via COLDSTART_CACHE_DIR environment variable.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// File name for the markup snapshot inside the cache directory.
    ///
    /// Set via COLDSTART_SNAPSHOT_FILE environment variable.
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,

    /// Timeout for live-session evaluate round-trips in milliseconds.
    ///
    /// Set via COLDSTART_EVALUATE_TIMEOUT_MS environment variable.
    #[serde(default = "default_evaluate_timeout_ms")]
    pub evaluate_timeout_ms: u64,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./.coldstart-cache")
}

fn default_snapshot_file() -> String {
    crate::store::dir::SNAPSHOT_FILE.to_string()
}

fn default_evaluate_timeout_ms() -> u64 {
    30_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            snapshot_file: default_snapshot_file(),
            evaluate_timeout_ms: default_evaluate_timeout_ms(),
        }
    }
}

impl CacheConfig {
    /// Evaluate timeout as a Duration for use with tokio.
    pub fn evaluate_timeout(&self) -> Duration {
        Duration::from_millis(self.evaluate_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, environment
    /// variables cannot be parsed, or validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("COLDSTART_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("COLDSTART_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
