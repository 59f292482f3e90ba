//! Configuration validation rules.
//!
//! Validation runs after values are loaded from environment, file, or
//! defaults.

use thiserror::Error;

use crate::config::CacheConfig;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl CacheConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cache_dir` is empty
    /// - `snapshot_file` is empty or contains a path separator
    /// - `evaluate_timeout_ms` is less than 100ms or exceeds 5 minutes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "cache_dir".into(), reason: "must not be empty".into() });
        }

        if self.snapshot_file.is_empty() {
            return Err(ConfigError::Invalid { field: "snapshot_file".into(), reason: "must not be empty".into() });
        }
        if self.snapshot_file.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "snapshot_file".into(),
                reason: "must be a bare file name, not a path".into(),
            });
        }

        if self.evaluate_timeout_ms < 100 {
            return Err(ConfigError::Invalid {
                field: "evaluate_timeout_ms".into(),
                reason: "must be at least 100ms".into(),
            });
        }
        if self.evaluate_timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "evaluate_timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_cache_dir_rejected() {
        let config = CacheConfig { cache_dir: "".into(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "cache_dir"));
    }

    #[test]
    fn test_snapshot_file_path_rejected() {
        let config = CacheConfig { snapshot_file: "nested/index.html".into(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "snapshot_file"));
    }

    #[test]
    fn test_timeout_bounds() {
        let too_low = CacheConfig { evaluate_timeout_ms: 50, ..Default::default() };
        assert!(too_low.validate().is_err());

        let too_high = CacheConfig { evaluate_timeout_ms: 600_000, ..Default::default() };
        assert!(too_high.validate().is_err());
    }
}
