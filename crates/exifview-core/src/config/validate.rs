//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::{Config, MAX_RESIZE_TARGET};

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.dir must not be empty".into(),
            ));
        }
        if !(1..=MAX_RESIZE_TARGET).contains(&self.resize.target) {
            return Err(ConfigError::ValidationError(format!(
                "resize.target must be between 1 and {MAX_RESIZE_TARGET}"
            )));
        }
        if !(1..=100).contains(&self.resize.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "resize.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.resize.filter_type().is_none() {
            return Err(ConfigError::ValidationError(format!(
                "resize.filter {:?} is not a known filter",
                self.resize.filter
            )));
        }
        if self.limits.max_upload_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_upload_size_mb must be > 0".into(),
            ));
        }
        Ok(())
    }
}
