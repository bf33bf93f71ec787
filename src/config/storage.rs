//! Local storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the preference record is kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the record file
    #[serde(default = "default_dir")]
    pub dir: String,
}

impl StorageConfig {
    /// Directory as a path
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(self.dir.trim())
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dir.trim().is_empty() {
            return Err(ValidationError::EmptyStorageDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

fn default_dir() -> String {
    ".reply-coach".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.dir, ".reply-coach");
        assert_eq!(config.dir_path(), PathBuf::from(".reply-coach"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_dir_is_rejected() {
        let config = StorageConfig { dir: "  ".into() };
        assert_eq!(config.validate(), Err(ValidationError::EmptyStorageDir));
    }
}
