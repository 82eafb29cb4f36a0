//! Archive and session storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON Lines file receiving delivered scripts
    #[serde(default = "default_archive_path")]
    pub archive_path: PathBuf,

    /// Directory for session files; sessions stay in memory when unset
    pub sessions_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.archive_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__ARCHIVE_PATH"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            archive_path: default_archive_path(),
            sessions_dir: None,
        }
    }
}

fn default_archive_path() -> PathBuf {
    PathBuf::from("data/archive.jsonl")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_sessions_in_memory() {
        let config = StorageConfig::default();
        assert_eq!(config.archive_path, PathBuf::from("data/archive.jsonl"));
        assert!(config.sessions_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_archive_path_is_rejected() {
        let config = StorageConfig {
            archive_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
