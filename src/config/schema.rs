// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structures loaded from qv.toml. The configuration is built
//! once at startup and passed by reference into each component; there is no
//! process-wide accessor.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The main configuration structure for qv.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QvConfig {
    /// Versioning settings.
    pub version: VersionSettings,

    /// Build settings.
    pub build: BuildSettings,

    /// Storage settings.
    pub storage: StorageSettings,
}

impl QvConfig {
    /// Load configuration from the default location.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// The configured repository URL, or an error telling the user to init.
    pub fn git_url(&self) -> crate::error::Result<&str> {
        if self.version.git_url.is_empty() {
            return Err(crate::error::ConfigError::MissingGitUrl.into());
        }
        Ok(&self.version.git_url)
    }
}

/// Versioning settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VersionSettings {
    /// The GitHub repository URL all versions are scoped to.
    pub git_url: String,

    /// GitHub token. Optional; the environment variable and interactive
    /// prompt are the other sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BuildSettings {
    /// Whether container build management is enabled.
    pub build_management: bool,
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding qv.db. Defaults to the current directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QvConfig::default();
        assert!(config.version.git_url.is_empty());
        assert!(config.version.token.is_none());
        assert!(!config.build.build_management);
        assert!(config.storage.db_path.is_none());
    }

    #[test]
    fn test_git_url_required() {
        let config = QvConfig::default();
        assert!(config.git_url().is_err());

        let mut config = QvConfig::default();
        config.version.git_url = "https://github.com/acme/widgets".to_string();
        assert_eq!(config.git_url().unwrap(), "https://github.com/acme/widgets");
    }
}
