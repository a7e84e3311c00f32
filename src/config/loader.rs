// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and writing.

use crate::error::{ConfigError, QvError, Result};
use std::path::{Path, PathBuf};

use super::schema::QvConfig;

/// The configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "qv.toml";

/// Path of the configuration file in the working directory.
pub fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

/// Load configuration from the default location.
pub fn load_config() -> Result<QvConfig> {
    load_config_from(&config_path())
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<QvConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(QvError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        QvError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<QvConfig> {
    toml::from_str(content).map_err(|e| {
        QvError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Write configuration to a path.
pub fn store_config(config: &QvConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| {
        QvError::Config(ConfigError::WriteFailed {
            message: e.to_string(),
        })
    })?;

    std::fs::write(path, content).map_err(|e| {
        QvError::Config(ConfigError::WriteFailed {
            message: e.to_string(),
        })
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.version.git_url.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[version]
git_url = "https://github.com/acme/widgets"
token = "ghp_example"

[build]
build_management = true

[storage]
db_path = "/var/lib/qv"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.version.git_url, "https://github.com/acme/widgets");
        assert_eq!(config.version.token.as_deref(), Some("ghp_example"));
        assert!(config.build.build_management);
        assert_eq!(
            config.storage.db_path.as_deref(),
            Some(std::path::Path::new("/var/lib/qv"))
        );
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(parse_config("[version\ngit_url = ").is_err());
    }

    #[test]
    fn test_store_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = QvConfig::default();
        config.version.git_url = "git@github.com:acme/widgets.git".to_string();
        config.build.build_management = true;

        store_config(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.version.git_url, "git@github.com:acme/widgets.git");
        assert!(loaded.version.token.is_none());
        assert!(loaded.build.build_management);
    }

    #[test]
    fn test_missing_config_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(err.to_string().contains("qv init"));
    }
}
