// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the qv application.
//!
//! This module defines all error types used throughout the application,
//! with proper error categorization and context propagation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for qv operations.
#[derive(Error, Debug)]
pub enum QvError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Version parsing errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    // Flag/argument usage errors
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    // Ledger storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // Plan artifact errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    // GitHub API errors
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    // Local git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // User cancelled operation
    #[error("Operation cancelled by user")]
    Cancelled,
}

impl From<dialoguer::Error> for QvError {
    fn from(err: dialoguer::Error) -> Self {
        QvError::Ui(err.to_string())
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}. Run 'qv init' first")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("git_url not configured. Run 'qv init' first")]
    MissingGitUrl,

    #[error("Failed to write configuration: {message}")]
    WriteFailed { message: String },
}

/// Version-parsing errors.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version format: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid {component} version: {value}")]
    InvalidComponent { component: String, value: String },
}

/// Flag/argument usage errors.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Cannot use both --major and --patch flags")]
    ConflictingIncrements,
}

/// Ledger storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database not found. Run 'qv init' first")]
    NotInitialized,

    #[error("Failed to open database: {message}")]
    OpenFailed { message: String },

    #[error("Failed to create schema: {message}")]
    SchemaFailed { message: String },

    #[error("Version {version} already recorded for {git_url}")]
    Duplicate { git_url: String, version: String },

    #[error("Database query failed: {message}")]
    QueryFailed { message: String },
}

/// Plan artifact errors.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("{path} not found. Run 'qv plan' first")]
    NotFound { path: PathBuf },

    #[error("Failed to parse plan file: {message}")]
    ParseError { message: String },

    #[error("Failed to write plan file: {message}")]
    WriteFailed { message: String },
}

/// GitHub API errors.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Invalid GitHub repository URL: {url}")]
    InvalidRepoUrl { url: String },

    #[error("GitHub token cannot be empty")]
    EmptyToken,

    #[error("GitHub request failed: {operation} - {message}")]
    RequestFailed { operation: String, message: String },

    #[error("GitHub API returned {status} for {operation}: {message}")]
    ApiStatus {
        status: u16,
        operation: String,
        message: String,
    },
}

impl RemoteError {
    /// Wrap a transport error with the operation that was attempted.
    pub fn request(operation: impl Into<String>, err: reqwest::Error) -> Self {
        RemoteError::RequestFailed {
            operation: operation.into(),
            message: err.to_string(),
        }
    }
}

/// Local git errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Failed to get branch: {message}")]
    BranchFailed { message: String },

    #[error("Detached HEAD state")]
    DetachedHead,

    #[error("Cannot create PR from {branch} to {branch}")]
    SameBranch { branch: String },
}

/// Result type alias for qv operations.
pub type Result<T> = std::result::Result<T, QvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/qv.toml"),
        };
        assert!(err.to_string().contains("/path/to/qv.toml"));
        assert!(err.to_string().contains("qv init"));
    }

    #[test]
    fn test_version_error_names_component() {
        let err = VersionError::InvalidComponent {
            component: "minor".to_string(),
            value: "x".to_string(),
        };
        assert!(err.to_string().contains("minor"));
        assert!(err.to_string().contains("x"));
    }

    #[test]
    fn test_duplicate_error_display() {
        let err = StorageError::Duplicate {
            git_url: "https://github.com/a/b".to_string(),
            version: "1.0.0".to_string(),
        };
        assert!(err.to_string().contains("1.0.0"));
        assert!(err.to_string().contains("https://github.com/a/b"));
    }

    #[test]
    fn test_qv_error_from_usage_error() {
        let qv_err: QvError = UsageError::ConflictingIncrements.into();
        assert!(qv_err.to_string().contains("--major"));
        assert!(qv_err.to_string().contains("--patch"));
    }

    #[test]
    fn test_remote_error_carries_status() {
        let err = RemoteError::ApiStatus {
            status: 422,
            operation: "create tag".to_string(),
            message: "Reference already exists".to_string(),
        };
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("create tag"));
    }
}
