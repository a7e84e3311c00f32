// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! QV - Semantic Version Release Manager
//!
//! A CLI tool for planning, recording, and publishing semantic-version
//! releases of GitHub-hosted repositories.
//!
//! # Features
//!
//! - **Version Planning**: Compute the next major/minor/patch version from
//!   recorded history and stage it as a reviewable plan artifact
//! - **Version Ledger**: Durable SQLite history of every deployed version,
//!   scoped by repository
//! - **Deploy**: Create the release tag on GitHub and record it locally
//! - **Reconciliation**: Compare the ledger against remote tags and merge
//!   back anything the ledger is missing
//! - **Pull Requests**: Open a release PR annotated with the pending bump
//!
//! # Example
//!
//! ```no_run
//! use qv::config::QvConfig;
//! use qv::ledger::Ledger;
//! use qv::plan::Plan;
//! use qv::semver::IncrementKind;
//!
//! // Load configuration and open the ledger
//! let config = QvConfig::load().unwrap();
//! let ledger = Ledger::open(&config).unwrap();
//!
//! // Propose the next minor version
//! let plan = Plan::build(&ledger, &config.version.git_url, IncrementKind::Minor).unwrap();
//! println!("next version: {}", plan.next_version);
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod git;
pub mod github;
pub mod ledger;
pub mod plan;
pub mod semver;
pub mod vet;

// Re-exports for convenience
pub use config::QvConfig;
pub use error::{QvError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of qv.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
