// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Version bump plans.
//!
//! A plan is a transient, file-resident proposal for the next version. It is
//! created by `qv plan`, consumed (and deleted) by `qv deploy`, and read by
//! `qv pr` and `qv status`. At most one plan exists at a time: writing a new
//! one silently replaces any undeployed predecessor.

use crate::error::{PlanError, QvError, Result};
use crate::ledger::Ledger;
use crate::semver::{self, IncrementKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The plan artifact file name, in the working directory.
pub const PLAN_FILE: &str = "plan.toml";

/// Path of the plan artifact in the working directory.
pub fn plan_path() -> PathBuf {
    PathBuf::from(PLAN_FILE)
}

/// A pending version bump proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub git_url: String,
    pub current_version: String,
    pub next_version: String,
    pub increment_type: String,
}

impl Plan {
    /// Build a plan from the ledger's latest version for a repository.
    ///
    /// With no usable history the current version is `0.0.0` and the next
    /// version comes from the fixed bootstrap table, not from incrementing
    /// zero.
    pub fn build(ledger: &Ledger, git_url: &str, kind: IncrementKind) -> Result<Self> {
        let (current_version, next_version) = match ledger.latest_version(git_url)? {
            None => (
                "0.0.0".to_string(),
                semver::initial(kind).to_string(),
            ),
            Some(latest) => {
                let next = semver::increment(&latest.version, kind);
                (latest.version, next)
            }
        };

        Ok(Self {
            git_url: git_url.to_string(),
            current_version,
            next_version,
            increment_type: kind.as_str().to_string(),
        })
    }

    /// The tag name this plan would create.
    pub fn tag_name(&self) -> String {
        format!("v{}", self.next_version)
    }

    /// Whether a plan artifact exists at the default location.
    pub fn exists() -> bool {
        plan_path().exists()
    }

    /// Load the plan artifact from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&plan_path())
    }

    /// Load a plan artifact from a path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(QvError::Plan(PlanError::NotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            QvError::Plan(PlanError::ParseError {
                message: format!("Failed to read plan file: {}", e),
            })
        })?;

        toml::from_str(&content).map_err(|e| {
            QvError::Plan(PlanError::ParseError {
                message: e.to_string(),
            })
        })
    }

    /// Write the plan artifact to the default location, replacing any
    /// existing plan.
    pub fn store(&self) -> Result<()> {
        self.store_to(&plan_path())
    }

    /// Write the plan artifact to a path.
    pub fn store_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            QvError::Plan(PlanError::WriteFailed {
                message: e.to_string(),
            })
        })?;

        std::fs::write(path, content).map_err(|e| {
            QvError::Plan(PlanError::WriteFailed {
                message: e.to_string(),
            })
        })
    }

    /// Delete the plan artifact at the default location.
    pub fn delete() -> std::io::Result<()> {
        std::fs::remove_file(plan_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewVersion;

    const URL: &str = "https://github.com/acme/widgets";

    fn ledger_with(versions: &[&str]) -> Ledger {
        let ledger = Ledger::open_in_memory().unwrap();
        for (i, version) in versions.iter().enumerate() {
            let tag = format!("v{}", version);
            ledger
                .insert_version(&NewVersion {
                    version,
                    tag_name: &tag,
                    git_sha: &format!("sha{}", i),
                    git_url: URL,
                    increment_type: Some("minor"),
                })
                .unwrap();
        }
        ledger
    }

    #[test]
    fn test_bootstrap_plan_uses_fixed_table() {
        let ledger = ledger_with(&[]);

        let plan = Plan::build(&ledger, URL, IncrementKind::Major).unwrap();
        assert_eq!(plan.current_version, "0.0.0");
        assert_eq!(plan.next_version, "1.0.0");

        let plan = Plan::build(&ledger, URL, IncrementKind::Minor).unwrap();
        assert_eq!(plan.next_version, "0.1.0");

        let plan = Plan::build(&ledger, URL, IncrementKind::Patch).unwrap();
        assert_eq!(plan.next_version, "0.0.1");
        assert_eq!(plan.increment_type, "patch");
    }

    #[test]
    fn test_plan_increments_latest() {
        let ledger = ledger_with(&["1.0.0", "1.2.3"]);

        let plan = Plan::build(&ledger, URL, IncrementKind::Minor).unwrap();
        assert_eq!(plan.current_version, "1.2.3");
        assert_eq!(plan.next_version, "1.3.0");

        let plan = Plan::build(&ledger, URL, IncrementKind::Major).unwrap();
        assert_eq!(plan.next_version, "2.0.0");

        let plan = Plan::build(&ledger, URL, IncrementKind::Patch).unwrap();
        assert_eq!(plan.next_version, "1.2.4");
    }

    #[test]
    fn test_plan_uses_semver_latest_not_newest_row() {
        // 1.10.0 arrives after 1.9.0 via reconciliation; it is still latest
        let ledger = ledger_with(&["1.10.0", "1.9.0"]);

        let plan = Plan::build(&ledger, URL, IncrementKind::Minor).unwrap();
        assert_eq!(plan.current_version, "1.10.0");
        assert_eq!(plan.next_version, "1.11.0");
    }

    #[test]
    fn test_tag_name() {
        let ledger = ledger_with(&["0.1.0"]);
        let plan = Plan::build(&ledger, URL, IncrementKind::Minor).unwrap();
        assert_eq!(plan.tag_name(), "v0.2.0");
    }

    #[test]
    fn test_artifact_round_trip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PLAN_FILE);

        let first = Plan {
            git_url: URL.to_string(),
            current_version: "1.0.0".to_string(),
            next_version: "1.1.0".to_string(),
            increment_type: "minor".to_string(),
        };
        first.store_to(&path).unwrap();
        assert_eq!(Plan::load_from(&path).unwrap(), first);

        // A newer plan silently replaces the old one
        let second = Plan {
            next_version: "2.0.0".to_string(),
            increment_type: "major".to_string(),
            ..first.clone()
        };
        second.store_to(&path).unwrap();
        assert_eq!(Plan::load_from(&path).unwrap(), second);
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Plan::load_from(&dir.path().join(PLAN_FILE)).unwrap_err();
        assert!(err.to_string().contains("qv plan"));
    }
}
