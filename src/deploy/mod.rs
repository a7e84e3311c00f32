// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Deploy orchestration.
//!
//! Consumes the pending plan: creates the release tag on GitHub, records
//! the new version in the ledger, and retires the plan artifact. The steps
//! are sequential and non-transactional; a failure after the remote tag
//! exists leaves the plan in place and the tag unrecorded locally, which
//! `qv vet` detects and repairs.

use crate::config::QvConfig;
use crate::error::Result;
use crate::github::{parse_repo_url, GitHubClient};
use crate::ledger::{Ledger, NewVersion};
use crate::plan::Plan;

/// Summary of a successful deploy.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub version: String,
    pub tag_name: String,
    pub sha: String,
    /// Set when the plan artifact could not be removed afterwards.
    pub cleanup_warning: Option<String>,
}

/// Execute a plan against the given branch.
pub fn execute(
    config: &QvConfig,
    ledger: &Ledger,
    client: &GitHubClient,
    plan: &Plan,
    branch: &str,
) -> Result<DeployOutcome> {
    let git_url = config.git_url()?;
    let (owner, repo) = parse_repo_url(git_url)?;

    tracing::debug!("Deploying {} to {}/{}", plan.next_version, owner, repo);

    let sha = client.latest_commit_sha(&owner, &repo, branch)?;

    let tag_name = plan.tag_name();
    let tag_message = format!("Release {}", tag_name);
    client.create_tag(&owner, &repo, &tag_name, &sha, &tag_message)?;

    if config.build.build_management {
        // Container builds are a configuration surface without an engine yet
        tracing::info!("Build management is enabled (container build integration not yet implemented)");
    }

    // Fatal on failure: the plan stays on disk and the tag stays
    // unrecorded until a vet run merges it back.
    ledger.insert_version(&NewVersion {
        version: &plan.next_version,
        tag_name: &tag_name,
        git_sha: &sha,
        git_url,
        increment_type: Some(&plan.increment_type),
    })?;

    let cleanup_warning = match Plan::delete() {
        Ok(()) => None,
        Err(e) => {
            let warning = format!("Failed to delete {}: {}", crate::plan::PLAN_FILE, e);
            tracing::warn!("{}", warning);
            Some(warning)
        }
    };

    Ok(DeployOutcome {
        version: plan.next_version.clone(),
        tag_name,
        sha,
        cleanup_warning,
    })
}
