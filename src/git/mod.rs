// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Local git integration.
//!
//! qv only needs to know which branch the working directory is on; every
//! other git operation happens on the remote through the GitHub API.

use crate::error::{GitError, QvError, Result};
use git2::Repository;

/// The current branch name of the repository enclosing the working
/// directory.
pub fn current_branch() -> Result<String> {
    let current_dir = std::env::current_dir().map_err(|e| {
        QvError::Git(GitError::OpenFailed {
            message: format!("Failed to get current directory: {}", e),
        })
    })?;

    let repo = Repository::discover(&current_dir).map_err(|e| {
        if e.code() == git2::ErrorCode::NotFound {
            QvError::Git(GitError::NotARepository)
        } else {
            QvError::Git(GitError::OpenFailed {
                message: e.message().to_string(),
            })
        }
    })?;

    let head = repo.head().map_err(|e| {
        if e.code() == git2::ErrorCode::UnbornBranch {
            QvError::Git(GitError::DetachedHead)
        } else {
            QvError::Git(GitError::BranchFailed {
                message: e.message().to_string(),
            })
        }
    })?;

    if head.is_branch() {
        let name = head.shorthand().ok_or_else(|| {
            QvError::Git(GitError::BranchFailed {
                message: "Invalid branch name encoding".to_string(),
            })
        })?;
        Ok(name.to_string())
    } else {
        Err(QvError::Git(GitError::DetachedHead))
    }
}
