// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Request and response types for the GitHub REST API.

use serde::{Deserialize, Serialize};

/// A remote tag: name plus the commit SHA it points at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagRef {
    pub name: String,
    pub commit: CommitRef,
}

impl TagRef {
    /// The commit SHA this tag points at.
    pub fn sha(&self) -> &str {
        &self.commit.sha
    }

    #[cfg(test)]
    pub fn new(name: &str, sha: &str) -> Self {
        Self {
            name: name.to_string(),
            commit: CommitRef {
                sha: sha.to_string(),
            },
        }
    }
}

/// The commit object nested inside tag and branch responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// A created pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub url: String,
    pub title: String,
}

/// `GET /repos/{owner}/{repo}/commits/{ref}` response (fields we use).
#[derive(Debug, Deserialize)]
pub(super) struct CommitResponse {
    pub sha: String,
}

/// `POST /repos/{owner}/{repo}/git/tags` request body.
#[derive(Debug, Serialize)]
pub(super) struct CreateTagRequest<'a> {
    pub tag: &'a str,
    pub message: &'a str,
    pub object: &'a str,
    pub r#type: &'a str,
}

/// `POST /repos/{owner}/{repo}/git/tags` response (fields we use).
#[derive(Debug, Deserialize)]
pub(super) struct TagObjectResponse {
    pub sha: String,
}

/// `POST /repos/{owner}/{repo}/git/refs` request body.
#[derive(Debug, Serialize)]
pub(super) struct CreateRefRequest<'a> {
    pub r#ref: String,
    pub sha: &'a str,
}

/// `POST /repos/{owner}/{repo}/pulls` request body.
#[derive(Debug, Serialize)]
pub(super) struct CreatePullRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub head: &'a str,
    pub base: &'a str,
}

/// `POST /repos/{owner}/{repo}/pulls` response (fields we use).
#[derive(Debug, Deserialize)]
pub(super) struct PullRequestResponse {
    pub number: u64,
    pub html_url: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_ref_deserializes_github_shape() {
        let json = r#"{"name": "v1.0.0", "commit": {"sha": "abc123", "url": "ignored"}}"#;
        let tag: TagRef = serde_json::from_str(json).unwrap();
        assert_eq!(tag.name, "v1.0.0");
        assert_eq!(tag.sha(), "abc123");
    }
}
