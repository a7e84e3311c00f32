// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! GitHub REST client.
//!
//! Synchronous (blocking) client: qv performs one remote operation at a
//! time and carries no async runtime for it.

use crate::config::QvConfig;
use crate::error::{QvError, RemoteError, Result};
use dialoguer::{theme::ColorfulTheme, Password};
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;

use super::types::{
    CommitResponse, CreatePullRequest, CreateRefRequest, CreateTagRequest, PullRequest,
    PullRequestResponse, TagObjectResponse, TagRef,
};

/// GitHub REST API root.
const API_ROOT: &str = "https://api.github.com";

/// Request timeout for API calls.
const TIMEOUT_SECS: u64 = 30;

/// Tags fetched per page when listing.
const TAGS_PER_PAGE: usize = 100;

/// Authenticated GitHub API client.
pub struct GitHubClient {
    http: Client,
    token: String,
    api_root: String,
}

impl GitHubClient {
    /// Create a client, resolving the token from the environment, the
    /// configuration, or an interactive prompt.
    pub fn new(config: &QvConfig) -> Result<Self> {
        let token = resolve_token(config)?;
        Self::with_token(token)
    }

    /// Create a client with an explicit token.
    pub fn with_token(token: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(concat!("qv/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QvError::Remote(RemoteError::request("build client", e)))?;

        Ok(Self {
            http,
            token,
            api_root: API_ROOT.to_string(),
        })
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
    }

    /// Fail on non-success statuses, carrying the operation and response
    /// body for diagnosis.
    fn check(&self, response: Response, operation: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .unwrap_or_else(|_| "<unreadable response body>".to_string());
        Err(QvError::Remote(RemoteError::ApiStatus {
            status: status.as_u16(),
            operation: operation.to_string(),
            message,
        }))
    }

    /// The latest commit SHA on a branch.
    pub fn latest_commit_sha(&self, owner: &str, repo: &str, branch: &str) -> Result<String> {
        let operation = "get latest commit";
        let url = format!("{}/repos/{}/{}/commits/{}", self.api_root, owner, repo, branch);

        let response = self
            .authed(self.http.get(&url))
            .send()
            .map_err(|e| QvError::Remote(RemoteError::request(operation, e)))?;

        let commit: CommitResponse = self
            .check(response, operation)?
            .json()
            .map_err(|e| QvError::Remote(RemoteError::request(operation, e)))?;

        Ok(commit.sha)
    }

    /// Create an annotated tag pointing at a commit.
    ///
    /// Two calls: create the tag object, then the ref that makes it
    /// reachable.
    pub fn create_tag(
        &self,
        owner: &str,
        repo: &str,
        tag_name: &str,
        sha: &str,
        message: &str,
    ) -> Result<()> {
        let operation = "create tag object";
        let url = format!("{}/repos/{}/{}/git/tags", self.api_root, owner, repo);
        let body = CreateTagRequest {
            tag: tag_name,
            message,
            object: sha,
            r#type: "commit",
        };

        let response = self
            .authed(self.http.post(&url))
            .json(&body)
            .send()
            .map_err(|e| QvError::Remote(RemoteError::request(operation, e)))?;

        let tag_object: TagObjectResponse = self
            .check(response, operation)?
            .json()
            .map_err(|e| QvError::Remote(RemoteError::request(operation, e)))?;

        let operation = "create tag ref";
        let url = format!("{}/repos/{}/{}/git/refs", self.api_root, owner, repo);
        let body = CreateRefRequest {
            r#ref: format!("refs/tags/{}", tag_name),
            sha: &tag_object.sha,
        };

        let response = self
            .authed(self.http.post(&url))
            .json(&body)
            .send()
            .map_err(|e| QvError::Remote(RemoteError::request(operation, e)))?;
        self.check(response, operation)?;

        Ok(())
    }

    /// All tags of a repository, following pagination.
    pub fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<TagRef>> {
        let operation = "list tags";
        let url = format!("{}/repos/{}/{}/tags", self.api_root, owner, repo);

        let mut tags = Vec::new();
        let mut page = 1usize;
        loop {
            let response = self
                .authed(self.http.get(&url))
                .query(&[("per_page", TAGS_PER_PAGE.to_string()), ("page", page.to_string())])
                .send()
                .map_err(|e| QvError::Remote(RemoteError::request(operation, e)))?;

            let batch: Vec<TagRef> = self
                .check(response, operation)?
                .json()
                .map_err(|e| QvError::Remote(RemoteError::request(operation, e)))?;

            let done = batch.len() < TAGS_PER_PAGE;
            tags.extend(batch);
            if done {
                break;
            }
            page += 1;
        }

        Ok(tags)
    }

    /// Open a pull request.
    pub fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest> {
        let operation = "create pull request";
        let url = format!("{}/repos/{}/{}/pulls", self.api_root, owner, repo);
        let request = CreatePullRequest {
            title,
            body,
            head,
            base,
        };

        let response = self
            .authed(self.http.post(&url))
            .json(&request)
            .send()
            .map_err(|e| QvError::Remote(RemoteError::request(operation, e)))?;

        let pr: PullRequestResponse = self
            .check(response, operation)?
            .json()
            .map_err(|e| QvError::Remote(RemoteError::request(operation, e)))?;

        Ok(PullRequest {
            number: pr.number,
            url: pr.html_url,
            title: pr.title,
        })
    }
}

/// Resolve the GitHub token: `GITHUB_TOKEN` environment variable, then the
/// configuration file, then an interactive prompt. First non-empty wins.
pub fn resolve_token(config: &QvConfig) -> Result<String> {
    if let Ok(token) = std::env::var("GITHUB_TOKEN") {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    if let Some(token) = &config.version.token {
        if !token.is_empty() {
            return Ok(token.clone());
        }
    }

    prompt_for_token()
}

fn prompt_for_token() -> Result<String> {
    let token = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("GitHub token")
        .allow_empty_password(true)
        .interact()?;

    if token.trim().is_empty() {
        return Err(QvError::Remote(RemoteError::EmptyToken));
    }

    Ok(token.trim().to_string())
}
