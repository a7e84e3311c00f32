// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository URL resolution.

use crate::error::{QvError, RemoteError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for https/http GitHub repository URLs.
    static ref HTTP_URL_REGEX: Regex = Regex::new(
        r"^https?://github\.com/(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?$"
    )
    .unwrap();

    /// Regex for ssh-style GitHub repository URLs.
    static ref SSH_URL_REGEX: Regex = Regex::new(
        r"^git@github\.com:(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?$"
    )
    .unwrap();
}

/// Resolve a GitHub repository URL into `(owner, repo)`.
///
/// Accepted forms:
/// - `https://github.com/OWNER/REPO[.git]`
/// - `http://github.com/OWNER/REPO[.git]`
/// - `git@github.com:OWNER/REPO[.git]`
pub fn parse_repo_url(url: &str) -> Result<(String, String)> {
    let captures = HTTP_URL_REGEX
        .captures(url)
        .or_else(|| SSH_URL_REGEX.captures(url))
        .ok_or_else(|| {
            QvError::Remote(RemoteError::InvalidRepoUrl {
                url: url.to_string(),
            })
        })?;

    Ok((captures["owner"].to_string(), captures["repo"].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url() {
        let (owner, repo) = parse_repo_url("https://github.com/acme/widgets").unwrap();
        assert_eq!(owner, "acme");
        assert_eq!(repo, "widgets");
    }

    #[test]
    fn test_https_url_with_git_suffix() {
        let (owner, repo) = parse_repo_url("https://github.com/acme/widgets.git").unwrap();
        assert_eq!(owner, "acme");
        assert_eq!(repo, "widgets");
    }

    #[test]
    fn test_http_url() {
        let (owner, repo) = parse_repo_url("http://github.com/acme/widgets").unwrap();
        assert_eq!(owner, "acme");
        assert_eq!(repo, "widgets");
    }

    #[test]
    fn test_ssh_url() {
        let (owner, repo) = parse_repo_url("git@github.com:acme/widgets.git").unwrap();
        assert_eq!(owner, "acme");
        assert_eq!(repo, "widgets");
    }

    #[test]
    fn test_repo_name_containing_dot() {
        let (_, repo) = parse_repo_url("https://github.com/acme/widgets.rs").unwrap();
        assert_eq!(repo, "widgets.rs");
    }

    #[test]
    fn test_extra_path_segment_fails() {
        assert!(parse_repo_url("https://github.com/acme/widgets/tree/main").is_err());
    }

    #[test]
    fn test_non_github_host_fails() {
        assert!(parse_repo_url("https://gitlab.com/acme/widgets").is_err());
        assert!(parse_repo_url("acme/widgets").is_err());
    }
}
