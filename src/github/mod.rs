// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! GitHub integration module.
//!
//! A thin, synchronous REST client plus repository-URL resolution. All
//! network effects of qv go through [`GitHubClient`].

mod client;
mod types;
mod url;

pub use client::{resolve_token, GitHubClient};
pub use types::{PullRequest, TagRef};
pub use url::parse_repo_url;
