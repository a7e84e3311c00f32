// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Tag reconciliation.
//!
//! Three-way comparison between the ledger's records for a repository and
//! the remote tag list: tags only on the remote, tags only in the ledger,
//! and tags present in both whose SHAs disagree. Remote-only tags can be
//! merged back into the ledger; the other two classes are reported but
//! never auto-resolved.

use crate::error::Result;
use crate::github::TagRef;
use crate::ledger::{Ledger, NewVersion, VersionRecord};
use std::collections::HashMap;

/// Classified differences between remote tags and ledger records.
///
/// Each list is sorted by tag name so reports and tests are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discrepancies {
    /// Tags present remotely but absent from the ledger.
    pub remote_only: Vec<String>,
    /// Tags recorded locally but absent from the remote.
    pub local_only: Vec<String>,
    /// Tags present on both sides with differing SHAs.
    pub mismatched: Vec<String>,
}

impl Discrepancies {
    /// Whether the ledger and the remote agree completely.
    pub fn in_sync(&self) -> bool {
        self.remote_only.is_empty() && self.local_only.is_empty() && self.mismatched.is_empty()
    }
}

/// The per-tag outcome of a reconciliation merge.
#[derive(Debug)]
pub struct MergeOutcome {
    pub tag_name: String,
    pub result: Result<()>,
}

/// Compare remote tags against ledger records for one repository.
pub fn classify(remote_tags: &[TagRef], local_records: &[VersionRecord]) -> Discrepancies {
    let remote_map: HashMap<&str, &str> = remote_tags
        .iter()
        .map(|tag| (tag.name.as_str(), tag.sha()))
        .collect();

    let local_map: HashMap<&str, &str> = local_records
        .iter()
        .map(|record| (record.tag_name.as_str(), record.git_sha.as_str()))
        .collect();

    let mut discrepancies = Discrepancies::default();

    for (tag_name, remote_sha) in &remote_map {
        match local_map.get(tag_name) {
            None => discrepancies.remote_only.push(tag_name.to_string()),
            Some(local_sha) if local_sha != remote_sha => {
                discrepancies.mismatched.push(tag_name.to_string());
            }
            Some(_) => {}
        }
    }

    for tag_name in local_map.keys() {
        if !remote_map.contains_key(tag_name) {
            discrepancies.local_only.push(tag_name.to_string());
        }
    }

    discrepancies.remote_only.sort();
    discrepancies.local_only.sort();
    discrepancies.mismatched.sort();

    discrepancies
}

/// Merge remote-only tags into the ledger.
///
/// Version text is the tag name with a leading `v` stripped; merged records
/// carry no increment type. Failures are collected per tag and do not abort
/// the remaining merges.
pub fn merge_remote_only(
    ledger: &Ledger,
    git_url: &str,
    remote_tags: &[TagRef],
    remote_only: &[String],
) -> Vec<MergeOutcome> {
    let remote_map: HashMap<&str, &str> = remote_tags
        .iter()
        .map(|tag| (tag.name.as_str(), tag.sha()))
        .collect();

    remote_only
        .iter()
        .map(|tag_name| {
            let version = tag_name.strip_prefix('v').unwrap_or(tag_name);
            let result = match remote_map.get(tag_name.as_str()) {
                Some(sha) => ledger.insert_version(&NewVersion {
                    version,
                    tag_name,
                    git_sha: sha,
                    git_url,
                    increment_type: None,
                }),
                // Caller passed a tag that is not in the remote list
                None => Ok(()),
            };
            MergeOutcome {
                tag_name: tag_name.clone(),
                result,
            }
        })
        .collect()
}
