// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Ledger storage operations.

use crate::config::QvConfig;
use crate::error::{QvError, Result, StorageError};
use crate::semver::SemanticVersion;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

use super::schema;

/// The ledger database file name.
pub const DB_FILE: &str = "qv.db";

/// A recorded deployment of a specific version for a repository.
///
/// Records are append-only: they are created on deploy or reconciliation
/// and never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub id: i64,
    pub version: String,
    pub tag_name: String,
    pub git_sha: String,
    pub git_url: String,
    /// "major"/"minor"/"patch" for planned deploys; `None` for records
    /// merged back from remote tags.
    pub increment_type: Option<String>,
    pub created_at: String,
}

/// Fields for a version record about to be inserted.
#[derive(Debug, Clone)]
pub struct NewVersion<'a> {
    pub version: &'a str,
    pub tag_name: &'a str,
    pub git_sha: &'a str,
    pub git_url: &'a str,
    pub increment_type: Option<&'a str>,
}

/// The singleton sync-state row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncState {
    pub last_synced_at: Option<String>,
    pub git_url: String,
}

/// Path of the ledger database file for the given configuration.
pub fn db_path(config: &QvConfig) -> PathBuf {
    match &config.storage.db_path {
        Some(dir) => dir.join(DB_FILE),
        None => PathBuf::from(DB_FILE),
    }
}

/// Handle to the version ledger.
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Whether the ledger database file exists at its configured location.
    pub fn exists(config: &QvConfig) -> bool {
        db_path(config).exists()
    }

    /// Open (or create) the ledger database file.
    ///
    /// Does not create the schema; see [`Ledger::initialize`].
    pub fn open(config: &QvConfig) -> Result<Self> {
        let path = db_path(config);

        // Ensure the directory exists when a custom path is configured
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    QvError::Storage(StorageError::OpenFailed {
                        message: format!("Failed to create database directory: {}", e),
                    })
                })?;
            }
        }

        let conn = Connection::open(&path).map_err(|e| {
            QvError::Storage(StorageError::OpenFailed {
                message: e.to_string(),
            })
        })?;

        Ok(Self { conn })
    }

    /// Create an in-memory ledger (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            QvError::Storage(StorageError::OpenFailed {
                message: e.to_string(),
            })
        })?;
        let ledger = Self { conn };
        ledger.initialize()?;
        Ok(ledger)
    }

    /// Create the ledger schema. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        schema::init_schema(&self.conn)
    }

    /// Upsert the singleton sync-state row with the given URL and the
    /// current timestamp.
    pub fn set_sync_state(&self, git_url: &str) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn
            .execute(
                r#"
                INSERT INTO config_state (id, git_url, last_synced_at)
                VALUES (1, ?1, ?2)
                ON CONFLICT(id) DO UPDATE SET git_url = ?1, last_synced_at = ?2
                "#,
                params![git_url, now],
            )
            .map_err(query_err)?;
        Ok(())
    }

    /// Read the singleton sync-state row, if set.
    pub fn sync_state(&self) -> Result<Option<SyncState>> {
        self.conn
            .query_row(
                "SELECT last_synced_at, git_url FROM config_state WHERE id = 1",
                [],
                |row| {
                    Ok(SyncState {
                        last_synced_at: row.get(0)?,
                        git_url: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(query_err)
    }

    /// Append a version record.
    ///
    /// Fails with a duplicate error when (git_url, version) is already
    /// recorded.
    pub fn insert_version(&self, v: &NewVersion<'_>) -> Result<()> {
        let result = self.conn.execute(
            r#"
            INSERT INTO versions (version, tag_name, git_sha, git_url, increment_type)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![v.version, v.tag_name, v.git_sha, v.git_url, v.increment_type],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(QvError::Storage(StorageError::Duplicate {
                    git_url: v.git_url.to_string(),
                    version: v.version.to_string(),
                }))
            }
            Err(e) => Err(query_err(e)),
        }
    }

    /// All records for a repository, most recent first.
    pub fn all_versions(&self, git_url: &str) -> Result<Vec<VersionRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT id, version, tag_name, git_sha, git_url, increment_type, created_at
                FROM versions
                WHERE git_url = ?1
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .map_err(query_err)?;

        let rows = stmt
            .query_map(params![git_url], |row| {
                Ok(VersionRecord {
                    id: row.get(0)?,
                    version: row.get(1)?,
                    tag_name: row.get(2)?,
                    git_sha: row.get(3)?,
                    git_url: row.get(4)?,
                    increment_type: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })
            .map_err(query_err)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(query_err)
    }

    /// The record whose version is numerically greatest under semver
    /// ordering; not the most recently inserted one.
    ///
    /// Records whose version text does not parse stay in storage but are
    /// skipped here. Returns `None` when nothing parses.
    pub fn latest_version(&self, git_url: &str) -> Result<Option<VersionRecord>> {
        let versions = self.all_versions(git_url)?;

        let mut latest: Option<(SemanticVersion, VersionRecord)> = None;
        for record in versions {
            let Ok(parsed) = SemanticVersion::parse(&record.version) else {
                continue;
            };
            // Strictly greater: ties are unreachable while the
            // (git_url, version) uniqueness constraint holds.
            let is_better = match &latest {
                Some((best, _)) => parsed > *best,
                None => true,
            };
            if is_better {
                latest = Some((parsed, record));
            }
        }

        Ok(latest.map(|(_, record)| record))
    }
}

fn query_err(e: rusqlite::Error) -> QvError {
    QvError::Storage(StorageError::QueryFailed {
        message: e.to_string(),
    })
}
