// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! SQLite schema for the version ledger.

use crate::error::{QvError, Result, StorageError};
use rusqlite::Connection;

/// Initialize the ledger schema.
///
/// Safe to call on an already-initialized database.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS versions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            version TEXT NOT NULL,
            tag_name TEXT NOT NULL,
            git_sha TEXT NOT NULL,
            git_url TEXT NOT NULL,
            increment_type TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(git_url, version)
        )
        "#,
        [],
    )
    .map_err(schema_err)?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS config_state (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            last_synced_at TIMESTAMP,
            git_url TEXT NOT NULL
        )
        "#,
        [],
    )
    .map_err(schema_err)?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_versions_git_url ON versions(git_url)",
        [],
    )
    .map_err(schema_err)?;

    Ok(())
}

fn schema_err(e: rusqlite::Error) -> QvError {
    QvError::Storage(StorageError::SchemaFailed {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap();

        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"versions".to_string()));
        assert!(tables.contains(&"config_state".to_string()));
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // Initialize twice
        init_schema(&conn).unwrap();
        let result = init_schema(&conn);

        assert!(result.is_ok());
    }
}
