// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Version ledger module.
//!
//! Durable, queryable history of deployed versions, scoped by repository
//! URL, backed by a local SQLite file.

mod schema;
mod store;

pub use store::{db_path, Ledger, NewVersion, SyncState, VersionRecord, DB_FILE};
