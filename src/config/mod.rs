// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for qv.
//!
//! This module handles loading, parsing, and writing the `qv.toml`
//! configuration file.

mod loader;
mod schema;

pub use loader::{config_path, load_config, load_config_from, store_config};
pub use schema::*;
