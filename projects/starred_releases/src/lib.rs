//! Latest releases of a GitHub account's starred repositories
//!
//! - REST API endpoints in `endpoints/`
//! - Pager, release resolver and sync in `refresh/`
//! - SQLite models and queries in `db/`
//! - Requires GITHUB_TOKEN and GITHUB_ACCOUNT env vars, see `config`

pub mod config;
pub mod db;
pub mod endpoints;
pub mod refresh;
pub mod state;
pub mod utils;
