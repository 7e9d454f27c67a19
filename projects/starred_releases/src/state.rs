use std::sync::Arc;

use interfaces_github_starred::index::GitHubClient;
use tokio::sync::Mutex;

use crate::db::SqlitePool;

/// Shared by every handler through an `Extension` layer.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub github: GitHubClient,
    pub account: String,
    pub release_concurrency: usize,
    /// Held for the duration of a refresh; one refresh at a time.
    pub refresh_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        github: GitHubClient,
        account: impl Into<String>,
        release_concurrency: usize,
    ) -> Self {
        Self {
            pool,
            github,
            account: account.into(),
            release_concurrency: release_concurrency.max(1),
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }
}
