//! Refresh: page through the starred listing, resolve each repository's latest
//! release, then replace the stored releases with the result.

pub mod pager;
pub mod resolver;

use interfaces_github_starred::index::GitHubClient;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    db::{
        stared_release::{models::NewStaredRelease, queries::replace_all_stared_releases},
        SqlitePool,
    },
    state::AppState,
};
use pager::{load_all_starred, LoadAllStarredError, STARRED_PAGE_SIZE};
use resolver::{resolve_latest_releases, Resolution};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub starred_repositories: usize,
    pub stored_releases: usize,
    pub failed_repositories: usize,
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("LoadAllStarred: {source}")]
    LoadAllStarred {
        #[from]
        source: LoadAllStarredError,
    },
}

pub async fn refresh(
    client: &GitHubClient,
    account: &str,
    concurrency: usize,
) -> Result<Resolution, RefreshError> {
    let starred = load_all_starred(client, account, STARRED_PAGE_SIZE).await?;
    Ok(resolve_latest_releases(client, starred, concurrency).await)
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        source: r2d2::Error,
    },
    #[error("ReplaceStaredReleases: {source}")]
    ReplaceStaredReleases {
        source: crate::db::stared_release::queries::ReplaceStaredReleasesError,
    },
    #[error("Join: {source}")]
    Join {
        source: tokio::task::JoinError,
    },
}

/// Replaces the stored releases with `releases`. Resolves once every row is written.
pub async fn sync(pool: &SqlitePool, releases: Vec<NewStaredRelease>) -> Result<usize, SyncError> {
    let pool = pool.clone();

    tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .map_err(|source| SyncError::GetConnectionFromPool { source })?;
        replace_all_stared_releases(&mut conn, &releases)
            .map_err(|source| SyncError::ReplaceStaredReleases { source })
    })
    .await
    .map_err(|source| SyncError::Join { source })?
}

#[derive(Debug, Error)]
pub enum RefreshAndSyncError {
    #[error("Refresh: {source}")]
    Refresh {
        #[from]
        source: RefreshError,
    },
    #[error("Sync: {source}")]
    Sync {
        #[from]
        source: SyncError,
    },
}

/// Callers serialize through `state.refresh_lock`.
pub async fn refresh_and_sync(state: &AppState) -> Result<RefreshSummary, RefreshAndSyncError> {
    let Resolution {
        releases,
        starred,
        failed,
    } = refresh(&state.github, &state.account, state.release_concurrency).await?;

    let stored = sync(&state.pool, releases).await?;
    info!(account = %state.account, starred, stored, failed, "synced starred releases");

    Ok(RefreshSummary {
        starred_repositories: starred,
        stored_releases: stored,
        failed_repositories: failed,
    })
}
