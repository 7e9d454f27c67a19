use std::sync::Arc;

use chrono::{DateTime, Utc};
use interfaces_github_starred::{
    index::GitHubClient,
    models::{ReleaseRecord, StarredRepository},
};
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, error, info, warn};

use crate::db::stared_release::models::NewStaredRelease;

/// Releases requested per repository; only the first is kept.
pub const RELEASES_PER_REPOSITORY: u32 = 4;
pub const UNKNOWN_VERSION: &str = "UNKNOWN";

#[derive(Debug, Default)]
pub struct Resolution {
    /// In the order of the starred listing.
    pub releases: Vec<NewStaredRelease>,
    pub starred: usize,
    pub failed: usize,
}

/// Maps the newest entry of `releases` onto a storage record.
/// `None` when the repository has no releases.
pub fn latest_release(
    repo: &StarredRepository,
    releases: Vec<ReleaseRecord>,
) -> Option<NewStaredRelease> {
    let release = releases.into_iter().next()?;

    Some(NewStaredRelease {
        name: repo.name.clone(),
        version: release
            .tag_name
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        changes: release.body.unwrap_or_default(),
        release_url: release.html_url,
        avatar_url: repo.owner.avatar_url.clone(),
        date: release
            .published_at
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
            .naive_utc(),
    })
}

/// Fetches the latest release of every repository with at most `concurrency`
/// requests in flight. A repository whose fetch fails is logged and counted
/// in [`Resolution::failed`]; the rest still resolve.
pub async fn resolve_latest_releases(
    client: &GitHubClient,
    repos: Vec<StarredRepository>,
    concurrency: usize,
) -> Resolution {
    let starred = repos.len();
    let sem = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut set = JoinSet::new();

    for (index, repo) in repos.into_iter().enumerate() {
        let sem = sem.clone();
        let client = client.clone();
        set.spawn(async move {
            let _permit = sem.acquire().await;
            let result = client
                .fetch_releases(&repo.releases_url, RELEASES_PER_REPOSITORY)
                .await;
            (index, repo, result)
        });
    }

    let mut slots: Vec<Option<NewStaredRelease>> = vec![None; starred];
    let mut failed = 0;

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, repo, Ok(releases))) => match latest_release(&repo, releases) {
                Some(release) => slots[index] = Some(release),
                None => debug!(repository = %repo.name, "no releases"),
            },
            Ok((_, repo, Err(source))) => {
                warn!(repository = %repo.name, error = %source, "failed to fetch releases");
                failed += 1;
            }
            Err(source) => {
                error!(error = %source, "release task failed");
                failed += 1;
            }
        }
    }

    let releases: Vec<_> = slots.into_iter().flatten().collect();
    info!(starred, resolved = releases.len(), failed, "resolved latest releases");

    Resolution {
        releases,
        starred,
        failed,
    }
}
