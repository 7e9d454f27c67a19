use interfaces_github_starred::{
    index::{FetchStarredPageError, GitHubClient},
    models::StarredRepository,
};
use thiserror::Error;
use tracing::{debug, info};

/// GitHub's maximum page size for the starred listing.
pub const STARRED_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum LoadAllStarredError {
    #[error("FetchStarredPage: {source}")]
    FetchStarredPage {
        #[from]
        source: FetchStarredPageError,
    },
}

/// Every repository `account` has starred, in listing order.
///
/// Pages are requested one after another starting at 1. A page with fewer than
/// `per_page` items (including an empty one) is the last; no later page is requested.
pub async fn load_all_starred(
    client: &GitHubClient,
    account: &str,
    per_page: u32,
) -> Result<Vec<StarredRepository>, LoadAllStarredError> {
    let per_page = per_page.clamp(1, STARRED_PAGE_SIZE);
    let mut starred = Vec::new();
    let mut page = 1;

    loop {
        let repos = client.fetch_starred_page(account, page, per_page).await?;
        let fetched = repos.len();
        starred.extend(repos);
        debug!(account, page, fetched, total = starred.len(), "fetched starred page");

        if fetched < per_page as usize {
            break;
        }
        page += 1;
    }

    info!(account, pages = page, total = starred.len(), "loaded starred repositories");
    Ok(starred)
}
