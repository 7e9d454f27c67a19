use std::{fmt, time::Duration};

use reqwest::{
    header::{ACCEPT, AUTHORIZATION},
    Client, StatusCode,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::models::{GitHubErrorBody, ReleaseRecord, StarredRepository};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const API_VERSION: &str = "2022-11-28";
pub const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    pub token: String,
    pub api_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl GitHubClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: "rust-client".to_string(),
        }
    }
}

/// Shared REST client. Clones share one connection pool.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    pub fn new(config: GitHubClientConfig) -> Result<Self, BuildGitHubClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|source| BuildGitHubClientError::Build { source })?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// One page of `GET /users/{account}/starred`.
    pub async fn fetch_starred_page(
        &self,
        account: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StarredRepository>, FetchStarredPageError> {
        let url = format!("{}/users/{account}/starred", self.api_url);
        debug!(account, page, per_page, "fetching starred page");

        self.get_json(&url, &[("per_page", per_page), ("page", page)])
            .await
            .map_err(|source| FetchStarredPageError::GetJson { page, source })
    }

    /// Up to `per_page` most recent releases, listed at the repository's `releases_url`.
    pub async fn fetch_releases(
        &self,
        releases_url: &str,
        per_page: u32,
    ) -> Result<Vec<ReleaseRecord>, FetchReleasesError> {
        let url = releases_listing_url(releases_url);
        debug!(url, per_page, "fetching releases");

        self.get_json(url, &[("per_page", per_page)])
            .await
            .map_err(|source| FetchReleasesError::GetJson {
                url: url.to_string(),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, u32)],
    ) -> Result<T, GitHubRestError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(ACCEPT, ACCEPT_GITHUB_JSON)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .map_err(|source| GitHubRestError::RequestSend { source })?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|source| GitHubRestError::ResponseRead { source })?;

        if !status.is_success() {
            let message = serde_json::from_str::<GitHubErrorBody>(&body)
                .map(|err| err.message)
                .unwrap_or(body);
            return Err(GitHubRestError::UnexpectedStatus { status, message });
        }

        serde_json::from_str(&body).map_err(|source| GitHubRestError::DeserializeResponseBody { source })
    }
}

/// Strips the URI-template suffix (`{/id}`) from a `releases_url`.
pub fn releases_listing_url(releases_url: &str) -> &str {
    releases_url
        .split_once('{')
        .map_or(releases_url, |(base, _)| base)
}

#[derive(Debug, Error)]
pub enum BuildGitHubClientError {
    #[error("Build: {source}")]
    Build {
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum GitHubRestError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },

    #[error("UnexpectedStatus: {status}: {message}")]
    UnexpectedStatus {
        status: StatusCode,
        message: String,
    },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum FetchStarredPageError {
    #[error("FetchStarredPage (page {page}): {source}")]
    GetJson {
        page: u32,
        #[source]
        source: GitHubRestError,
    },
}

#[derive(Debug, Error)]
pub enum FetchReleasesError {
    #[error("FetchReleases ({url}): {source}")]
    GetJson {
        url: String,
        #[source]
        source: GitHubRestError,
    },
}
