use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository from `GET /users/{account}/starred`. Does not contain all fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StarredRepository {
    pub name: String,
    /// URI template, e.g. `https://api.github.com/repos/o/r/releases{/id}`.
    pub releases_url: String,
    pub owner: RepositoryOwner,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepositoryOwner {
    pub avatar_url: String,
}

/// A release from `GET /repos/{owner}/{repo}/releases`. Does not contain all fields.
///
/// See the github [docs](https://docs.github.com/en/rest/releases/releases?apiVersion=2022-11-28#list-releases)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReleaseRecord {
    pub tag_name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    /// Null for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Error payload GitHub sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct GitHubErrorBody {
    pub message: String,
}
