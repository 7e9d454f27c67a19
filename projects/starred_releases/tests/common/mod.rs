#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use interfaces_github_starred::index::{GitHubClient, GitHubClientConfig};
use projects_starred_releases::{
    db::{init_pool, stared_release::{models::StaredRelease, queries::list_stared_releases}},
    endpoints::router,
    state::AppState,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const ACCOUNT: &str = "octocat";
pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub enum FakeReleases {
    List(Vec<Value>),
    Status(u16),
}

#[derive(Debug, Clone)]
pub struct FakeRepo {
    pub name: String,
    pub releases: FakeReleases,
}

impl FakeRepo {
    pub fn with_releases(name: &str, releases: Vec<Value>) -> Self {
        Self {
            name: name.to_string(),
            releases: FakeReleases::List(releases),
        }
    }

    pub fn without_releases(name: &str) -> Self {
        Self::with_releases(name, Vec::new())
    }

    pub fn failing(name: &str, status: u16) -> Self {
        Self {
            name: name.to_string(),
            releases: FakeReleases::Status(status),
        }
    }
}

pub fn release(tag: Option<&str>, body: Option<&str>, published_at: &str) -> Value {
    json!({
        "tag_name": tag,
        "name": tag,
        "body": body,
        "html_url": format!("https://github.com/{ACCOUNT}/releases/tag/{}", tag.unwrap_or("untagged")),
        "published_at": published_at,
        "draft": false,
        "prerelease": false,
    })
}

pub fn avatar_url(repo: &str) -> String {
    format!("https://avatars.example/{repo}")
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub api_version: Option<String>,
}

#[derive(Default)]
struct FakeState {
    base_url: String,
    repos: Mutex<Vec<FakeRepo>>,
    starred_status: Mutex<Option<u16>>,
    requests: Mutex<Vec<RecordedRequest>>,
    release_delay: Mutex<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeState {
    fn record(&self, path: String, query: HashMap<String, String>, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            path,
            query,
            authorization: header("authorization"),
            accept: header("accept"),
            api_version: header("x-github-api-version"),
        });
    }
}

/// In-process stand-in for the GitHub REST API.
#[derive(Clone)]
pub struct FakeGitHub {
    state: Arc<FakeState>,
}

impl FakeGitHub {
    pub async fn start(repos: Vec<FakeRepo>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(FakeState {
            base_url,
            repos: Mutex::new(repos),
            ..Default::default()
        });

        let app = Router::new()
            .route("/users/{account}/starred", get(starred))
            .route("/repos/{owner}/{repo}/releases", get(releases))
            .with_state(state.clone());
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self { state }
    }

    pub fn base_url(&self) -> &str {
        &self.state.base_url
    }

    pub fn set_repos(&self, repos: Vec<FakeRepo>) {
        *self.state.repos.lock().unwrap() = repos;
    }

    pub fn fail_starred(&self, status: u16) {
        *self.state.starred_status.lock().unwrap() = Some(status);
    }

    pub fn delay_releases(&self, delay: Duration) {
        *self.state.release_delay.lock().unwrap() = delay;
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn starred_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with("/starred"))
            .collect()
    }

    pub fn release_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with("/releases"))
            .collect()
    }
}

fn query_usize(query: &HashMap<String, String>, name: &str, default: usize) -> usize {
    query
        .get(name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

async fn starred(
    State(state): State<Arc<FakeState>>,
    Path(account): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let page = query_usize(&query, "page", 1);
    let per_page = query_usize(&query, "per_page", 30);
    state.record(format!("/users/{account}/starred"), query, &headers);

    if let Some(status) = *state.starred_status.lock().unwrap() {
        return (
            StatusCode::from_u16(status).unwrap(),
            Json(json!({ "message": "starred listing unavailable" })),
        );
    }
    if account != ACCOUNT {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" })));
    }

    let repos = state.repos.lock().unwrap();
    let items = repos
        .iter()
        .skip(page.saturating_sub(1) * per_page)
        .take(per_page)
        .map(|repo| {
            json!({
                "id": 1,
                "name": repo.name,
                "full_name": format!("{ACCOUNT}/{}", repo.name),
                "releases_url": format!("{}/repos/{ACCOUNT}/{}/releases{{/id}}", state.base_url, repo.name),
                "owner": { "login": ACCOUNT, "avatar_url": avatar_url(&repo.name) },
            })
        })
        .collect();

    (StatusCode::OK, Json(Value::Array(items)))
}

async fn releases(
    State(state): State<Arc<FakeState>>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let per_page = query_usize(&query, "per_page", 30);
    state.record(format!("/repos/{owner}/{repo}/releases"), query, &headers);

    let in_flight = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
    let delay = *state.release_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    let found = state
        .repos
        .lock()
        .unwrap()
        .iter()
        .find(|r| r.name == repo)
        .map(|r| r.releases.clone());

    match found {
        Some(FakeReleases::List(list)) => (
            StatusCode::OK,
            Json(Value::Array(list.into_iter().take(per_page).collect())),
        ),
        Some(FakeReleases::Status(status)) => (
            StatusCode::from_u16(status).unwrap(),
            Json(json!({ "message": "Server Error" })),
        ),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))),
    }
}

pub struct TestContext {
    pub fake: FakeGitHub,
    pub state: AppState,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new(repos: Vec<FakeRepo>) -> Self {
        Self::with_concurrency(repos, 5).await
    }

    pub async fn with_concurrency(repos: Vec<FakeRepo>, concurrency: usize) -> Self {
        let fake = FakeGitHub::start(repos).await;
        let dir = tempfile::tempdir().unwrap();
        let pool = init_pool(dir.path().join("releases.db").to_str().unwrap()).unwrap();
        let github = GitHubClient::new(GitHubClientConfig {
            api_url: fake.base_url().to_string(),
            timeout: Duration::from_secs(5),
            ..GitHubClientConfig::new(TOKEN)
        })
        .unwrap();

        Self {
            fake,
            state: AppState::new(pool, github, ACCOUNT, concurrency),
            _dir: dir,
        }
    }

    /// Stored rows, newest first.
    pub fn stored(&self) -> Vec<StaredRelease> {
        let mut conn = self.state.pool.get().unwrap();
        list_stared_releases(&mut conn, i64::MAX, 0).unwrap()
    }

    /// Serves the service router on an ephemeral port; returns its base URL.
    pub async fn spawn_app(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let app = router(self.state.clone());
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        url
    }
}
