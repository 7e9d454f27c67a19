use anyhow::Result;
use axum::serve;
use interfaces_github_starred::index::{BuildGitHubClientError, GitHubClient};
use projects_starred_releases::{
	config::{Config, ConfigError},
	db::{init_pool, InitPoolError},
	endpoints::router,
	state::AppState,
};
use thiserror::Error;
use tracing::info;
use utils_trace::init as tracing_init;

#[derive(Debug, Error)]
pub enum MainError {
	#[error("Config: {source}")]
	Config {
		#[source]
		source: ConfigError,
	},
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("InitPool: {source}")]
	InitPool {
		#[source]
		source: InitPoolError,
	},
	#[error("BuildGitHubClient: {source}")]
	BuildGitHubClient {
		#[source]
		source: BuildGitHubClientError,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	}
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	let config = Config::from_env()
		.map_err(|source| MainError::Config { source })?;

	tracing_init(&config.log_level, config.log_format)
		.map_err(|source| MainError::TracingInit { source })?;

	let pool = init_pool(&config.database_url)
		.map_err(|source| MainError::InitPool { source })?;

	let github = GitHubClient::new(config.github_client_config())
		.map_err(|source| MainError::BuildGitHubClient { source })?;

	let state = AppState::new(pool, github, config.github_account.clone(), config.release_concurrency);
	let app = router(state);

	let listener = tokio::net::TcpListener::bind(config.bind_addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}", config.bind_addr);

	serve(listener, app)
		.await
		.map_err(|source| MainError::Serve { source })?;

	Ok(())
}
