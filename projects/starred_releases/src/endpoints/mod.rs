pub mod github;
pub mod greeting;

use axum::{
	routing::{get, post},
	Extension, Router,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/github/starred_releases/refresh", post(github::starred_releases::refresh::index::handler))
		.route("/github/starred_releases/read", get(github::starred_releases::read::index::handler))
		.route("/greeting", post(greeting::index::handler))
		.layer(Extension(state))
}
