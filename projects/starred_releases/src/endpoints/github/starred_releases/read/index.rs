use axum::{
	extract::{Extension, Json, Query},
	http::StatusCode,
	response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
	db::stared_release::{
		models::StaredRelease,
		queries::{count_stared_releases, list_stared_releases},
	},
	state::AppState,
	utils::{pagination::Pagination, time_ago::time_ago},
};

pub const RELEASES_PER_PAGE: u32 = 10;

#[derive(Debug, Error)]
pub enum HandlerError {
	#[error("GetConnectionFromPool: {source}")]
	GetConnectionFromPool {
		#[from]
		source: r2d2::Error,
	},
	#[error(transparent)]
	CountStaredReleases {
		#[from]
		source: crate::db::stared_release::queries::CountStaredReleasesError,
	},
	#[error(transparent)]
	ListStaredReleases {
		#[from]
		source: crate::db::stared_release::queries::ListStaredReleasesError,
	},
	#[error("Join: {source}")]
	Join {
		#[from]
		source: tokio::task::JoinError,
	},
}

impl IntoResponse for HandlerError {
	fn into_response(self) -> axum::response::Response {
		(StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
	}
}

/// Query parameters for the endpoint.
#[derive(Deserialize)]
pub struct ReadQuery {
	page: Option<String>,
}

impl ReadQuery {
	/// Requested page, with unparsable or non-positive values read as 1.
	pub fn requested_page(&self) -> u32 {
		self.page
			.as_deref()
			.and_then(|raw| raw.trim().parse::<i64>().ok())
			.map_or(1, |page| u32::try_from(page.max(1)).unwrap_or(u32::MAX))
	}
}

#[derive(Serialize)]
pub struct ReleaseView {
	#[serde(flatten)]
	pub release: StaredRelease,
	pub published_time_ago: String,
}

#[derive(Serialize)]
pub struct ReadResponse {
	pub releases: Vec<ReleaseView>,
	#[serde(flatten)]
	pub pagination: Pagination,
}

/// Axum handler: GET /github/starred_releases/read?page=N
pub async fn handler(
	Extension(state): Extension<AppState>,
	Query(query): Query<ReadQuery>,
) -> Result<Json<ReadResponse>, HandlerError> {
	let pool = state.pool.clone();
	let requested = query.requested_page();

	let (releases, pagination) = tokio::task::spawn_blocking(move || -> Result<_, HandlerError> {
		let mut conn = pool.get()?;
		let total = count_stared_releases(&mut conn)?;
		let pagination = Pagination::new(Some(requested), RELEASES_PER_PAGE, total.max(0) as u64);
		let releases = list_stared_releases(&mut conn, pagination.limit(), pagination.offset())?;
		Ok((releases, pagination))
	})
	.await??;

	let now = Utc::now().naive_utc();
	let releases = releases
		.into_iter()
		.map(|release| ReleaseView {
			published_time_ago: time_ago(release.date, now),
			release,
		})
		.collect();

	Ok(Json(ReadResponse { releases, pagination }))
}
