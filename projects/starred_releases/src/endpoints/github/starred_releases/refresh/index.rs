use axum::{
	extract::{Extension, Json},
	http::StatusCode,
	response::IntoResponse,
};
use thiserror::Error;
use tracing::error;

use crate::{
	refresh::{refresh_and_sync, RefreshAndSyncError, RefreshSummary},
	state::AppState,
};

#[derive(Debug, Error)]
pub enum HandlerError {
	#[error("RefreshInProgress: a refresh is already running")]
	RefreshInProgress,
	#[error("RefreshAndSync: {source}")]
	RefreshAndSync {
		#[from]
		source: RefreshAndSyncError,
	},
}

impl IntoResponse for HandlerError {
	fn into_response(self) -> axum::response::Response {
		let status = match &self {
			HandlerError::RefreshInProgress => StatusCode::CONFLICT,
			HandlerError::RefreshAndSync { source: RefreshAndSyncError::Refresh { .. } } => StatusCode::BAD_GATEWAY,
			HandlerError::RefreshAndSync { source: RefreshAndSyncError::Sync { .. } } => StatusCode::INTERNAL_SERVER_ERROR,
		};
		if status != StatusCode::CONFLICT {
			error!(error = %self, "refresh failed");
		}

		(status, self.to_string()).into_response()
	}
}

/// Axum handler: POST /github/starred_releases/refresh
///
/// Replaces the stored releases with the latest release of every starred repository.
pub async fn handler(
	Extension(state): Extension<AppState>,
) -> Result<Json<RefreshSummary>, HandlerError> {
	let Ok(_guard) = state.refresh_lock.try_lock() else {
		return Err(HandlerError::RefreshInProgress);
	};

	let summary = refresh_and_sync(&state).await?;

	Ok(Json(summary))
}
