use axum::extract::Json;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct GreetingRequestBody {
	name: String,
}

/// Axum handler: POST /greeting
pub async fn handler(Json(input): Json<GreetingRequestBody>) -> String {
	format!("Hello, {}!", input.name)
}
