use crate::response::ApiResponse;
use axum::{Json, Router, response::IntoResponse, routing::get};

use crate::state::AppState;

/// Builds the `/health` route group: a single `GET /` for uptime probes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /api/health
///
/// ```json
/// { "success": true, "data": "OK", "message": "Health check passed" }
/// ```
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK", "Health check passed"))
}
