use axum::{extract::State, response::Response};
use serde_json::json;

use crate::state::AppState;
use crate::templates::{UPLOAD, render_page};

/// GET /upload
pub async fn upload_form(State(state): State<AppState>) -> Response {
    let cfg = state.config();
    render_page(
        UPLOAD,
        &json!({
            "project_name": cfg.project_name,
            "max_upload_mb": cfg.max_content_length / (1024 * 1024),
        }),
    )
}
