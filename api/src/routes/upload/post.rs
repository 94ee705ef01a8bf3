use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::routes::common::{read_upload, save_upload};
use crate::state::AppState;

/// POST /upload
///
/// Accepts a multipart form with a single `file` part, packages it and
/// redirects to the resulting executable.
///
/// ### Responses
/// - `303 See Other` → `Location: /download/{artifact}`
/// - `400 Bad Request` → `No file part`, `No selected file` or `Invalid filename`
/// - `413 Payload Too Large` → upload exceeds `MAX_CONTENT_LENGTH`
/// - `500 Internal Server Error` → `Error creating executable: ...`
pub async fn upload_and_build(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let request = match read_upload(&mut multipart).await {
        Ok(upload) => save_upload(&state, upload).await,
        Err(e) => Err(e),
    };

    let request = match request {
        Ok(r) => r,
        Err(e) => return (e.status(), e.to_string()).into_response(),
    };

    match state.builds().build(request).await {
        Ok(outcome) => {
            Redirect::to(&format!("/download/{}", outcome.output.artifact_name)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error creating executable: {e}"),
        )
            .into_response(),
    }
}
