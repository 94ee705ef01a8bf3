use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Response,
};

use crate::response::{ApiResponse, api_error};
use crate::routes::common::{read_upload, save_upload};
use crate::state::AppState;

/// POST /api/builds
///
/// Queues a build for the uploaded `file` and returns immediately.
///
/// ### Responses
///
/// - `202 Accepted`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": "0b6f4c1e-...",
///     "source_name": "hello.py",
///     "artifact_name": "hello.exe",
///     "status": "queued",
///     "error": null,
///     "created_at": "2025-01-01T00:00:00Z",
///     "started_at": null,
///     "finished_at": null
///   },
///   "message": "Build queued"
/// }
/// ```
///
/// - `400 Bad Request` → `No file part`, `No selected file`, `Invalid filename`
/// - `413 Payload Too Large`
pub async fn submit_build(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let request = match read_upload(&mut multipart).await {
        Ok(upload) => save_upload(&state, upload).await,
        Err(e) => Err(e),
    };

    match request {
        Ok(request) => {
            let job = state.builds().submit(request).await;
            ApiResponse::success(job, "Build queued").with_status(StatusCode::ACCEPTED)
        }
        Err(e) => api_error(e.status(), e.to_string()),
    }
}
