use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use util::filename::secure_filename;

use crate::routes::common::stream_artifact;
use crate::state::AppState;

/// GET /download/{filename}
///
/// Serves a built executable from the executables folder as an attachment.
///
/// ### Responses
/// - `200 OK` with `Content-Disposition: attachment`
/// - `404 Not Found` if the name is not a plain filename or nothing was built under it
/// - `500 Internal Server Error` if the file cannot be read
pub async fn download_file(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    if secure_filename(&filename) != filename {
        tracing::warn!(requested = %filename, "Rejected unsafe download name");
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    match stream_artifact(state.executable_dir(), &filename).await {
        Ok(Some(response)) => response,
        Ok(None) => (StatusCode::NOT_FOUND, "File not found").into_response(),
        Err(e) => {
            tracing::error!(filename = %filename, error = %e, "Failed to open artifact");
            (StatusCode::INTERNAL_SERVER_ERROR, "Could not open file").into_response()
        }
    }
}
