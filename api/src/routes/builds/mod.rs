//! JSON build API under `/api/builds`.
//!
//! Unlike `/upload`, builds submitted here run in the background; clients poll
//! the job and download the artifact once it has succeeded.

use axum::{Router, routing::get};
use get::{download_artifact, get_job, list_jobs, queue_stats};
use post::submit_build;

use crate::state::AppState;

pub mod get;
pub mod post;

/// - `POST /` → queue a build from a multipart `file`
/// - `GET /` → all tracked jobs, newest first
/// - `GET /stats` → slot usage
/// - `GET /{job_id}` → one job
/// - `GET /{job_id}/artifact` → the executable of a succeeded job
pub fn builds_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(submit_build))
        .route("/stats", get(queue_stats))
        .route("/{job_id}", get(get_job))
        .route("/{job_id}/artifact", get(download_artifact))
}
