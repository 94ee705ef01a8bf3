use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use build_manager::{JobId, JobStatus};

use crate::response::{ApiResponse, api_error};
use crate::routes::common::stream_artifact;
use crate::state::AppState;

/// GET /api/builds
pub async fn list_jobs(State(state): State<AppState>) -> Response {
    let jobs = state.builds().jobs().await;
    ApiResponse::success(jobs, "Build jobs retrieved successfully").with_status(StatusCode::OK)
}

/// GET /api/builds/stats
///
/// ```json
/// { "success": true, "data": { "running": 1, "waiting": 0, "max_concurrent": 2 }, "message": "..." }
/// ```
pub async fn queue_stats(State(state): State<AppState>) -> Response {
    let stats = state.builds().stats().await;
    ApiResponse::success(stats, "Queue stats retrieved successfully").with_status(StatusCode::OK)
}

/// GET /api/builds/{job_id}
///
/// - `200 OK` with the job
/// - `400 Bad Request` → `Invalid job id`
/// - `404 Not Found` → `Job not found`
pub async fn get_job(State(state): State<AppState>, Path(job_id): Path<String>) -> Response {
    let id = match job_id.parse::<JobId>() {
        Ok(id) => id,
        Err(_) => return api_error(StatusCode::BAD_REQUEST, "Invalid job id"),
    };

    match state.builds().job(id).await {
        Some(job) => ApiResponse::success(job, "Build job retrieved successfully")
            .with_status(StatusCode::OK),
        None => api_error(StatusCode::NOT_FOUND, "Job not found"),
    }
}

/// GET /api/builds/{job_id}/artifact
///
/// - `200 OK` with the executable as an attachment
/// - `400 Bad Request` → `Invalid job id`
/// - `404 Not Found` → `Job not found` or `Artifact missing on disk`
/// - `409 Conflict` → the job is still running or did not succeed
pub async fn download_artifact(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let id = match job_id.parse::<JobId>() {
        Ok(id) => id,
        Err(_) => return api_error(StatusCode::BAD_REQUEST, "Invalid job id"),
    };

    let job = match state.builds().job(id).await {
        Some(job) => job,
        None => return api_error(StatusCode::NOT_FOUND, "Job not found"),
    };

    match job.status {
        JobStatus::Succeeded => {}
        JobStatus::Queued | JobStatus::Running => {
            return api_error(StatusCode::CONFLICT, "Build is still in progress");
        }
        JobStatus::Failed | JobStatus::TimedOut => {
            return api_error(StatusCode::CONFLICT, "Build did not succeed");
        }
    }

    match stream_artifact(state.executable_dir(), &job.artifact_name).await {
        Ok(Some(response)) => response,
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Artifact missing on disk"),
        Err(e) => {
            tracing::error!(job_id = %id, error = %e, "Failed to open artifact");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Could not open file")
        }
    }
}
