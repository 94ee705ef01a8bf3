//! HTTP route table.
//!
//! - `/` → home page
//! - `/upload` → upload form and synchronous build
//! - `/download/{filename}` → built executables
//! - `/send-email` → email form
//! - `/api/health` → health check
//! - `/api/builds` → asynchronous build jobs (JSON)

use axum::Router;

use crate::routes::{
    builds::builds_routes, download::download_routes, email::email_routes,
    health::health_routes, home::home_routes, upload::upload_routes,
};
use crate::state::AppState;

pub mod builds;
pub mod common;
pub mod download;
pub mod email;
pub mod health;
pub mod home;
pub mod upload;

/// JSON endpoints, mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/builds", builds_routes())
}

/// Every route, with state applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .merge(home_routes())
        .nest("/upload", upload_routes())
        .nest("/download", download_routes())
        .nest("/send-email", email_routes())
        .nest("/api", api_routes())
        .with_state(app_state)
}
