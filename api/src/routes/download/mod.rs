use axum::{Router, routing::get};
use get::download_file;

use crate::state::AppState;

pub mod get;

pub fn download_routes() -> Router<AppState> {
    Router::new().route("/{filename}", get(download_file))
}
