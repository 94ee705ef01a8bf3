//! `/upload`: HTML form plus a synchronous build that redirects to the download.

use axum::{Router, routing::get};
use get::upload_form;
use post::upload_and_build;

use crate::state::AppState;

pub mod get;
pub mod post;

pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/", get(upload_form).post(upload_and_build))
}
