use axum::{Router, extract::State, response::Response, routing::get};
use serde_json::json;

use crate::state::AppState;
use crate::templates::{INDEX, render_page};

pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// GET /
///
/// Landing page linking to the upload and email forms.
async fn home(State(state): State<AppState>) -> Response {
    render_page(INDEX, &json!({ "project_name": state.config().project_name }))
}
