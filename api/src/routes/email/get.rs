use axum::{extract::State, response::Response};
use serde_json::json;

use crate::state::AppState;
use crate::templates::{EMAIL, render_page};

/// GET /send-email
pub async fn email_form(State(state): State<AppState>) -> Response {
    render_page(EMAIL, &json!({ "project_name": state.config().project_name }))
}
