use axum::{
    Form,
    extract::State,
    response::Response,
};
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;
use crate::templates::{EMAIL, render_page};

#[derive(Debug, Deserialize)]
pub struct SendEmailForm {
    pub receiver_email: String,
    pub body: String,
}

/// POST /send-email
///
/// ### Request Body (`application/x-www-form-urlencoded`)
/// - `receiver_email`: recipient address
/// - `body`: plain-text message
///
/// Always re-renders the form with either `🎉 Email Sent Successfully` or
/// `Error Occurred: ...`. Missing fields are rejected by the `Form` extractor.
pub async fn send_message(
    State(state): State<AppState>,
    Form(form): Form<SendEmailForm>,
) -> Response {
    let message = state
        .email()
        .send_report(&form.receiver_email, &form.body)
        .await;

    render_page(
        EMAIL,
        &json!({
            "project_name": state.config().project_name,
            "message": message,
        }),
    )
}
