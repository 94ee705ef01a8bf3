//! `/send-email`: a form that relays one plain-text message via SMTP.

use axum::{Router, routing::get};
use get::email_form;
use post::send_message;

use crate::state::AppState;

pub mod get;
pub mod post;

pub fn email_routes() -> Router<AppState> {
    Router::new().route("/", get(email_form).post(send_message))
}
