use axum::{Router, extract::DefaultBodyLimit, middleware::from_fn};

use crate::middleware::log_request;
use crate::routes::routes;
use crate::state::AppState;

/// The complete application: routes, upload size cap and request logging.
///
/// Kept separate from `main` so tests can drive it with `oneshot`.
pub fn build_app(app_state: AppState) -> Router {
    let max_body = app_state.config().max_content_length;

    routes(app_state)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(from_fn(log_request))
}
