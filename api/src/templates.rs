//! HTML pages, compiled into the binary and rendered with handlebars.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde::Serialize;

pub const INDEX: &str = "index";
pub const UPLOAD: &str = "upload";
pub const EMAIL: &str = "email";

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(false);
    for (name, source) in [
        (INDEX, include_str!("../assets/templates/index.hbs")),
        (UPLOAD, include_str!("../assets/templates/upload.hbs")),
        (EMAIL, include_str!("../assets/templates/email.hbs")),
    ] {
        if let Err(e) = hb.register_template_string(name, source) {
            tracing::error!(template = name, error = %e, "Failed to register template");
        }
    }
    hb
});

/// Renders `name` into an HTML response, or a 500 if rendering fails.
pub fn render_page<T: Serialize>(name: &str, data: &T) -> Response {
    match TEMPLATES.render(name, data) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(template = name, error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}
