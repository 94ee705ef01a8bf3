//! HTTP front end: upload a script, get a standalone executable back, and a
//! small form for relaying plain-text email.

pub mod app;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod templates;
