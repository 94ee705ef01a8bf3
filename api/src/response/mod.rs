use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;

/// Standardized envelope for every JSON response under `/api`:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Build queued"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - On errors `data` is `T::default()` (usually `null` via `()`).
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }

    /// Pairs the envelope with a status code.
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Shorthand for an error envelope with no payload.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    ApiResponse::<()>::error(message).with_status(status)
}
