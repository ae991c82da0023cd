use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{HeaderMap, StatusCode};

/// Helper to create a JSON error response with a standard `{ "error": message }` body.
fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

/// Rejection produced by an [`AccessChecker`].
pub enum AccessError {
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AccessError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AccessError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };
        error_response(status, message)
    }
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AccessError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
        }
    }
}

impl std::fmt::Debug for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

/// Host-supplied access check, consulted before any handler runs.
///
/// The rule is the plugin's configured scope list; how it is enforced
/// (tokens, sessions, ...) is owned by the host.
pub trait AccessChecker: Send + Sync {
    fn check(&self, headers: &HeaderMap, rule: Option<&[String]>) -> Result<(), AccessError>;
}

/// Default checker that lets every request through.
pub struct AllowAll;

impl AccessChecker for AllowAll {
    fn check(&self, _headers: &HeaderMap, _rule: Option<&[String]>) -> Result<(), AccessError> {
        Ok(())
    }
}
