//! Uniform API error and response envelope.
//!
//! Every handler returns `{success, data?|error?}` with an HTTP status
//! mirroring the condition: 401 unauthenticated, 403 insufficient role,
//! 404 missing resource, 400 validation, 429 throttled, 500 unexpected.
//! Unexpected errors degrade to a generic message with nothing leaked.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use teamline_core::errors::{AuthError, DatabaseError, Error};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error carrying the HTTP status and a client-safe message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::Auth(auth) => match auth {
                AuthError::InvalidCredentials => Self::unauthorized(auth.to_string()),
                AuthError::ResendThrottled { .. } => {
                    Self::new(StatusCode::TOO_MANY_REQUESTS, auth.to_string())
                }
                _ => Self::bad_request(auth.to_string()),
            },
            Error::Validation(v) => Self::bad_request(v.to_string()),
            Error::Forbidden(msg) => Self::forbidden(msg.clone()),
            Error::NotFound(what) => Self::not_found(format!("{what} not found")),
            Error::Database(DatabaseError::NotFound(_)) => Self::not_found("Resource not found"),
            Error::ConstraintViolation(msg) => Self::new(StatusCode::CONFLICT, msg.clone()),
            Error::Database(DatabaseError::UniqueViolation(_)) => {
                Self::new(StatusCode::CONFLICT, "Resource already exists")
            }
            _ => {
                tracing::error!("Unhandled error: {err}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.message,
        }));
        (self.status, body).into_response()
    }
}

/// Success envelope: wraps handler data as `{"success": true, "data": ...}`.
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        Json(json!({
            "success": true,
            "data": self.0,
        }))
        .into_response()
    }
}
