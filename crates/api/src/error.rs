//! HTTP API error types
//!
//! All request failures are terminal and map to a single status + JSON
//! body. Messages on the auth paths are deliberately uninformative so the
//! response never reveals which check failed; duplicate registration is
//! the one failure safe to describe, since it echoes the caller's own
//! input.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 Bad Request (duplicate registration)
    #[error("{0}")]
    BadRequest(String),

    /// 401 Unauthorized (bad credentials, missing/invalid/expired token)
    #[error("{0}")]
    Unauthorized(String),

    /// 404 Not Found (note absent or owned by someone else)
    #[error("{0}")]
    NotFound(String),

    /// 500 Internal Server Error (detail goes to the logs, not the client)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Log the real error but return a generic message
        tracing::error!(error = %err, "Database error");
        ApiError::Internal("An internal error occurred".to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        // Only reachable from token issuance; validation failures are
        // collapsed before they get here
        tracing::error!(error = %err, "Token issuance failed");
        ApiError::Internal("An internal error occurred".to_string())
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        tracing::error!(error = %err, "Password hashing failed");
        ApiError::Internal("An internal error occurred".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::BadRequest("dup".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("no".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_collapse_to_generic_internal() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        match err {
            ApiError::Internal(msg) => assert_eq!(msg, "An internal error occurred"),
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
