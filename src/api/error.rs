//! HTTP error taxonomy.
//!
//! Every failure surfaced by the API maps to one of these variants; all
//! bodies are JSON `{"error": ...}` so clients never branch on content
//! type. Persistence failures stay opaque: detail goes to the log, the
//! caller sees a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Field-level validation failure, mirroring the registration rules.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// API error taxonomy
#[derive(Debug)]
pub enum ApiError {
    /// No token supplied where one is required.
    Unauthenticated,
    /// A token was supplied but failed verification.
    InvalidToken,
    /// Bad username/password at login.
    InvalidCredentials,
    /// Valid token, insufficient role.
    Forbidden,
    /// Request body failed validation.
    Validation(Vec<FieldError>),
    /// Referenced record does not exist.
    NotFound(String),
    /// Uniqueness violation (duplicate username).
    Conflict(String),
    /// Persistence collaborator failure; detail logged, not leaked.
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Access denied" }),
            ),
            ApiError::InvalidToken => {
                (StatusCode::FORBIDDEN, json!({ "error": "Invalid token" }))
            }
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Invalid credentials" }),
            ),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, json!({ "error": "Access denied" })),
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "fields": fields }),
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, json!({ "error": message })),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidToken.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("Ticket not found".to_string())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("Username already exists".to_string())
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Validation(vec![FieldError::new("department", "Invalid department")])
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_is_opaque() {
        let err = ApiError::Internal(anyhow::anyhow!("sqlite disk I/O error at /var/db"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
