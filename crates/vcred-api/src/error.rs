//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`CredentialError`] variants from the lifecycle engine to HTTP
//! status codes and returns JSON error bodies with error code, message,
//! and details. Never exposes internal error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use vcred_registry::CredentialError;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface. The `details` field carries additional context for client
/// errors but is omitted for 500-class errors to prevent information
/// leakage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The requested capability is declared but not implemented (501).
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A required upstream dependency is not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An upstream dependency failed (502). Message is logged but not
    /// returned to the client.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotImplemented(_) => (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose upstream or internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upstream(_) => "An upstream dependency failed".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "upstream failure"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Map lifecycle engine errors onto HTTP semantics.
impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match &err {
            CredentialError::Validation(_) => Self::Validation(err.to_string()),
            CredentialError::NotFound(id) => Self::NotFound(format!("credential {id} not found")),
            CredentialError::Signing(_) | CredentialError::Resolution(_) => {
                Self::Upstream(err.to_string())
            }
            CredentialError::Allocation(_)
            | CredentialError::ProofVerification(_)
            | CredentialError::Persistence(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                AppError::Validation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::NotImplemented("x".into()),
                StatusCode::NOT_IMPLEMENTED,
            ),
            (
                AppError::ServiceUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AppError::Upstream("x".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, _) = err.status_and_code();
            assert_eq!(status, expected, "{err}");
        }
    }

    #[test]
    fn credential_error_mapping() {
        let id = Uuid::new_v4();
        let cases = [
            (
                CredentialError::Validation("bad".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (CredentialError::NotFound(id), StatusCode::NOT_FOUND),
            (
                CredentialError::Signing("down".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CredentialError::Resolution("down".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CredentialError::Allocation("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CredentialError::Persistence("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let app_err = AppError::from(err);
            let (status, _) = app_err.status_and_code();
            assert_eq!(status, expected, "{app_err}");
        }
    }

    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_not_found() {
        let (status, body) = response_parts(AppError::NotFound("credential 123".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.code, "NOT_FOUND");
        assert!(body.error.message.contains("credential 123"));
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("db connection failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(
            !body.error.message.contains("db connection"),
            "internal error details must not leak: {}",
            body.error.message
        );
        assert_eq!(body.error.message, "An internal error occurred");
    }

    #[tokio::test]
    async fn into_response_upstream_hides_details() {
        let (status, body) = response_parts(AppError::Upstream(
            "signing authority returned 500 with stack trace".into(),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.error.code, "UPSTREAM_ERROR");
        assert!(!body.error.message.contains("stack trace"));
    }

    #[tokio::test]
    async fn into_response_not_implemented() {
        let (status, body) = response_parts(AppError::NotImplemented("QR rendering".into())).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body.error.code, "NOT_IMPLEMENTED");
        assert!(body.error.message.contains("QR rendering"));
    }
}
