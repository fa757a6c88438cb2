//! HTTP error types for the Zero-FAF-Builder server.
//!
//! Maps domain errors from `faf-builder-core` into HTTP responses. Every
//! variant produces a JSON body with a machine-readable `error` field and a
//! human-readable `message`. Validation failures carry the exact inline text
//! the page shows under the URL field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use faf_builder_core::error::IntakeError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Requested resource not found.
    NotFound(String),
    /// Client sent a request the server cannot act on in its current state.
    Conflict(String),
    /// Submitted input failed validation.
    Invalid {
        code: &'static str,
        message: String,
    },
    /// Server is at capacity.
    Unavailable(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            Self::Invalid { code, message } => (StatusCode::UNPROCESSABLE_ENTITY, code, message),
            Self::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable", msg),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Invalid(reason) => Self::Invalid {
                code: reason.code(),
                message: reason.to_string(),
            },
            IntakeError::SubmissionInProgress | IntakeError::ViewClosed => {
                Self::Conflict(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use faf_builder_core::error::ValidationError;

    use super::*;

    #[test]
    fn validation_errors_are_unprocessable() {
        let resp = AppError::from(IntakeError::Invalid(ValidationError::MalformedUrl)).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn capacity_is_service_unavailable() {
        let resp = AppError::Unavailable("full".to_owned()).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn session_misuse_is_conflict() {
        for err in [IntakeError::SubmissionInProgress, IntakeError::ViewClosed] {
            assert_eq!(AppError::from(err).into_response().status(), StatusCode::CONFLICT);
        }
    }
}
