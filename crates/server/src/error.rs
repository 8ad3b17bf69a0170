//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. Route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Application-level error type for the lunch service.
#[derive(Debug, Error)]
pub enum AppError {
    /// A price argument could not be coerced to a number.
    ///
    /// Surfaced as a 500, matching the original service where the
    /// conversion was unguarded.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request requires authentication and none was presented.
    #[error("Authentication required")]
    Unauthenticated,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Catalog backend operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body used for the unauthenticated response.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Catalog(_) | Self::Internal(_) | Self::InvalidPrice(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "Authentication required",
                }),
            )
                .into_response(),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            Self::InvalidPrice(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("invalid price: {message}"),
            )
                .into_response(),
            // Don't expose backend details to clients
            Self::Catalog(_) => {
                (StatusCode::BAD_GATEWAY, "External service error".to_string()).into_response()
            }
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
                .into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("item 7".to_string());
        assert_eq!(err.to_string(), "Not found: item 7");

        let err = AppError::InvalidPrice("abc".to_string());
        assert_eq!(err.to_string(), "invalid price: abc");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::BadRequest("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        // Unguarded-parse semantics: a bad price is a server error
        assert_eq!(
            status_of(AppError::InvalidPrice("abc".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Internal("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
