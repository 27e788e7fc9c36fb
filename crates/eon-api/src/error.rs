//! Error types for the HTTP API.
//!
//! [`ApiError`] converts into an Axum response carrying the
//! `{"success": false, "error": ...}` envelope every endpoint uses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eon_db::DbError;
use eon_types::ErrorResponse;

/// Message returned when the state endpoint cannot read the store.
pub const STATE_UNAVAILABLE: &str = "Failed to fetch platform state";

/// Message returned when the changelog endpoint cannot read the store.
pub const CHANGELOG_UNAVAILABLE: &str = "Failed to fetch changelog";

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body was missing, malformed, or carried invalid values.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// Recording failed in the store. The store message is returned to
    /// the caller as-is.
    #[error("{0}")]
    Store(#[from] DbError),

    /// The platform state could not be read.
    #[error("{STATE_UNAVAILABLE}: {0}")]
    StateUnavailable(DbError),

    /// The persisted changelog could not be read.
    #[error("{CHANGELOG_UNAVAILABLE}: {0}")]
    ChangelogUnavailable(DbError),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::StateUnavailable(_) | Self::ChangelogUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the response body.
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Store(e) => e.to_string(),
            Self::StateUnavailable(_) => String::from(STATE_UNAVAILABLE),
            Self::ChangelogUnavailable(_) => String::from(CHANGELOG_UNAVAILABLE),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            success: false,
            error: self.public_message(),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_expose_the_store_message() {
        let err = ApiError::from(DbError::StateNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Platform state not found");
    }

    #[test]
    fn state_errors_use_the_generic_message() {
        let err = ApiError::StateUnavailable(DbError::Config(String::from("bad row")));
        assert_eq!(err.public_message(), STATE_UNAVAILABLE);
        assert!(err.to_string().contains("bad row"));
    }

    #[test]
    fn bad_request_is_400() {
        let err = ApiError::BadRequest(String::from("sessionId must not be empty"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
