//! Error types for the HTTP layer.
//!
//! [`ApiError`] unifies service failures and request-extraction failures
//! into one enum that converts into an Axum response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use beacon_core::ServiceError;

/// Errors that can occur in the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service rejected or failed the operation.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Query string or body could not be extracted.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// A path segment is not a valid event id.
    #[error("invalid event id: {0}")]
    InvalidId(String),
}

impl ApiError {
    /// The HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::InvalidArgument(_))
            | Self::BadRequest(_)
            | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Service(ServiceError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
