//! HTTP-facing errors
//!
//! Two classes only: the client sent something we cannot use, or we broke.
//! Neither panics the process, and neither leaks internals to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::decode::DecodeError;

/// Error returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or oversized request body
    #[error("bad request: {0}")]
    BadRequest(#[from] DecodeError),

    /// Failure on our side (template missing, rendering failed, ...)
    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    /// Wrap a server-side failure with a short description of what failed
    pub fn internal(
        context: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Internal {
            context,
            source: source.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadRequest(reason) => {
                warn!(%reason, "Rejected request");
                (StatusCode::BAD_REQUEST, "Bad Request").into_response()
            }
            ApiError::Internal { context, source } => {
                error!(%source, "{}", context);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let response = ApiError::from(DecodeError::Empty).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "index.html");
        let response = ApiError::internal("Error reading template", io).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(
            ApiError::internal("Error reading template", io).to_string(),
            "Error reading template: gone"
        );
    }
}
