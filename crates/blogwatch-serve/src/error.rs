//! API error types and response formatting.

use std::sync::Arc;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Transport failure reaching the upstream API.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream API responded with a non-200 status.
    #[error("upstream returned status {0}")]
    Upstream(StatusCode),

    /// Upstream returned an empty blog list; analytics are undefined.
    #[error("upstream returned an empty blog list")]
    EmptyDataset,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),

    /// Failure shared among callers coalesced onto one cache refresh.
    #[error("{0}")]
    Cached(Arc<ApiError>),
}

impl From<Arc<ApiError>> for ApiError {
    fn from(err: Arc<ApiError>) -> Self {
        Self::Cached(err)
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ApiError {
    /// Map this error to a response status, machine-readable code, and
    /// client-safe message. Internal detail is logged, never returned.
    fn response_parts(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone())),
            Self::Network(err) => {
                tracing::error!(error = %err, "upstream network error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "network_error",
                    Some("Failed to reach the upstream blog API".to_string()),
                )
            }
            Self::Upstream(status) => {
                tracing::error!(status = %status, "upstream returned an error status");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_error",
                    Some("The upstream blog API returned an error".to_string()),
                )
            }
            Self::EmptyDataset => {
                tracing::error!("upstream returned an empty blog list");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "analytics_error",
                    Some("No blog data is available for analytics".to_string()),
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    Some("An internal error occurred".to_string()),
                )
            }
            Self::Cached(inner) => inner.response_parts(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.response_parts();

        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
