use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of every non-success gateway response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Failure taxonomy for the proxy handlers. Each variant maps to exactly one
/// HTTP status; nothing upstream-specific (raw bodies, stack traces) is
/// carried beyond a human-readable message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required startup configuration is absent. Fatal until the operator
    /// fixes it, unlike the per-request failures below.
    #[error("{0} not configured")]
    Config(&'static str),

    /// Caller input is missing or invalid. Correct and retry.
    #[error("{0}")]
    BadRequest(String),

    /// Upstream rejected our credential.
    #[error("{0}")]
    Unauthorized(String),

    /// The resource exists but is not ready yet. Safe to retry later.
    #[error("{0}")]
    NotYetAvailable(String),

    /// Transient or unexpected upstream failure. Safe to retry.
    #[error("{0}")]
    Upstream(String),

    /// The upstream call exceeded its bound. Retry with reduced input.
    #[error("{0}")]
    Timeout(String),

    /// Unexpected local failure; the details are logged, not returned.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Config(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotYetAvailable(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Stable label used in boundary logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Config(_) => "configuration",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotYetAvailable(_) => "not_yet_available",
            ApiError::Upstream(_) => "upstream_unavailable",
            ApiError::Timeout(_) => "timeout",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
