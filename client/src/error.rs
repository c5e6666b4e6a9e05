use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The gateway answered with its `{error}` envelope.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Derived lookup miss: no cached list entry matches the recording id.
    #[error("Meeting not found")]
    NotFound,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failure kind as defined by the gateway's error taxonomy, recovered from
/// the response status so callers can pick retry behaviour without string
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    NotYetAvailable,
    Upstream,
    Timeout,
    Internal,
    NotFound,
    Transport,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Api { status, .. } => match *status {
                StatusCode::BAD_REQUEST => ErrorKind::BadRequest,
                StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
                StatusCode::NOT_FOUND => ErrorKind::NotYetAvailable,
                StatusCode::BAD_GATEWAY => ErrorKind::Upstream,
                StatusCode::GATEWAY_TIMEOUT => ErrorKind::Timeout,
                _ => ErrorKind::Internal,
            },
            ClientError::NotFound => ErrorKind::NotFound,
            ClientError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Whether a later caller-initiated retry can reasonably succeed without
    /// an operator or input change first.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NotYetAvailable | ErrorKind::Upstream | ErrorKind::Timeout | ErrorKind::Transport
        )
    }
}
