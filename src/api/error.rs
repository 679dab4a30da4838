//! Error type for every call that crosses the network boundary.
//!
//! The client never swallows failures. The only side effect it performs on
//! the way out is the session teardown on 401 (see `middleware`), which has
//! already happened by the time a caller sees `ApiError::Unauthorized`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, DNS, TLS, timeout, or request construction error.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 401. Session and profile are already cleared.
    #[error("not authenticated")]
    Unauthorized,

    /// Any other non-2xx status, with the raw response body.
    #[error("request failed ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// 401 on any endpoint.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// 4xx other than 401: the request reached the backend and was refused.
    pub fn is_domain_failure(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if status.is_client_error())
    }

    /// Network trouble or a 5xx. Callers may retry; the client never does.
    pub fn is_transport_failure(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Notification text for a user-facing surface.
    pub fn user_message(&self) -> String {
        if self.is_auth_failure() {
            return "Session expired, please log in again".to_string();
        }
        if self.is_transport_failure() {
            return "Please try again later".to_string();
        }
        match self {
            ApiError::Status { status, body } if body.trim().is_empty() => status.to_string(),
            ApiError::Status { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}
