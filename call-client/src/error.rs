//! Client error types

use http::StatusCode;
use shared::response::ErrorDetail;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("{status}: {detail}")]
    Status { status: StatusCode, detail: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Build a status error from a non-2xx response body.
    ///
    /// Uses the backend's `detail` message when the body carries one and
    /// the raw text otherwise.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let detail = match serde_json::from_slice::<ErrorDetail>(body) {
            Ok(err) => err.message(),
            Err(_) => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    text
                }
            }
        };
        ClientError::Status { status, detail }
    }

    /// HTTP status for [`ClientError::Status`]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Backend-provided message, if the backend produced one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Status { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
