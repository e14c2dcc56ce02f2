//! Response envelopes
//!
//! The domain routes return bare models. These are the shapes the backend
//! uses around them.

use serde::{Deserialize, Serialize};

/// Error body returned with non-2xx statuses
///
/// ```json
/// { "detail": "Tag with this name already exists" }
/// ```
///
/// Validation failures put a list of field errors in `detail`, so it is
/// kept as a raw JSON value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: serde_json::Value::String(detail.into()),
        }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Connectivity check response (`GET /test`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
