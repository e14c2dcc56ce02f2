//! Client module - transports behind the [`HttpClient`] trait.
//!
//! - [`NetworkHttpClient`]: reqwest over the network
//! - [`OneshotHttpClient`]: in-process calls into an axum Router
//!   (requires the "in-process" feature)

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;

use crate::{ClientError, ClientResult};
use ::http::StatusCode;
use serde::de::DeserializeOwned;

/// Check the status and decode the body. Shared by every transport.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> ClientResult<T> {
    if !status.is_success() {
        let err = ClientError::from_status(status, body);
        tracing::warn!("Request failed: {}", err);
        return Err(err);
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Tag;

    #[test]
    fn test_success_is_decoded() {
        let tag: Tag = decode_response(StatusCode::OK, br#"{"id": 1, "name": "Billing"}"#).unwrap();
        assert_eq!(tag.name, "Billing");
    }

    #[test]
    fn test_error_status_is_never_success() {
        // A well-formed JSON body must not hide the status
        let result: ClientResult<serde_json::Value> =
            decode_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"detail": "boom"}"#);
        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.detail(), Some("boom"));
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        let result: ClientResult<Tag> = decode_response(StatusCode::OK, br#"{"id": "x"}"#);
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }
}
