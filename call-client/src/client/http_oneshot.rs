// call-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-process transport
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::{ClientError, ClientResult};

use super::decode_response;
use super::http::HttpClient;

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an axum [`Router`] through Tower's `oneshot`, so a backend
/// implementation living in the same process is reached without a socket.
///
/// # Example
///
/// ```ignore
/// use call_client::{CallCenterApi, OneshotHttpClient};
///
/// let api = CallCenterApi::new(OneshotHttpClient::new(call_center_mock::router()));
/// let tags = api.get_tags().await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - a fully built Router (state already attached)
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Request<Body>> {
        let uri = format!("/{}", path.trim_start_matches('/'));
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, "application/json");
        let body = body.map(Body::from).unwrap_or_else(Body::empty);
        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        tracing::debug!("{} {} (in-process)", request.method(), request.uri());

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        decode_response(status, &body)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, None)?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request(Method::POST, path, Some(serde_json::to_vec(body)?))?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request(Method::PUT, path, Some(serde_json::to_vec(body)?))?;
        self.execute(request).await
    }

    fn base_url(&self) -> &str {
        "in-process"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_oneshot_round_trip() {
        let router = Router::new().route("/ping", get(|| async { axum::Json("pong") }));
        let client = OneshotHttpClient::new(router);
        let reply: String = client.get("ping").await.unwrap();
        assert_eq!(reply, "pong");
    }

    #[tokio::test]
    async fn test_unknown_route_is_status_error() {
        let client = OneshotHttpClient::new(Router::new());
        let result: ClientResult<String> = client.get("/missing").await;
        assert!(result.unwrap_err().is_not_found());
    }
}
