//! Routes of the mock backend
//!
//! Collection routes keep the trailing slash (`/tags/`), item routes do not
//! (`/tags/{id}`), matching the real backend.

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use shared::models::{
    Call, CallCreate, CallId, CallUpdate, Tag, TagCreate, TagId, TagUpdate, Task, TaskCreate,
    TaskId, TaskUpdate,
};

use crate::error::{MockError, MockResult};
use crate::state::{MockBackend, RecordedRequest};

/// Build the router over an existing backend handle
pub fn router_with(backend: MockBackend) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(connectivity))
        .route("/tags/", get(list_tags).post(create_tag))
        .route("/tags/{id}", get(get_tag).put(update_tag))
        .route("/calls/", get(list_calls).post(create_call))
        .route("/calls/{id}", get(get_call).put(update_call))
        .route("/tasks/", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).put(update_task))
        .layer(middleware::from_fn_with_state(
            backend.clone(),
            record_and_inject,
        ))
        .with_state(backend)
}

/// Records every request and answers injected faults before routing
async fn record_and_inject(
    State(backend): State<MockBackend>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => return MockError::BadRequest(e.to_string()).into_response(),
    };

    let path = parts.uri.path().to_string();
    backend
        .record(RecordedRequest {
            method: parts.method.clone(),
            path: path.clone(),
            body: serde_json::from_slice(&bytes).ok(),
        })
        .await;

    if backend.take_fault(&parts.method, &path).await {
        tracing::warn!("Injected failure for {} {}", parts.method, path);
        return MockError::Injected.into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to Call Center API",
        "version": "1.0.0",
        "status": "running"
    }))
}

async fn connectivity() -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": "API is working correctly"
    }))
}

// ========== Tags ==========

async fn list_tags(State(backend): State<MockBackend>) -> Json<Vec<Tag>> {
    Json(backend.list_tags().await)
}

async fn get_tag(
    State(backend): State<MockBackend>,
    Path(id): Path<TagId>,
) -> MockResult<Json<Tag>> {
    Ok(Json(backend.get_tag(id).await?))
}

async fn create_tag(
    State(backend): State<MockBackend>,
    Json(payload): Json<TagCreate>,
) -> MockResult<Json<Tag>> {
    let tag = backend.create_tag(payload).await?;
    tracing::info!("Created tag {} ({})", tag.id, tag.name);
    Ok(Json(tag))
}

async fn update_tag(
    State(backend): State<MockBackend>,
    Path(id): Path<TagId>,
    Json(payload): Json<TagUpdate>,
) -> MockResult<Json<Tag>> {
    Ok(Json(backend.update_tag(id, payload).await?))
}

// ========== Calls ==========

async fn list_calls(State(backend): State<MockBackend>) -> Json<Vec<Call>> {
    Json(backend.list_calls().await)
}

async fn get_call(
    State(backend): State<MockBackend>,
    Path(id): Path<CallId>,
) -> MockResult<Json<Call>> {
    Ok(Json(backend.get_call(id).await?))
}

async fn create_call(
    State(backend): State<MockBackend>,
    Json(payload): Json<CallCreate>,
) -> MockResult<Json<Call>> {
    let call = backend.create_call(payload).await?;
    tracing::info!("Created call {} ({})", call.id, call.title);
    Ok(Json(call))
}

async fn update_call(
    State(backend): State<MockBackend>,
    Path(id): Path<CallId>,
    Json(payload): Json<CallUpdate>,
) -> MockResult<Json<Call>> {
    Ok(Json(backend.update_call(id, payload).await?))
}

// ========== Tasks ==========

async fn list_tasks(State(backend): State<MockBackend>) -> Json<Vec<Task>> {
    Json(backend.list_tasks().await)
}

async fn get_task(
    State(backend): State<MockBackend>,
    Path(id): Path<TaskId>,
) -> MockResult<Json<Task>> {
    Ok(Json(backend.get_task(id).await?))
}

async fn create_task(
    State(backend): State<MockBackend>,
    Json(payload): Json<TaskCreate>,
) -> MockResult<Json<Task>> {
    Ok(Json(backend.create_task(payload).await?))
}

async fn update_task(
    State(backend): State<MockBackend>,
    Path(id): Path<TaskId>,
    Json(payload): Json<TaskUpdate>,
) -> MockResult<Json<Task>> {
    Ok(Json(backend.update_task(id, payload).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_tags() {
        let backend = MockBackend::new();
        let app = router_with(backend.clone());

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/tags/", json!({ "name": "Billing" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let recorded = backend.requests().await;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].path, "/tags/");
        assert_eq!(recorded[0].body, Some(json!({ "name": "Billing" })));
        assert_eq!(backend.list_tags().await.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_call_is_404_with_detail() {
        let app = router_with(MockBackend::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/calls/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "detail": "Call not found" }));
    }

    #[tokio::test]
    async fn test_injected_fault_returns_500() {
        let backend = MockBackend::new();
        backend.fail_next(Method::GET, "/tasks/").await;
        let app = router_with(backend);

        let request = || Request::builder().uri("/tasks/").body(Body::empty()).unwrap();
        let first = app.clone().oneshot(request()).await.unwrap();
        assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let second = app.oneshot(request()).await.unwrap();
        assert_eq!(second.status(), StatusCode::OK);
    }
}
