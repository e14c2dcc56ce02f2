// call-client/tests/api_oneshot.rs
// API contract against the in-memory backend

use axum::http::Method;
use call_center_mock::{MockBackend, router_with};
use call_client::{
    CallCenterApi, CallUpdate, ClientError, OneshotHttpClient, Tag, TaskStatus, TaskUpdate,
};
use serde_json::json;

fn api_for(backend: &MockBackend) -> CallCenterApi<OneshotHttpClient> {
    CallCenterApi::new(OneshotHttpClient::new(router_with(backend.clone())))
}

#[tokio::test]
async fn test_ping() {
    let backend = MockBackend::new();
    let status = api_for(&backend).ping().await.unwrap();
    assert_eq!(status.status, "success");
}

#[tokio::test]
async fn test_tag_create_update_and_reload() {
    let backend = MockBackend::new();
    let api = api_for(&backend);

    let created = api.create_tag("Billing").await.unwrap();
    let renamed = api.update_tag(created.id, "Payments").await.unwrap();
    assert_eq!(renamed.id, created.id);

    let tags = api.get_tags().await.unwrap();
    assert_eq!(
        tags,
        vec![Tag {
            id: created.id,
            name: "Payments".into()
        }]
    );
    assert_eq!(api.get_tag(created.id).await.unwrap().name, "Payments");
}

#[tokio::test]
async fn test_requests_match_wire_contract() {
    let backend = MockBackend::new();
    let api = api_for(&backend);

    let call = api.create_call("Order #9").await.unwrap();
    assert!(call.tags.is_empty());
    api.create_task("Call back", call.id).await.unwrap();
    api.update_call(
        call.id,
        &CallUpdate {
            title: "Order #9".into(),
            tag_ids: vec![],
        },
    )
    .await
    .unwrap();

    let call_path = format!("/calls/{}", call.id);
    let recorded = backend.requests().await;
    let summary: Vec<(Method, &str)> = recorded
        .iter()
        .map(|r| (r.method.clone(), r.path.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Method::POST, "/calls/"),
            (Method::POST, "/tasks/"),
            (Method::PUT, call_path.as_str()),
        ]
    );
    assert_eq!(recorded[0].body, Some(json!({ "title": "Order #9", "tag_ids": [] })));
    assert_eq!(
        recorded[1].body,
        Some(json!({ "name": "Call back", "call_id": call.id }))
    );
}

#[tokio::test]
async fn test_task_status_update_is_partial() {
    let backend = MockBackend::new();
    let api = api_for(&backend);

    let call = api.create_call("Refund").await.unwrap();
    let task = api.create_task("Check invoice", call.id).await.unwrap();
    assert_eq!(task.status, TaskStatus::Open);

    let updated = api
        .update_task(task.id, &TaskUpdate::status(TaskStatus::InProgress))
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.name, "Check invoice");
    assert_eq!(updated.call_id, Some(call.id));

    let last = backend.requests().await.pop().unwrap();
    assert_eq!(last.body, Some(json!({ "status": "In Progress" })));
}

#[tokio::test]
async fn test_error_statuses_are_not_success() {
    let backend = MockBackend::new();
    let api = api_for(&backend);

    let err = api.get_call(404).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.detail(), Some("Call not found"));

    api.create_tag("Urgent").await.unwrap();
    let err = api.create_tag("Urgent").await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert_eq!(err.detail(), Some("Tag with this name already exists"));

    backend.fail_next(Method::GET, "/tags/").await;
    let err = api.get_tags().await.unwrap_err();
    assert!(matches!(err, ClientError::Status { .. }));
}
