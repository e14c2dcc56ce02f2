//! Call center API
//!
//! One method per backend operation. Each issues exactly one request and
//! decodes the response; callers decide what to reload afterwards.

use shared::models::{
    Call, CallCreate, CallId, CallUpdate, Tag, TagCreate, TagId, TagUpdate, Task, TaskCreate,
    TaskId, TaskUpdate,
};
use shared::response::ServerStatus;

use crate::{ClientResult, HttpClient};

/// Typed facade over an [`HttpClient`] transport
#[derive(Debug, Clone)]
pub struct CallCenterApi<C> {
    http: C,
}

impl<C: HttpClient> CallCenterApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &C {
        &self.http
    }

    /// Connectivity check, `GET /test`
    pub async fn ping(&self) -> ClientResult<ServerStatus> {
        self.http.get("test").await
    }

    // ========== Tags ==========

    pub async fn get_tags(&self) -> ClientResult<Vec<Tag>> {
        self.http.get("tags/").await
    }

    pub async fn get_tag(&self, id: TagId) -> ClientResult<Tag> {
        self.http.get(&format!("tags/{}", id)).await
    }

    /// The caller is responsible for passing a non-empty, trimmed name.
    pub async fn create_tag(&self, name: &str) -> ClientResult<Tag> {
        let body = TagCreate {
            name: name.to_string(),
        };
        self.http.post("tags/", &body).await
    }

    pub async fn update_tag(&self, id: TagId, name: &str) -> ClientResult<Tag> {
        let body = TagUpdate {
            name: name.to_string(),
        };
        self.http.put(&format!("tags/{}", id), &body).await
    }

    // ========== Calls ==========

    pub async fn get_calls(&self) -> ClientResult<Vec<Call>> {
        self.http.get("calls/").await
    }

    /// Full call record with embedded tags
    pub async fn get_call(&self, id: CallId) -> ClientResult<Call> {
        self.http.get(&format!("calls/{}", id)).await
    }

    /// New calls always start without tags.
    pub async fn create_call(&self, title: &str) -> ClientResult<Call> {
        self.http.post("calls/", &CallCreate::untagged(title)).await
    }

    /// Replaces the title and the complete tag set of a call.
    pub async fn update_call(&self, id: CallId, update: &CallUpdate) -> ClientResult<Call> {
        self.http.put(&format!("calls/{}", id), update).await
    }

    // ========== Tasks ==========

    /// Every task of every call. There is no per-call query on the backend.
    pub async fn get_tasks(&self) -> ClientResult<Vec<Task>> {
        self.http.get("tasks/").await
    }

    pub async fn get_task(&self, id: TaskId) -> ClientResult<Task> {
        self.http.get(&format!("tasks/{}", id)).await
    }

    pub async fn create_task(&self, name: &str, call_id: CallId) -> ClientResult<Task> {
        let body = TaskCreate {
            name: name.to_string(),
            call_id: Some(call_id),
        };
        self.http.post("tasks/", &body).await
    }

    /// Partial update; fields left as `None` are not sent.
    pub async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> ClientResult<Task> {
        self.http.put(&format!("tasks/{}", id), update).await
    }
}
