//! Backend state held in memory

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use axum::http::Method;
use shared::models::{
    Call, CallCreate, CallId, CallUpdate, Tag, TagCreate, TagId, TagUpdate, Task, TaskCreate,
    TaskId, TaskStatus, TaskUpdate,
};
use tokio::sync::{Mutex, RwLock};

use crate::error::{MockError, MockResult};

/// A request as seen by the backend, for assertions in tests
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
struct StoredCall {
    title: String,
    tag_ids: BTreeSet<TagId>,
}

#[derive(Debug, Default)]
struct Store {
    tags: BTreeMap<TagId, Tag>,
    calls: BTreeMap<CallId, StoredCall>,
    tasks: BTreeMap<TaskId, Task>,
    last_tag_id: TagId,
    last_call_id: CallId,
    last_task_id: TaskId,
}

impl Store {
    fn known_tags(&self, ids: &[TagId]) -> BTreeSet<TagId> {
        ids.iter()
            .copied()
            .filter(|id| self.tags.contains_key(id))
            .collect()
    }

    fn render_call(&self, id: CallId, call: &StoredCall) -> Call {
        Call {
            id,
            title: call.title.clone(),
            tags: call
                .tag_ids
                .iter()
                .filter_map(|tag_id| self.tags.get(tag_id).cloned())
                .collect(),
            tasks: self
                .tasks
                .values()
                .filter(|t| t.call_id == Some(id))
                .cloned()
                .collect(),
        }
    }

    fn name_taken(&self, name: &str, except: Option<TagId>) -> bool {
        self.tags
            .values()
            .any(|t| t.name == name && Some(t.id) != except)
    }
}

#[derive(Debug)]
struct Fault {
    method: Method,
    path: String,
}

/// Handle on the in-memory backend
///
/// Cloning is cheap; all clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    store: Arc<RwLock<Store>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    faults: Arc<Mutex<Vec<Fault>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Test hooks ==========

    /// Every request received so far, oldest first
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn clear_requests(&self) {
        self.requests.lock().await.clear();
    }

    /// Make the next `method path` request fail with a 500
    pub async fn fail_next(&self, method: Method, path: impl Into<String>) {
        self.faults.lock().await.push(Fault {
            method,
            path: path.into(),
        });
    }

    pub(crate) async fn record(&self, request: RecordedRequest) {
        self.requests.lock().await.push(request);
    }

    /// Consume a matching injected fault, if any
    pub(crate) async fn take_fault(&self, method: &Method, path: &str) -> bool {
        let mut faults = self.faults.lock().await;
        match faults
            .iter()
            .position(|f| &f.method == method && f.path == path)
        {
            Some(index) => {
                faults.remove(index);
                true
            }
            None => false,
        }
    }

    /// Insert a tag with a fixed id
    pub async fn seed_tag(&self, tag: Tag) {
        let mut store = self.store.write().await;
        store.last_tag_id = store.last_tag_id.max(tag.id);
        store.tags.insert(tag.id, tag);
    }

    /// Insert a call with a fixed id. Embedded tags must already exist.
    pub async fn seed_call(&self, call: Call) {
        let mut store = self.store.write().await;
        store.last_call_id = store.last_call_id.max(call.id);
        let tag_ids = store.known_tags(&call.tag_ids());
        store.calls.insert(
            call.id,
            StoredCall {
                title: call.title,
                tag_ids,
            },
        );
    }

    /// Insert a task with a fixed id
    pub async fn seed_task(&self, task: Task) {
        let mut store = self.store.write().await;
        store.last_task_id = store.last_task_id.max(task.id);
        store.tasks.insert(task.id, task);
    }

    // ========== Tags ==========

    pub async fn list_tags(&self) -> Vec<Tag> {
        self.store.read().await.tags.values().cloned().collect()
    }

    pub async fn get_tag(&self, id: TagId) -> MockResult<Tag> {
        self.store
            .read()
            .await
            .tags
            .get(&id)
            .cloned()
            .ok_or(MockError::NotFound("Tag"))
    }

    pub async fn create_tag(&self, payload: TagCreate) -> MockResult<Tag> {
        let mut store = self.store.write().await;
        if store.name_taken(&payload.name, None) {
            return Err(MockError::BadRequest(
                "Tag with this name already exists".into(),
            ));
        }
        store.last_tag_id += 1;
        let tag = Tag {
            id: store.last_tag_id,
            name: payload.name,
        };
        store.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    pub async fn update_tag(&self, id: TagId, payload: TagUpdate) -> MockResult<Tag> {
        let mut store = self.store.write().await;
        if !store.tags.contains_key(&id) {
            return Err(MockError::NotFound("Tag"));
        }
        if !payload.name.is_empty() {
            if store.name_taken(&payload.name, Some(id)) {
                return Err(MockError::BadRequest(
                    "Tag with this name already exists".into(),
                ));
            }
            if let Some(tag) = store.tags.get_mut(&id) {
                tag.name = payload.name;
            }
        }
        store
            .tags
            .get(&id)
            .cloned()
            .ok_or(MockError::NotFound("Tag"))
    }

    // ========== Calls ==========

    pub async fn list_calls(&self) -> Vec<Call> {
        let store = self.store.read().await;
        store
            .calls
            .iter()
            .map(|(id, call)| store.render_call(*id, call))
            .collect()
    }

    pub async fn get_call(&self, id: CallId) -> MockResult<Call> {
        let store = self.store.read().await;
        let call = store.calls.get(&id).ok_or(MockError::NotFound("Call"))?;
        Ok(store.render_call(id, call))
    }

    pub async fn create_call(&self, payload: CallCreate) -> MockResult<Call> {
        let mut store = self.store.write().await;
        store.last_call_id += 1;
        let id = store.last_call_id;
        let call = StoredCall {
            title: payload.title,
            tag_ids: store.known_tags(&payload.tag_ids),
        };
        let rendered = store.render_call(id, &call);
        store.calls.insert(id, call);
        Ok(rendered)
    }

    /// Replaces the title and the whole tag set
    pub async fn update_call(&self, id: CallId, payload: CallUpdate) -> MockResult<Call> {
        let mut store = self.store.write().await;
        if !store.calls.contains_key(&id) {
            return Err(MockError::NotFound("Call"));
        }
        let call = StoredCall {
            title: payload.title,
            tag_ids: store.known_tags(&payload.tag_ids),
        };
        let rendered = store.render_call(id, &call);
        store.calls.insert(id, call);
        Ok(rendered)
    }

    // ========== Tasks ==========

    pub async fn list_tasks(&self) -> Vec<Task> {
        self.store.read().await.tasks.values().cloned().collect()
    }

    pub async fn get_task(&self, id: TaskId) -> MockResult<Task> {
        self.store
            .read()
            .await
            .tasks
            .get(&id)
            .cloned()
            .ok_or(MockError::NotFound("Task"))
    }

    pub async fn create_task(&self, payload: TaskCreate) -> MockResult<Task> {
        let mut store = self.store.write().await;
        store.last_task_id += 1;
        let task = Task {
            id: store.last_task_id,
            name: payload.name,
            status: TaskStatus::Open,
            call_id: payload.call_id,
        };
        store.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    /// Applies only the fields present in the payload
    pub async fn update_task(&self, id: TaskId, payload: TaskUpdate) -> MockResult<Task> {
        if let Some(TaskStatus::Other(raw)) = &payload.status {
            return Err(MockError::Unprocessable(format!(
                "Invalid task status: {}",
                raw
            )));
        }

        let mut store = self.store.write().await;
        let task = store.tasks.get_mut(&id).ok_or(MockError::NotFound("Task"))?;
        if let Some(name) = payload.name {
            task.name = name;
        }
        if let Some(status) = payload.status {
            task.status = status;
        }
        if let Some(call_id) = payload.call_id {
            task.call_id = Some(call_id);
        }
        Ok(task.clone())
    }
}
