//! Task Model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::call::CallId;

pub type TaskId = i64;

/// Task status
///
/// The backend only knows the three named states. Any other string is kept
/// verbatim in [`TaskStatus::Other`] so that an unexpected value never
/// breaks decoding of a whole task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Other(String),
}

impl TaskStatus {
    /// The states a user can pick, in display order
    pub const SELECTABLE: [TaskStatus; 3] =
        [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Other(raw) => raw,
        }
    }

    /// Next selectable state, wrapping around. Unknown states move to `Open`.
    pub fn next(&self) -> TaskStatus {
        match self {
            Self::Open => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed | Self::Other(_) => Self::Open,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Open" => Self::Open,
            "In Progress" => Self::InProgress,
            "Completed" => Self::Completed,
            _ => Self::Other(raw),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task entity, always scoped to a call once created from the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub call_id: Option<CallId>,
}

/// Create task payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCreate {
    pub name: String,
    pub call_id: Option<CallId>,
}

/// Update task payload
///
/// Partial: only the fields that are set go on the wire, and the backend
/// leaves the others untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<CallId>,
}

impl TaskUpdate {
    /// Status-only update
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Tasks belonging to `call_id`, ordered by task id.
///
/// The backend has no per-call task query, so the full collection is
/// filtered here. Ordering by id makes the result independent of the order
/// the collection arrived in.
pub fn tasks_for_call(tasks: &[Task], call_id: CallId) -> Vec<Task> {
    let mut scoped: Vec<Task> = tasks
        .iter()
        .filter(|t| t.call_id == Some(call_id))
        .cloned()
        .collect();
    scoped.sort_by_key(|t| t.id);
    scoped
}
