//! Shared types for Call Desk
//!
//! Domain models exchanged with the call center backend and the small
//! response envelopes it returns outside of the domain routes.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Call, CallCreate, CallId, CallUpdate, Tag, TagCreate, TagId, TagUpdate, Task, TaskCreate,
    TaskId, TaskStatus, TaskUpdate, tasks_for_call,
};
pub use response::{ErrorDetail, ServerStatus};
