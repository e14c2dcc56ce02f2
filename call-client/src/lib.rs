//! Call Client - typed HTTP client for the call center backend
//!
//! One function per backend operation on [`CallCenterApi`], generic over the
//! transport ([`HttpClient`]). Every non-2xx response is surfaced as
//! [`ClientError::Status`]; nothing is cached and nothing is retried.

pub mod api;
pub mod client;
pub mod config;
pub mod error;

pub use api::CallCenterApi;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::StatusCode;

// Re-export shared types for convenience
pub use shared::models::{
    Call, CallId, CallUpdate, Tag, TagId, Task, TaskId, TaskStatus, TaskUpdate,
};
pub use shared::response::ServerStatus;
