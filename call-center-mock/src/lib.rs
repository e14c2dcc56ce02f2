//! In-memory stand-in for the call center backend
//!
//! Serves the same JSON routes as the real backend from process memory.
//! Used by the test suites (through `OneshotHttpClient`) and by the
//! `call-center-mock` binary for running the front end without a backend.

pub mod api;
pub mod error;
pub mod state;

pub use api::router_with;
pub use error::MockError;
pub use state::{MockBackend, RecordedRequest};

/// Router over a fresh, empty backend
pub fn router() -> axum::Router {
    router_with(MockBackend::new())
}
