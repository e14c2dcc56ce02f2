//! Data models
//!
//! Wire shapes of the call center backend. All IDs are `i64` and are
//! always assigned by the backend.

pub mod call;
pub mod tag;
pub mod task;

// Re-exports
pub use call::*;
pub use tag::*;
pub use task::*;
