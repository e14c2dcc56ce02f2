//! Call Desk
//!
//! Terminal front end for the call center backend. Administrators manage
//! tags; users create calls, add tasks, move tasks through their statuses
//! and assign tags to calls.
//!
//! Each page is a small unidirectional data-flow module: an explicit state
//! struct, a pure `update` reducer, and command values that perform the
//! backend requests and feed their results back as messages.

pub mod app;
pub mod config;
pub mod logger;
pub mod modal;
pub mod pages;
pub mod status;
pub mod tui;

pub use app::{App, AppCommand, AppMsg, PageCommand, PageMsg, PageState, View};
pub use config::{Config, ConfigError};
pub use pages::{Effect, Page, settle};
