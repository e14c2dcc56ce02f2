//! Page stores
//!
//! A page owns its slice of server-mirrored state. User input and server
//! responses both arrive as messages; `update` mutates the state and
//! returns the commands to run next. Commands are the only place requests
//! are issued.

pub mod admin;
pub mod user;

use std::collections::VecDeque;

use async_trait::async_trait;
use call_client::{CallCenterApi, ClientError, HttpClient};

pub use admin::{AdminCommand, AdminMsg, AdminState, TagEdit};
pub use user::{CallDetails, UserCommand, UserDialog, UserMsg, UserState};

/// State + reducer of one page
pub trait Page {
    type Msg: Send + 'static;
    type Command: Effect<Msg = Self::Msg>;

    fn update(&mut self, msg: Self::Msg) -> Vec<Self::Command>;
}

/// A pending backend operation
#[async_trait]
pub trait Effect: Send + 'static {
    type Msg: Send + 'static;

    /// Run the request(s) and turn the outcome into a message
    async fn perform<C: HttpClient>(self, api: &CallCenterApi<C>) -> Self::Msg;
}

/// Feed `msg` to the page and run every resulting command, one after the
/// other, until nothing is left to do.
pub async fn settle<P, C>(page: &mut P, api: &CallCenterApi<C>, msg: P::Msg)
where
    P: Page,
    C: HttpClient,
{
    let mut queue = VecDeque::from([msg]);
    while let Some(msg) = queue.pop_front() {
        for command in page.update(msg) {
            queue.push_back(command.perform(api).await);
        }
    }
}

/// Inline error text for a failed operation
pub(crate) fn failure_message(action: &str, err: &ClientError) -> String {
    match err {
        ClientError::Status { detail, .. } => format!("Failed to {}: {}", action, detail),
        ClientError::Http(_) => format!(
            "Failed to {}. Make sure your backend is running.",
            action
        ),
        _ => format!("Failed to {}. Check the logs for details.", action),
    }
}

/// Draft text as it will be sent, or `None` when it is blank
pub(crate) fn committed_text(draft: &str) -> Option<String> {
    let trimmed = draft.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
