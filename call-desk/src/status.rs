//! Visual weight of task statuses

use shared::models::TaskStatus;

/// How loudly a status should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Needs someone to pick it up
    Attention,
    /// Being worked on
    Caution,
    /// Done
    Success,
    /// Unknown value from the backend
    Neutral,
}

pub fn tone(status: &TaskStatus) -> StatusTone {
    match status {
        TaskStatus::Open => StatusTone::Attention,
        TaskStatus::InProgress => StatusTone::Caution,
        TaskStatus::Completed => StatusTone::Success,
        TaskStatus::Other(_) => StatusTone::Neutral,
    }
}
