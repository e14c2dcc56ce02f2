//! Call Model

use serde::{Deserialize, Serialize};

use super::tag::{Tag, TagId};
use super::task::Task;

pub type CallId = i64;

/// Call entity, the top-level unit of work
///
/// Tags come back embedded; tasks are embedded only by backends that choose
/// to, so both default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub id: CallId,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Call {
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

/// Create call payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallCreate {
    pub title: String,
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
}

impl CallCreate {
    /// New calls always start without tags
    pub fn untagged(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tag_ids: Vec::new(),
        }
    }
}

/// Update call payload
///
/// Replace semantics: the title and the complete tag-id set are always
/// sent together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallUpdate {
    pub title: String,
    pub tag_ids: Vec<TagId>,
}
