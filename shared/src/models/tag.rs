//! Tag Model

use serde::{Deserialize, Serialize};

pub type TagId = i64;

/// Tag entity, a named label assignable to calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Create tag payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
}

/// Update tag payload (name is the only mutable field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUpdate {
    pub name: String,
}
