//! Categories that records are logged against.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Primary key.
    pub id: Uuid,
    /// Short display name.
    pub name: String,
    /// Free-form description shown in the category grid.
    pub description: String,
}

/// Fields required to insert a new category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Short display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}
