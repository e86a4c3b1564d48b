//! Domain user identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user referenced by records and binnacle entries.
///
/// Users are hard-deleted independently of the rows that reference them; no
/// cascade exists, so `Record.userId` and `Binnacle.userId` can become
/// dangling after a delete. Read paths tolerate that by embedding the user
/// projection as an `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary key.
    pub id: Uuid,
    /// Display name shown in grids and audit views.
    pub name: String,
    /// Contact email.
    pub email: String,
}
