//! Binnacle entries: the append-only audit log.
//!
//! Every mutating handler appends one entry after its primary write commits.
//! Entries are never updated or deleted by the application; the dashboard
//! only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Action strings written by the application.
///
/// The binnacle store accepts arbitrary action strings; these constants are
/// the vocabulary the handlers use. `CREATE_RECORD` carries a trailing space
/// that existing stored entries and dashboard filters depend on.
pub mod actions {
    /// A user signed in.
    pub const SIGN_IN: &str = "Sign In";
    /// A category was created.
    pub const CREATE_CATEGORY: &str = "Create Category";
    /// A record was created. The trailing space is intentional.
    pub const CREATE_RECORD: &str = "Create Record ";
    /// A category was updated.
    pub const UPDATE_CATEGORY: &str = "Update Category";
    /// A record was updated.
    pub const UPDATE_RECORD: &str = "Update Record";
    /// A category was deleted.
    pub const DELETE_CATEGORY: &str = "Delete Category";
    /// A record was deleted.
    pub const DELETE_RECORD: &str = "Delete Record";
}

/// A stored binnacle entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinnacleEntry {
    /// Primary key.
    pub id: Uuid,
    /// Acting user, or `None` for unauthenticated callers.
    pub user_id: Option<Uuid>,
    /// Action string; not validated against [`actions`].
    pub action: String,
    /// Serialized JSON snapshot whose shape is per-action.
    pub details: Option<String>,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// Actor projection embedded in binnacle reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinnacleActor {
    /// Display name of the acting user.
    pub name: String,
    /// Email of the acting user.
    pub email: String,
}

/// A binnacle entry joined with its actor projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinnacleEntryWithUser {
    /// The entry itself, flattened into the same JSON object.
    #[serde(flatten)]
    pub entry: BinnacleEntry,
    /// Acting user projection; `None` when the entry has no actor or the
    /// actor was deleted.
    pub user: Option<BinnacleActor>,
}

/// Fields required to append a binnacle entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBinnacleEntry {
    /// Acting user, when known.
    pub user_id: Option<Uuid>,
    /// Action string, stored as-is.
    pub action: String,
    /// Serialized JSON details, if any.
    pub details: Option<String>,
}
