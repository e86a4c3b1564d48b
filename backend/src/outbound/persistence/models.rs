//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{BinnacleEntry, Category, Record, User};

use super::schema::{binnacles, categories, records, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

// ---------------------------------------------------------------------------
// Category models
// ---------------------------------------------------------------------------

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

/// Insertable struct for creating new category rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
}

// ---------------------------------------------------------------------------
// Record models
// ---------------------------------------------------------------------------

/// Row struct for reading from the records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecordRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub date_record: DateTime<Utc>,
    pub comments: String,
    pub image: Option<String>,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            category_id: row.category_id,
            date_record: row.date_record,
            comments: row.comments,
            image: row.image,
            code: row.code,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating new record rows. `created_at` comes from
/// the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = records)]
pub(crate) struct NewRecordRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub date_record: DateTime<Utc>,
    pub comments: &'a str,
    pub image: Option<&'a str>,
    pub code: &'a str,
}

/// Changeset for full-field record updates. `treat_none_as_null` makes a
/// `None` image clear the column instead of leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = records)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct RecordUpdate<'a> {
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub date_record: DateTime<Utc>,
    pub comments: &'a str,
    pub image: Option<&'a str>,
    pub code: &'a str,
}

// ---------------------------------------------------------------------------
// Binnacle models
// ---------------------------------------------------------------------------

/// Row struct for reading from the binnacles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = binnacles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BinnacleRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BinnacleRow> for BinnacleEntry {
    fn from(row: BinnacleRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            action: row.action,
            details: row.details,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for appending audit entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = binnacles)]
pub(crate) struct NewBinnacleRow<'a> {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: &'a str,
    pub details: Option<&'a str>,
}
