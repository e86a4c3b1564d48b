//! Port for record persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::record::{NewRecord, Record, RecordWithRelations};

/// Errors raised by record repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordRepositoryError {
    /// Repository connection could not be established.
    #[error("record repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("record repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,
}

impl RecordRepositoryError {
    /// Build a [`RecordRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`RecordRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for record storage and retrieval.
///
/// Reads return the denormalised shape the grids consume: the record plus
/// user and category projections in a single round trip.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// List all records with their embeds, unpaginated and unfiltered.
    async fn list(&self) -> Result<Vec<RecordWithRelations>, RecordRepositoryError>;

    /// Fetch a single record with its embeds.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<RecordWithRelations>, RecordRepositoryError>;

    /// Insert a record and return the created row.
    async fn create(&self, record: NewRecord) -> Result<Record, RecordRepositoryError>;

    /// Full-field update by primary key, returning the updated row.
    ///
    /// Returns [`RecordRepositoryError::NotFound`] when no row matches.
    async fn update(&self, id: Uuid, record: NewRecord) -> Result<Record, RecordRepositoryError>;

    /// Hard-delete a record by primary key.
    ///
    /// Returns [`RecordRepositoryError::NotFound`] when no row matches.
    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError>;

    /// Group all records by category id and count each group. Categories
    /// with zero records do not appear.
    async fn count_by_category(&self) -> Result<Vec<(Uuid, i64)>, RecordRepositoryError>;
}

/// Fixture implementation for wiring the server without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecordRepository;

#[async_trait]
impl RecordRepository for FixtureRecordRepository {
    async fn list(&self) -> Result<Vec<RecordWithRelations>, RecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: Uuid,
    ) -> Result<Option<RecordWithRelations>, RecordRepositoryError> {
        Ok(None)
    }

    async fn create(&self, record: NewRecord) -> Result<Record, RecordRepositoryError> {
        Ok(Record {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            category_id: record.category_id,
            date_record: record.date_record,
            comments: record.comments,
            image: record.image,
            code: record.code,
            created_at: chrono::Utc::now(),
        })
    }

    async fn update(
        &self,
        _id: Uuid,
        _record: NewRecord,
    ) -> Result<Record, RecordRepositoryError> {
        Err(RecordRepositoryError::NotFound)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RecordRepositoryError> {
        Err(RecordRepositoryError::NotFound)
    }

    async fn count_by_category(&self) -> Result<Vec<(Uuid, i64)>, RecordRepositoryError> {
        Ok(Vec::new())
    }
}
