//! Port for the append-only binnacle store.

use async_trait::async_trait;

use crate::domain::binnacle::{BinnacleEntry, BinnacleEntryWithUser, NewBinnacleEntry};

/// Errors raised by binnacle repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BinnacleRepositoryError {
    /// Repository connection could not be established.
    #[error("binnacle repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("binnacle repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl BinnacleRepositoryError {
    /// Build a [`BinnacleRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`BinnacleRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for the binnacle audit log.
///
/// The store is append-only from the application's perspective: there is no
/// update or delete. The incoming `action` string is stored as-is with no
/// vocabulary validation.
#[async_trait]
pub trait BinnacleRepository: Send + Sync {
    /// Append an entry and return the created row.
    async fn append(
        &self,
        entry: NewBinnacleEntry,
    ) -> Result<BinnacleEntry, BinnacleRepositoryError>;

    /// List all entries with their actor projections, unpaginated.
    async fn list_with_user(&self)
        -> Result<Vec<BinnacleEntryWithUser>, BinnacleRepositoryError>;
}

/// Fixture implementation discarding appends, for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBinnacleRepository;

#[async_trait]
impl BinnacleRepository for FixtureBinnacleRepository {
    async fn append(
        &self,
        entry: NewBinnacleEntry,
    ) -> Result<BinnacleEntry, BinnacleRepositoryError> {
        Ok(BinnacleEntry {
            id: uuid::Uuid::new_v4(),
            user_id: entry.user_id,
            action: entry.action,
            details: entry.details,
            created_at: chrono::Utc::now(),
        })
    }

    async fn list_with_user(
        &self,
    ) -> Result<Vec<BinnacleEntryWithUser>, BinnacleRepositoryError> {
        Ok(Vec::new())
    }
}
