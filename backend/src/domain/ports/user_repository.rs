//! Port for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::User;

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// The targeted user does not exist.
    #[error("user not found")]
    NotFound,
}

impl UserRepositoryError {
    /// Build a [`UserRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`UserRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for user storage and retrieval.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users, unpaginated.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Hard-delete a user by primary key, returning the deleted row.
    ///
    /// No cascade runs: records and binnacle entries keep their dangling
    /// `userId` values.
    async fn delete(&self, id: Uuid) -> Result<User, UserRepositoryError>;
}

/// Fixture implementation for wiring the server without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _id: Uuid) -> Result<User, UserRepositoryError> {
        Err(UserRepositoryError::NotFound)
    }
}
