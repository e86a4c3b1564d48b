//! Port for category persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::category::{Category, NewCategory};

/// Errors raised by category repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryRepositoryError {
    /// Repository connection could not be established.
    #[error("category repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("category repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// The targeted category does not exist.
    #[error("category not found")]
    NotFound,
}

impl CategoryRepositoryError {
    /// Build a [`CategoryRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`CategoryRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for category storage and retrieval.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories, unpaginated.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Insert a category and return the created row.
    async fn create(&self, category: NewCategory) -> Result<Category, CategoryRepositoryError>;

    /// Rename a category by primary key and return the updated row.
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] when no row matches.
    async fn update_name(&self, id: Uuid, name: &str)
        -> Result<Category, CategoryRepositoryError>;

    /// Hard-delete a category by primary key.
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] when no row matches.
    async fn delete(&self, id: Uuid) -> Result<(), CategoryRepositoryError>;

    /// Resolve display names for the given category ids. Ids with no matching
    /// row are simply absent from the result.
    async fn names_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, String)>, CategoryRepositoryError>;
}

/// Fixture implementation for wiring the server without a database.
///
/// Reads return empty sets, writes report [`CategoryRepositoryError::NotFound`]
/// or succeed with an echo of the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCategoryRepository;

#[async_trait]
impl CategoryRepository for FixtureCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, category: NewCategory) -> Result<Category, CategoryRepositoryError> {
        Ok(Category {
            id: Uuid::new_v4(),
            name: category.name,
            description: category.description,
        })
    }

    async fn update_name(
        &self,
        _id: Uuid,
        _name: &str,
    ) -> Result<Category, CategoryRepositoryError> {
        Err(CategoryRepositoryError::NotFound)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), CategoryRepositoryError> {
        Err(CategoryRepositoryError::NotFound)
    }

    async fn names_by_ids(
        &self,
        _ids: &[Uuid],
    ) -> Result<Vec<(Uuid, String)>, CategoryRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_create_echoes_the_input() {
        let repo = FixtureCategoryRepository;
        let created = repo
            .create(NewCategory {
                name: "Gear".into(),
                description: "Kit".into(),
            })
            .await
            .expect("fixture create succeeds");
        assert_eq!(created.name, "Gear");
        assert_eq!(created.description, "Kit");
    }

    #[tokio::test]
    async fn fixture_update_reports_not_found() {
        let repo = FixtureCategoryRepository;
        let err = repo
            .update_name(Uuid::new_v4(), "Gear2")
            .await
            .expect_err("fixture has no rows");
        assert_eq!(err, CategoryRepositoryError::NotFound);
    }

    #[test]
    fn error_constructors_carry_the_message() {
        let err = CategoryRepositoryError::connection("refused");
        assert!(err.to_string().contains("refused"));
    }
}
