//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, NewCategory};

use super::models::{CategoryRow, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CategoryRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::NotFound => CategoryRepositoryError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "category query lost connection");
            CategoryRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "category query failed");
            CategoryRepositoryError::query("database error")
        }
        other => {
            debug!(error = %other, "category query failed");
            CategoryRepositoryError::query("database error")
        }
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = categories::table
            .select(CategoryRow::as_select())
            .order(categories::name.asc())
            .load::<CategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create(&self, category: NewCategory) -> Result<Category, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(categories::table)
            .values(NewCategoryRow {
                id: Uuid::new_v4(),
                name: &category.name,
                description: &category.description,
            })
            .returning(CategoryRow::as_returning())
            .get_result::<CategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn update_name(&self, id: Uuid, name: &str) -> Result<Category, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(categories::table.find(id))
            .set(categories::name.eq(name))
            .returning(CategoryRow::as_returning())
            .get_result::<CategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(categories::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(CategoryRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn names_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, String)>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        categories::table
            .filter(categories::id.eq_any(ids))
            .select((categories::id, categories::name))
            .load::<(Uuid, String)>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
