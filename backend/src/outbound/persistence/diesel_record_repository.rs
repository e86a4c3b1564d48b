//! PostgreSQL-backed `RecordRepository` implementation using Diesel ORM.
//!
//! Listing joins users and categories with LEFT JOINs so records survive the
//! deletion of either side; the missing embed comes back as `None`.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{NewRecord, Record, RecordCategory, RecordUser, RecordWithRelations};

use super::models::{NewRecordRow, RecordRow, RecordUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{categories, records, users};

/// Diesel-backed implementation of the `RecordRepository` port.
#[derive(Clone)]
pub struct DieselRecordRepository {
    pool: DbPool,
}

impl DieselRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecordRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RecordRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::NotFound => RecordRepositoryError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "record query lost connection");
            RecordRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "record query failed");
            RecordRepositoryError::query("database error")
        }
        other => {
            debug!(error = %other, "record query failed");
            RecordRepositoryError::query("database error")
        }
    }
}

type JoinedRow = (RecordRow, Option<(String, String)>, Option<String>);

fn assemble(row: JoinedRow) -> RecordWithRelations {
    let (record, user, category) = row;
    RecordWithRelations {
        record: record.into(),
        user: user.map(|(name, email)| RecordUser { name, email }),
        category: category.map(|name| RecordCategory { name }),
    }
}

#[async_trait]
impl RecordRepository for DieselRecordRepository {
    async fn list(&self) -> Result<Vec<RecordWithRelations>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = records::table
            .left_join(users::table)
            .left_join(categories::table)
            .select((
                RecordRow::as_select(),
                (users::name, users::email).nullable(),
                categories::name.nullable(),
            ))
            .order(records::created_at.desc())
            .load::<JoinedRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(assemble).collect())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<RecordWithRelations>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = records::table
            .left_join(users::table)
            .left_join(categories::table)
            .filter(records::id.eq(id))
            .select((
                RecordRow::as_select(),
                (users::name, users::email).nullable(),
                categories::name.nullable(),
            ))
            .first::<JoinedRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(assemble))
    }

    async fn create(&self, record: NewRecord) -> Result<Record, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(records::table)
            .values(NewRecordRow {
                id: Uuid::new_v4(),
                user_id: record.user_id,
                category_id: record.category_id,
                date_record: record.date_record,
                comments: &record.comments,
                image: record.image.as_deref(),
                code: &record.code,
            })
            .returning(RecordRow::as_returning())
            .get_result::<RecordRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, record: NewRecord) -> Result<Record, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(records::table.find(id))
            .set(RecordUpdate {
                user_id: record.user_id,
                category_id: record.category_id,
                date_record: record.date_record,
                comments: &record.comments,
                image: record.image.as_deref(),
                code: &record.code,
            })
            .returning(RecordRow::as_returning())
            .get_result::<RecordRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(records::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(RecordRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count_by_category(&self) -> Result<Vec<(Uuid, i64)>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        records::table
            .group_by(records::category_id)
            .select((records::category_id, count_star()))
            .load::<(Uuid, i64)>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn missing_embeds_assemble_to_none() {
        let row = RecordRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            date_record: Utc::now(),
            comments: "note".into(),
            image: None,
            code: "ab1cd".into(),
            created_at: Utc::now(),
        };
        let joined = assemble((row, None, None));
        assert!(joined.user.is_none());
        assert!(joined.category.is_none());
    }

    #[rstest]
    fn present_embeds_carry_the_projection() {
        let row = RecordRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            date_record: Utc::now(),
            comments: "note".into(),
            image: Some("/screenshots/1.png".into()),
            code: "ab1cd".into(),
            created_at: Utc::now(),
        };
        let joined = assemble((
            row,
            Some(("Ada".into(), "ada@example.com".into())),
            Some("Gear".into()),
        ));
        assert_eq!(joined.user.map(|user| user.name), Some("Ada".to_owned()));
        assert_eq!(
            joined.category.map(|category| category.name),
            Some("Gear".to_owned())
        );
    }

    #[rstest]
    fn not_found_maps_to_the_not_found_variant() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, RecordRepositoryError::NotFound));
    }
}
