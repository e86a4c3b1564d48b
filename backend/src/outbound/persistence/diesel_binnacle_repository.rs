//! PostgreSQL-backed `BinnacleRepository` implementation using Diesel ORM.
//!
//! The audit log is append-only: this adapter never updates or deletes rows.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{BinnacleRepository, BinnacleRepositoryError};
use crate::domain::{BinnacleActor, BinnacleEntry, BinnacleEntryWithUser, NewBinnacleEntry};

use super::models::{BinnacleRow, NewBinnacleRow};
use super::pool::{DbPool, PoolError};
use super::schema::{binnacles, users};

/// Diesel-backed implementation of the `BinnacleRepository` port.
#[derive(Clone)]
pub struct DieselBinnacleRepository {
    pool: DbPool,
}

impl DieselBinnacleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BinnacleRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            BinnacleRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> BinnacleRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "binnacle query lost connection");
            BinnacleRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "binnacle query failed");
            BinnacleRepositoryError::query("database error")
        }
        other => {
            debug!(error = %other, "binnacle query failed");
            BinnacleRepositoryError::query("database error")
        }
    }
}

#[async_trait]
impl BinnacleRepository for DieselBinnacleRepository {
    async fn append(
        &self,
        entry: NewBinnacleEntry,
    ) -> Result<BinnacleEntry, BinnacleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(binnacles::table)
            .values(NewBinnacleRow {
                id: Uuid::new_v4(),
                user_id: entry.user_id,
                action: &entry.action,
                details: entry.details.as_deref(),
            })
            .returning(BinnacleRow::as_returning())
            .get_result::<BinnacleRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn list_with_user(&self) -> Result<Vec<BinnacleEntryWithUser>, BinnacleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = binnacles::table
            .left_join(users::table)
            .select((
                BinnacleRow::as_select(),
                (users::name, users::email).nullable(),
            ))
            .order(binnacles::created_at.desc())
            .load::<(BinnacleRow, Option<(String, String)>)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(entry, user)| BinnacleEntryWithUser {
                entry: entry.into(),
                user: user.map(|(name, email)| BinnacleActor { name, email }),
            })
            .collect())
    }
}
