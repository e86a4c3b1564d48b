//! User API handlers.
//!
//! Users are provisioned by the identity layer, so the API only lists and
//! deletes them. Deletion failures are reported with a single opaque message
//! rather than leaking why the row could not be removed.

use actix_web::{delete, get, web};
use tracing::error;
use uuid::Uuid;

use crate::domain::{Error, User};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List all users.
#[get("/user")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list().await.map_err(|err| {
        error!(error = %err, "failed to fetch users");
        Error::internal("Failed to fetch users")
    })?;
    Ok(web::Json(users))
}

/// Delete a user and return the removed row.
///
/// Every failure, a missing row included, maps to the same 500 envelope.
/// User deletion is not audited.
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<User>> {
    let deleted = state
        .users
        .delete(path.into_inner())
        .await
        .map_err(|err| {
            error!(error = %err, "failed to delete user");
            Error::internal("Could not delete user")
        })?;
    Ok(web::Json(deleted))
}
