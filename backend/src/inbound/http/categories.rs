//! Category API handlers.
//!
//! ```text
//! GET    /category
//! POST   /category        {"name":"Gear","description":"Kit"}
//! PUT    /category/{id}   {"name":"Gear2"}
//! DELETE /category/{id}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::domain::binnacle::actions;
use crate::domain::ports::CategoryRepositoryError;
use crate::domain::{Category, Error, NewCategory};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Request body for `PUT /category/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    /// Replacement display name.
    pub name: String,
}

fn map_read_error(err: CategoryRepositoryError) -> Error {
    error!(error = %err, "failed to fetch categories");
    Error::internal("Failed to fetch categories")
}

fn map_write_error(err: CategoryRepositoryError, not_found: &str, other: &str) -> Error {
    match err {
        CategoryRepositoryError::NotFound => Error::not_found(not_found),
        other_err => {
            error!(error = %other_err, "category write failed");
            Error::internal(other)
        }
    }
}

/// Serialize an audit detail payload, falling back to an empty object if the
/// body cannot be serialized (it always can; the fallback avoids a panic
/// path).
fn details_json<T: Serialize>(body: &T) -> String {
    serde_json::to_string(body).unwrap_or_else(|_| "{}".to_owned())
}

/// List all categories.
#[get("/category")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Category>>> {
    let categories = state.categories.list().await.map_err(map_read_error)?;
    Ok(web::Json(categories))
}

/// Create a category and audit the request body.
#[post("/category")]
pub async fn create_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCategoryRequest>,
) -> ApiResult<web::Json<Category>> {
    let body = payload.into_inner();
    let category = state
        .categories
        .create(NewCategory {
            name: body.name.clone(),
            description: body.description.clone(),
        })
        .await
        .map_err(|err| {
            error!(error = %err, "failed to create category");
            Error::internal("Failed to create category")
        })?;

    state
        .audit
        .record(session.actor(), actions::CREATE_CATEGORY, details_json(&body))
        .await;

    Ok(web::Json(category))
}

/// Rename a category by primary key and audit the request body.
#[put("/category/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateCategoryRequest>,
) -> ApiResult<web::Json<Category>> {
    let id = path.into_inner();
    let body = payload.into_inner();
    let category = state
        .categories
        .update_name(id, &body.name)
        .await
        .map_err(|err| map_write_error(err, "Category not found", "Failed to update category"))?;

    state
        .audit
        .record(session.actor(), actions::UPDATE_CATEGORY, details_json(&body))
        .await;

    Ok(web::Json(category))
}

/// Hard-delete a category. The audit details carry the route parameters, not
/// the deleted entity.
#[delete("/category/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    state
        .categories
        .delete(id)
        .await
        .map_err(|err| map_write_error(err, "Category not found", "Failed to delete category"))?;

    state
        .audit
        .record(
            session.actor(),
            actions::DELETE_CATEGORY,
            json!({ "id": id }).to_string(),
        )
        .await;

    Ok(HttpResponse::NoContent().finish())
}
