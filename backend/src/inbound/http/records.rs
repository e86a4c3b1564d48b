//! Record API handlers.
//!
//! ```text
//! GET    /record
//! GET    /record/by-category
//! GET    /record/{id}
//! POST   /record       {"userId":...,"categoryId":...,"dateRecord":...,"comments":...,"image":...,"code":...}
//! PUT    /record/{id}  same fields
//! DELETE /record/{id}
//! ```
//!
//! `/record/by-category` must be registered before `/record/{id}` so the
//! literal segment is not consumed by the id matcher.

use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::domain::binnacle::actions;
use crate::domain::ports::{RecordRepositoryError, ScreenshotStore};
use crate::domain::report::{summarise_by_category, CategoryRecordCount};
use crate::domain::screenshot::DataUrlImage;
use crate::domain::{Error, NewRecord, Record, RecordWithRelations};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /record` and `PUT /record/{id}`.
///
/// `image` is either a plain URL (stored verbatim), a data-URL (decoded and
/// replaced with the stored URL), or absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    /// Owning user id.
    pub user_id: Uuid,
    /// Category id.
    pub category_id: Uuid,
    /// Observation timestamp.
    pub date_record: DateTime<Utc>,
    /// Free-form comment.
    pub comments: String,
    /// Screenshot: URL, data-URL, or absent.
    #[serde(default)]
    pub image: Option<String>,
    /// Caller-generated short code.
    pub code: String,
}

fn map_write_error(err: RecordRepositoryError, other: &str) -> Error {
    match err {
        RecordRepositoryError::NotFound => Error::not_found("Record not found"),
        other_err => {
            error!(error = %other_err, "record write failed");
            Error::internal(other)
        }
    }
}

/// Resolve the incoming `image` field to a stored URL.
///
/// A data-URL is decoded and written through the screenshot store; anything
/// else (plain URL, malformed data-URL, absent) passes through unchanged, so
/// resubmitting an already-stored URL is idempotent.
async fn resolve_image(
    store: &Arc<dyn ScreenshotStore>,
    image: Option<String>,
) -> ApiResult<Option<String>> {
    let Some(value) = image else {
        return Ok(None);
    };
    match DataUrlImage::parse(&value) {
        Some(decoded) => {
            let url = store
                .store(&decoded.extension, &decoded.bytes)
                .await
                .map_err(|err| {
                    error!(error = %err, "failed to store screenshot");
                    Error::internal("Failed to store screenshot")
                })?;
            Ok(Some(url))
        }
        None => Ok(Some(value)),
    }
}

fn audit_details(payload: &RecordPayload) -> String {
    json!({ "comments": payload.comments, "code": payload.code }).to_string()
}

/// List all records with user and category embeds.
#[get("/record")]
pub async fn list_records(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RecordWithRelations>>> {
    let records = state.records.list().await.map_err(|err| {
        error!(error = %err, "failed to fetch records");
        Error::internal("Failed to fetch records")
    })?;
    Ok(web::Json(records))
}

/// Group records by category, join category names, and return counts sorted
/// descending. Unmatched category ids are labelled "Unknown Category".
#[get("/record/by-category")]
pub async fn records_by_category(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryRecordCount>>> {
    let counts = state.records.count_by_category().await.map_err(|err| {
        error!(error = %err, "failed to group records");
        Error::internal("Failed to fetch records")
    })?;
    if counts.is_empty() {
        return Ok(web::Json(Vec::new()));
    }
    let ids: Vec<Uuid> = counts.iter().map(|(id, _)| *id).collect();
    let names = state.categories.names_by_ids(&ids).await.map_err(|err| {
        error!(error = %err, "failed to resolve category names");
        Error::internal("Failed to fetch categories")
    })?;
    Ok(web::Json(summarise_by_category(counts, names)))
}

/// Fetch a single record with its embeds.
#[get("/record/{id}")]
pub async fn get_record(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<RecordWithRelations>> {
    let record = state
        .records
        .find_by_id(path.into_inner())
        .await
        .map_err(|err| {
            error!(error = %err, "failed to fetch record");
            Error::internal("Failed to fetch record")
        })?
        .ok_or_else(|| Error::not_found("Record not found"))?;
    Ok(web::Json(record))
}

/// Create a record, resolving any inline screenshot first. The audit details
/// deliberately carry only the comment and code.
#[post("/record")]
pub async fn create_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecordPayload>,
) -> ApiResult<web::Json<Record>> {
    let body = payload.into_inner();
    let image = resolve_image(&state.screenshots, body.image.clone()).await?;
    let record = state
        .records
        .create(NewRecord {
            user_id: body.user_id,
            category_id: body.category_id,
            date_record: body.date_record,
            comments: body.comments.clone(),
            image,
            code: body.code.clone(),
        })
        .await
        .map_err(|err| {
            error!(error = %err, "failed to create record");
            Error::internal("Failed to create record")
        })?;

    state
        .audit
        .record(session.actor(), actions::CREATE_RECORD, audit_details(&body))
        .await;

    Ok(web::Json(record))
}

/// Full-field update of a record. An incoming data-URL is stored and
/// replaced; an existing URL passes through, which is what avoids
/// re-uploading unchanged screenshots.
#[put("/record/{id}")]
pub async fn update_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<RecordPayload>,
) -> ApiResult<web::Json<Record>> {
    let id = path.into_inner();
    let body = payload.into_inner();
    let image = resolve_image(&state.screenshots, body.image.clone()).await?;
    let record = state
        .records
        .update(
            id,
            NewRecord {
                user_id: body.user_id,
                category_id: body.category_id,
                date_record: body.date_record,
                comments: body.comments.clone(),
                image,
                code: body.code.clone(),
            },
        )
        .await
        .map_err(|err| map_write_error(err, "Failed to update record"))?;

    state
        .audit
        .record(session.actor(), actions::UPDATE_RECORD, audit_details(&body))
        .await;

    Ok(web::Json(record))
}

/// Hard-delete a record. The audit details are the raw id serialized as a
/// JSON string, an intentionally different shape from the other deletes.
#[delete("/record/{id}")]
pub async fn delete_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    state
        .records
        .delete(id)
        .await
        .map_err(|err| map_write_error(err, "Failed to delete record"))?;

    let details = serde_json::to_string(&id).unwrap_or_default();
    state
        .audit
        .record(session.actor(), actions::DELETE_RECORD, details)
        .await;

    Ok(HttpResponse::NoContent().finish())
}
