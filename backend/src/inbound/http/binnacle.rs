//! Binnacle (audit log) API handlers.
//!
//! Mutating endpoints append entries through [`crate::domain::AuditTrail`];
//! this module only exposes reading the log and the direct append used by
//! clients to report sign-ins.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::domain::{BinnacleEntry, BinnacleEntryWithUser, Error, NewBinnacleEntry};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /binnacle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendBinnacleRequest {
    /// Acting user, when known.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Action label, e.g. "Sign In".
    pub action: String,
    /// Opaque JSON payload describing the action.
    #[serde(default)]
    pub details: Option<String>,
}

/// List all audit entries, newest first, with the actor embedded.
#[get("/binnacle")]
pub async fn list_binnacle(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<BinnacleEntryWithUser>>> {
    let entries = state.binnacle.list_with_user().await.map_err(|err| {
        error!(error = %err, "failed to fetch binnacle");
        Error::internal("Failed to fetch binnacle")
    })?;
    Ok(web::Json(entries))
}

/// Append an audit entry exactly as supplied. Unlike the implicit audit on
/// mutations, a failure here surfaces to the caller.
#[post("/binnacle")]
pub async fn append_binnacle(
    state: web::Data<HttpState>,
    payload: web::Json<AppendBinnacleRequest>,
) -> ApiResult<web::Json<BinnacleEntry>> {
    let body = payload.into_inner();
    let entry = state
        .binnacle
        .append(NewBinnacleEntry {
            user_id: body.user_id,
            action: body.action,
            details: body.details,
        })
        .await
        .map_err(|err| {
            error!(error = %err, "failed to append binnacle entry");
            Error::internal("Failed to create binnacle entry")
        })?;
    Ok(web::Json(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::binnacle::actions;
    use crate::inbound::http::test_utils::{test_session_middleware, TestHarness};
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::Value;

    fn test_app(
        harness: &TestHarness,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(harness.state())
            .wrap(test_session_middleware())
            .service(list_binnacle)
            .service(append_binnacle)
    }

    #[actix_web::test]
    async fn sign_in_appends_and_lists_with_the_user_embed() {
        let harness = TestHarness::new();
        let user = harness.seed_user("Ada", "ada@example.com");
        let app = actix_test::init_service(test_app(&harness)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/binnacle")
                .set_json(serde_json::json!({
                    "userId": user,
                    "action": actions::SIGN_IN,
                    "details": "{\"provider\":\"google\"}",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let created: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            created.get("action").and_then(Value::as_str),
            Some(actions::SIGN_IN)
        );

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/binnacle").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let rows = body.as_array().expect("array");
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0]
                .get("user")
                .and_then(|user| user.get("name"))
                .and_then(Value::as_str),
            Some("Ada")
        );
    }

    #[actix_web::test]
    async fn entries_without_an_actor_embed_a_null_user() {
        let harness = TestHarness::new();
        let app = actix_test::init_service(test_app(&harness)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/binnacle")
                .set_json(serde_json::json!({ "action": "Sign In" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/binnacle").to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(res).await;
        let rows = body.as_array().expect("array");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("user").is_some_and(Value::is_null));
        assert!(rows[0].get("details").is_some_and(Value::is_null));
    }
}
