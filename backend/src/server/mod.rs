//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::domain::ports::{
    FixtureBinnacleRepository, FixtureCategoryRepository, FixtureRecordRepository,
    FixtureScreenshotStore, FixtureUserRepository,
};
use crate::inbound::http::binnacle::{append_binnacle, list_binnacle};
use crate::inbound::http::categories::{
    create_category, delete_category, list_categories, update_category,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::records::{
    create_record, delete_record, get_record, list_records, records_by_category, update_record,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::users::{delete_user, list_users};
use crate::middleware::RequestTrace;
use crate::outbound::persistence::{
    DieselBinnacleRepository, DieselCategoryRepository, DieselRecordRepository,
    DieselUserRepository,
};
use crate::outbound::screenshots::FsScreenshotStore;

/// Wire the port implementations for the configured storage backend.
///
/// With a database pool, all repositories run against PostgreSQL and
/// screenshots land on disk. Without one, fixture ports serve canned data so
/// the server can still boot for smoke testing.
fn build_ports(config: &ServerConfig) -> HttpStatePorts {
    match &config.db_pool {
        Some(pool) => HttpStatePorts {
            categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
            records: Arc::new(DieselRecordRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            binnacle: Arc::new(DieselBinnacleRepository::new(pool.clone())),
            screenshots: Arc::new(FsScreenshotStore::new(config.screenshots_dir.clone())),
        },
        None => {
            info!("no database pool configured; serving fixture data");
            HttpStatePorts {
                categories: Arc::new(FixtureCategoryRepository),
                records: Arc::new(FixtureRecordRepository),
                users: Arc::new(FixtureUserRepository),
                binnacle: Arc::new(FixtureBinnacleRepository),
                screenshots: Arc::new(FixtureScreenshotStore),
            }
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // records_by_category registers before get_record so the literal
    // "by-category" segment is not captured as an id.
    let api = web::scope("/api")
        .wrap(session)
        .service(list_categories)
        .service(create_category)
        .service(update_category)
        .service(delete_category)
        .service(list_records)
        .service(records_by_category)
        .service(get_record)
        .service(create_record)
        .service(update_record)
        .service(delete_record)
        .service(list_users)
        .service(delete_user)
        .service(list_binnacle)
        .service(append_binnacle);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RequestTrace)
        .service(api)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(HttpState::new(build_ports(&config)));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        screenshots_dir: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
