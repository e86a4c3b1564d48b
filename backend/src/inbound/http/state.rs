//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! domain ports. The store handle is injected explicitly per the redesign;
//! there is no ambient global client.

use std::sync::Arc;

use crate::domain::ports::{
    BinnacleRepository, CategoryRepository, RecordRepository, ScreenshotStore, UserRepository,
};
use crate::domain::AuditTrail;

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Category storage.
    pub categories: Arc<dyn CategoryRepository>,
    /// Record storage.
    pub records: Arc<dyn RecordRepository>,
    /// User storage.
    pub users: Arc<dyn UserRepository>,
    /// Binnacle audit store.
    pub binnacle: Arc<dyn BinnacleRepository>,
    /// Screenshot blob storage.
    pub screenshots: Arc<dyn ScreenshotStore>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Category storage.
    pub categories: Arc<dyn CategoryRepository>,
    /// Record storage.
    pub records: Arc<dyn RecordRepository>,
    /// User storage.
    pub users: Arc<dyn UserRepository>,
    /// Binnacle audit store.
    pub binnacle: Arc<dyn BinnacleRepository>,
    /// Screenshot blob storage.
    pub screenshots: Arc<dyn ScreenshotStore>,
    /// Post-commit audit trail, writing through `binnacle`.
    pub audit: AuditTrail,
}

impl HttpState {
    /// Construct state from a ports bundle; the audit trail is wired to the
    /// same binnacle repository the read endpoint serves from.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            categories,
            records,
            users,
            binnacle,
            screenshots,
        } = ports;
        let audit = AuditTrail::new(binnacle.clone());
        Self {
            categories,
            records,
            users,
            binnacle,
            screenshots,
            audit,
        }
    }
}
