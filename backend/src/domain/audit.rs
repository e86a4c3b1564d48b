//! Post-commit audit trail service.
//!
//! Mutating handlers call [`AuditTrail::record`] after the primary write has
//! committed. The append goes straight through the binnacle repository port,
//! and a failed append is logged and swallowed: the primary mutation already
//! succeeded, so the audit write must not turn it into a client-visible
//! error.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use crate::domain::binnacle::NewBinnacleEntry;
use crate::domain::ports::BinnacleRepository;

/// Swappable audit subscriber appending binnacle entries after mutations.
#[derive(Clone)]
pub struct AuditTrail {
    binnacle: Arc<dyn BinnacleRepository>,
}

impl AuditTrail {
    /// Build an audit trail writing through the given binnacle repository.
    pub fn new(binnacle: Arc<dyn BinnacleRepository>) -> Self {
        Self { binnacle }
    }

    /// Append an audit entry for a committed mutation.
    ///
    /// `actor` is the session user when one is present; unauthenticated
    /// mutations append entries without a user id. Failures are logged and
    /// dropped.
    pub async fn record(&self, actor: Option<Uuid>, action: &str, details: String) {
        let entry = NewBinnacleEntry {
            user_id: actor,
            action: action.to_owned(),
            details: Some(details),
        };
        if let Err(err) = self.binnacle.append(entry).await {
            error!(error = %err, action, "audit append failed after committed write");
        }
    }
}
