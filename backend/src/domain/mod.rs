//! Domain entities, transforms, and ports.
//!
//! Types here are transport and storage agnostic. The HTTP adapter maps the
//! [`Error`] envelope to responses; the persistence adapters implement the
//! traits under [`ports`].

pub mod audit;
pub mod binnacle;
pub mod category;
pub mod error;
pub mod ports;
pub mod record;
pub mod report;
pub mod screenshot;
pub mod user;

pub use self::audit::AuditTrail;
pub use self::binnacle::{BinnacleActor, BinnacleEntry, BinnacleEntryWithUser, NewBinnacleEntry};
pub use self::category::{Category, NewCategory};
pub use self::error::{Error, ErrorCode};
pub use self::record::{NewRecord, Record, RecordCategory, RecordUser, RecordWithRelations};
pub use self::user::User;

/// Convenient result alias for fallible domain and handler code.
pub type ApiResult<T> = Result<T, Error>;
