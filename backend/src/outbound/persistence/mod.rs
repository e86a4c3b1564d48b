//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are thin translators: Diesel row structs (`models.rs`) and
//! schema definitions (`schema.rs`) stay internal, and every database error
//! is mapped to the corresponding port error type before it leaves this
//! module.

mod diesel_binnacle_repository;
mod diesel_category_repository;
mod diesel_record_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_binnacle_repository::DieselBinnacleRepository;
pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_record_repository::DieselRecordRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
