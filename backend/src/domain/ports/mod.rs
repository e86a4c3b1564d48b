//! Domain ports for the hexagonal boundary.
//!
//! Each port is an async trait the outbound adapters implement, paired with
//! a typed error enum and a fixture implementation for database-free wiring
//! and tests.

mod binnacle_repository;
mod category_repository;
mod record_repository;
mod screenshot_store;
mod user_repository;

pub use binnacle_repository::{
    BinnacleRepository, BinnacleRepositoryError, FixtureBinnacleRepository,
};
pub use category_repository::{
    CategoryRepository, CategoryRepositoryError, FixtureCategoryRepository,
};
pub use record_repository::{FixtureRecordRepository, RecordRepository, RecordRepositoryError};
pub use screenshot_store::{FixtureScreenshotStore, ScreenshotStore, ScreenshotStoreError};
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
