//! HTTP inbound adapter exposing REST endpoints.

pub mod binnacle;
pub mod categories;
pub mod error;
pub mod health;
pub mod records;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
