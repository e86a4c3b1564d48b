//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **screenshots**: filesystem-backed screenshot storage
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; no business logic lives here.

pub mod persistence;
pub mod screenshots;
