//! Record-keeping dashboard backend.
//!
//! Hexagonal layout: domain types and ports under [`domain`], REST handlers
//! under [`inbound`], PostgreSQL and filesystem adapters under [`outbound`],
//! and server wiring under [`server`].

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::RequestTrace;
