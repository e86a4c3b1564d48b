//! Request middleware for cross-cutting lifecycle concerns.

pub mod trace;

pub use trace::RequestTrace;
