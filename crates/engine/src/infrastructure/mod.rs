//! Infrastructure implementations.
//!
//! Contains port traits and the in-process adapters used by the demo host
//! and the tests.

pub mod config;
pub mod native;
pub mod ports;
pub mod scheduler;
pub mod transport;
pub mod viewers;
