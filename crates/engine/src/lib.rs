//! Boss bar engine library.
//!
//! Shows boss bars to every client version: natively for clients that
//! support them, and by disguising an invisible boss creature for older ones.
//!
//! ## Structure
//!
//! - `entities/` - packet builder and placement of the disguised entity
//! - `stores/` - per-viewer session state
//! - `use_cases/` - message API, lifecycle and the boss bar facade
//! - `infrastructure/` - ports plus in-process adapters and configuration
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Shared fakes and the wired test harness.
#[cfg(test)]
pub mod test_fixtures;

pub use app::{App, Ports};
