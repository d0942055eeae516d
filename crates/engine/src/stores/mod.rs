//! In-memory state storage modules.
//!
//! - `SessionRegistry` - emulated bar per viewer

pub mod sessions;

pub use sessions::{EmulatedBarSession, EntityHandleAllocator, SessionRegistry, SessionView};
