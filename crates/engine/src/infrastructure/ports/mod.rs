//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Packet delivery to a viewer's connection
//! - Protocol-version lookups (could swap the negotiation service)
//! - Viewer positions and server view distance
//! - Tick scheduling (host task queue, or the in-process scheduler in tests)
//! - Native boss bars for clients that support them

mod boss_bar;
mod error;
mod external;
mod scheduling;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{PacketTransport, ProtocolVersionPort, ViewerLocator};

// =============================================================================
// Boss Bar Capability
// =============================================================================
pub use boss_bar::{BarBackend, BossBar, BossBarFactory};

// =============================================================================
// Scheduling Ports
// =============================================================================
pub use scheduling::{PendingTask, SchedulerPort, TaskHandle};

// =============================================================================
// Error Types
// =============================================================================
pub use error::BarError;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockProtocolVersionPort, MockViewerLocator};
