//! Host runtime services consumed by the engine.

use bossbar_domain::{Location, ProtocolVersion, ViewerId};
use bossbar_protocol::OutboundPacket;

/// Delivers packets to a viewer's connection.
///
/// Fire-and-forget: there is no delivery confirmation and no error path.
pub trait PacketTransport: Send + Sync {
    fn send(&self, viewer: ViewerId, packet: OutboundPacket);
}

/// Reports the wire-protocol revision a viewer negotiated.
///
/// The answer can change during a connection upgrade, so callers query it
/// each time instead of caching.
#[cfg_attr(test, mockall::automock)]
pub trait ProtocolVersionPort: Send + Sync {
    fn protocol_version(&self, viewer: ViewerId) -> ProtocolVersion;
}

/// Where connected viewers currently are.
#[cfg_attr(test, mockall::automock)]
pub trait ViewerLocator: Send + Sync {
    /// Current position, or `None` once the viewer has disconnected.
    fn location(&self, viewer: ViewerId) -> Option<Location>;

    /// Server render distance in chunks.
    fn view_distance(&self) -> u32;
}
