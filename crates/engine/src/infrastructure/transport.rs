//! Packet transport that encodes frames and logs them.

use std::sync::atomic::{AtomicU64, Ordering};

use bossbar_domain::ViewerId;
use bossbar_protocol::OutboundPacket;

use super::ports::PacketTransport;

/// Encodes every packet and reports it through `tracing`.
///
/// Used by the demo host in place of a real connection.
#[derive(Debug, Default)]
pub struct TracingTransport {
    packets: AtomicU64,
    bytes: AtomicU64,
}

impl TracingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn packets_sent(&self) -> u64 {
        self.packets.load(Ordering::Relaxed)
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

impl PacketTransport for TracingTransport {
    fn send(&self, viewer: ViewerId, packet: OutboundPacket) {
        let frame = packet.encode();
        self.packets.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(frame.len() as u64, Ordering::Relaxed);
        tracing::debug!(
            viewer = %viewer,
            packet_id = u64::from(packet.packet.id()),
            dialect = ?packet.dialect,
            len = frame.len(),
            "Packet sent"
        );
    }
}
