//! Shared test helpers.
//!
//! - `RecordingTransport` - keeps every packet sent
//! - `Harness` - a fully wired engine on in-process adapters

use std::sync::{Arc, Mutex};

use bossbar_domain::{Disguise, Location, ProtocolVersion, ViewerId};
use bossbar_protocol::{EntityPacket, OutboundPacket};

use crate::app::{App, Ports};
use crate::infrastructure::config::BarConfig;
use crate::infrastructure::native::TracingBossBarFactory;
use crate::infrastructure::ports::PacketTransport;
use crate::infrastructure::scheduler::TickScheduler;
use crate::infrastructure::viewers::InMemoryViewers;
use crate::use_cases::{BarApi, BarLifecycle};

// =============================================================================
// Recording Transport
// =============================================================================

#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(ViewerId, OutboundPacket)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<(ViewerId, OutboundPacket)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, viewer: ViewerId) -> Vec<OutboundPacket> {
        self.all()
            .into_iter()
            .filter(|(to, _)| *to == viewer)
            .map(|(_, packet)| packet)
            .collect()
    }

    pub fn count(&self, viewer: ViewerId, matches: impl Fn(&EntityPacket) -> bool) -> usize {
        self.sent_to(viewer)
            .iter()
            .filter(|packet| matches(&packet.packet))
            .count()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PacketTransport for RecordingTransport {
    fn send(&self, viewer: ViewerId, packet: OutboundPacket) {
        self.sent.lock().unwrap().push((viewer, packet));
    }
}

// =============================================================================
// Engine Harness
// =============================================================================

pub const TEST_VIEW_DISTANCE: u32 = 10;

pub struct Harness {
    pub app: App,
    pub bars: Arc<BarApi>,
    pub lifecycle: Arc<BarLifecycle>,
    pub transport: Arc<RecordingTransport>,
    pub scheduler: Arc<TickScheduler>,
    pub viewers: Arc<InMemoryViewers>,
}

impl Harness {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            config: BarConfig {
                view_distance: TEST_VIEW_DISTANCE,
                ..BarConfig::default()
            },
        }
    }

    /// Connect a viewer standing at the origin, facing south.
    pub fn connect(&self, version: ProtocolVersion) -> ViewerId {
        self.connect_at(version, Location::new(0.5, 64.0, 0.5))
    }

    pub fn connect_at(&self, version: ProtocolVersion, location: Location) -> ViewerId {
        let viewer = ViewerId::new();
        self.viewers.connect(viewer, version, location);
        viewer
    }

    /// Advance the scheduler and run whatever fires, one tick at a time.
    pub fn run_ticks(&self, ticks: u32) {
        for _ in 0..ticks {
            for task in self.scheduler.advance() {
                self.lifecycle.run_task(task);
            }
        }
    }
}

pub struct HarnessBuilder {
    config: BarConfig,
}

impl HarnessBuilder {
    pub fn disguise(mut self, disguise: Disguise) -> Self {
        self.config.disguise = disguise;
        self
    }

    pub fn below_ground(mut self, below_ground: bool) -> Self {
        self.config.below_ground_mode = below_ground;
        self
    }

    pub fn build(self) -> Harness {
        let transport = Arc::new(RecordingTransport::new());
        let scheduler = Arc::new(TickScheduler::new());
        let viewers = Arc::new(InMemoryViewers::new(self.config.view_distance));

        let app = App::new(
            &self.config,
            Ports {
                transport: transport.clone(),
                versions: viewers.clone(),
                viewers: viewers.clone(),
                scheduler: scheduler.clone(),
                native_bars: Arc::new(TracingBossBarFactory),
            },
        );

        Harness {
            bars: app.bars.clone(),
            lifecycle: app.lifecycle.clone(),
            app,
            transport,
            scheduler,
            viewers,
        }
    }
}
