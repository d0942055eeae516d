//! Application composition.

use std::sync::Arc;

use crate::entities::{FakeEntity, Placement};
use crate::infrastructure::config::BarConfig;
use crate::infrastructure::ports::{
    BossBarFactory, PacketTransport, PendingTask, ProtocolVersionPort, SchedulerPort,
    ViewerLocator,
};
use crate::stores::SessionRegistry;
use crate::use_cases::{BarApi, BarLifecycle, LegacyBossBarFactory, MixedBossBarFactory};

/// Host runtime services the engine is built on.
pub struct Ports {
    pub transport: Arc<dyn PacketTransport>,
    pub versions: Arc<dyn ProtocolVersionPort>,
    pub viewers: Arc<dyn ViewerLocator>,
    pub scheduler: Arc<dyn SchedulerPort>,
    /// Provider of native boss bars for 1.9+ clients.
    pub native_bars: Arc<dyn BossBarFactory>,
}

/// Main application state.
///
/// Hosts call into `bars` for per-viewer messages, hand viewer events and
/// fired tasks to `lifecycle`, and create logical bars from `boss_bars`.
pub struct App {
    pub bars: Arc<BarApi>,
    pub lifecycle: Arc<BarLifecycle>,
    pub boss_bars: Arc<MixedBossBarFactory>,
    reanchor: Option<PendingTask>,
}

impl App {
    /// Wire the engine and start its background tasks.
    pub fn new(config: &BarConfig, ports: Ports) -> Self {
        let sessions = Arc::new(SessionRegistry::new(
            FakeEntity::new(config.disguise),
            ports.transport,
            ports.versions.clone(),
        ));
        let bars = Arc::new(BarApi::new(
            sessions,
            Placement::new(config.below_ground_mode),
            ports.viewers,
            ports.scheduler,
        ));
        let lifecycle = Arc::new(BarLifecycle::new(bars.clone()));
        let boss_bars = Arc::new(MixedBossBarFactory::new(
            ports.versions,
            Arc::new(LegacyBossBarFactory::new(bars.clone())),
            ports.native_bars,
        ));
        let reanchor = lifecycle.start();

        tracing::info!(
            disguise = ?config.disguise,
            below_ground_mode = config.below_ground_mode,
            "Boss bar engine started"
        );

        Self {
            bars,
            lifecycle,
            boss_bars,
            reanchor,
        }
    }

    /// Remove every emulated bar and stop the repeating task.
    ///
    /// Returns how many bars were removed. Safe to call more than once.
    pub fn shutdown(&mut self) -> usize {
        self.reanchor = None;
        let removed = self.bars.remove_all_bars();
        tracing::info!(removed, "Boss bar engine stopped");
        removed
    }
}

#[cfg(test)]
mod tests {
    use bossbar_domain::ProtocolVersion;

    use crate::infrastructure::ports::BossBarFactory;
    use crate::test_fixtures::Harness;

    #[test]
    fn when_shutdown_then_bars_removed_and_reanchor_cancelled() {
        let mut harness = Harness::builder().below_ground(true).build();
        let viewers = [
            harness.connect(ProtocolVersion::V1_8),
            harness.connect(ProtocolVersion::V1_7_10),
        ];
        for viewer in viewers {
            harness.bars.set_message_full(viewer, "bye");
        }
        assert_eq!(harness.scheduler.pending(), 1);

        assert_eq!(harness.app.shutdown(), 2);

        assert_eq!(harness.scheduler.pending(), 0);
        assert!(viewers.iter().all(|v| !harness.bars.has_bar(*v)));
        assert_eq!(harness.app.shutdown(), 0);
    }

    #[test]
    fn when_factory_bar_used_then_legacy_viewer_gets_emulated_bar() {
        let harness = Harness::new();
        let old = harness.connect(ProtocolVersion::V1_8);
        let new = harness.connect(ProtocolVersion::V1_9);

        let mut bar = harness.app.boss_bars.new_boss_bar();
        bar.set_title("Event");
        bar.add_viewer(old);
        bar.add_viewer(new);

        assert_eq!(harness.bars.message(old), "Event");
        assert!(!harness.bars.has_bar(new));
        assert_eq!(bar.viewers().len(), 2);
    }
}
