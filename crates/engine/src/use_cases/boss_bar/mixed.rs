//! Version-dispatching boss bar.
//!
//! One logical bar backed by two implementations: viewers that negotiated a
//! protocol with native boss bars go to the native bar, everyone else to the
//! legacy emulation.

use std::sync::Arc;

use bossbar_domain::{Progress, ViewerId};

use crate::infrastructure::ports::{
    BarBackend, BarError, BossBar, BossBarFactory, ProtocolVersionPort,
};

pub struct MixedBossBar {
    versions: Arc<dyn ProtocolVersionPort>,
    legacy: Box<dyn BossBar>,
    native: Box<dyn BossBar>,
}

impl MixedBossBar {
    pub fn new(
        versions: Arc<dyn ProtocolVersionPort>,
        legacy: Box<dyn BossBar>,
        native: Box<dyn BossBar>,
    ) -> Self {
        Self {
            versions,
            legacy,
            native,
        }
    }

    pub fn legacy_viewers(&self) -> Vec<ViewerId> {
        self.legacy.viewers()
    }

    pub fn native_viewers(&self) -> Vec<ViewerId> {
        self.native.viewers()
    }

    fn backend_for(&self, viewer: ViewerId) -> BarBackend {
        BarBackend::for_version(self.versions.protocol_version(viewer))
    }

    /// Backend whose subset currently holds `viewer`.
    fn holder_of(&self, viewer: ViewerId) -> Option<BarBackend> {
        if self.legacy.viewers().contains(&viewer) {
            Some(BarBackend::Legacy)
        } else if self.native.viewers().contains(&viewer) {
            Some(BarBackend::Native)
        } else {
            None
        }
    }

    fn bar_mut(&mut self, backend: BarBackend) -> &mut dyn BossBar {
        match backend {
            BarBackend::Legacy => self.legacy.as_mut(),
            BarBackend::Native => self.native.as_mut(),
        }
    }
}

impl BossBar for MixedBossBar {
    fn title(&self) -> &str {
        self.native.title()
    }

    fn set_title(&mut self, title: &str) {
        self.legacy.set_title(title);
        self.native.set_title(title);
    }

    fn progress(&self) -> f64 {
        self.native.progress()
    }

    fn set_progress(&mut self, progress: f64) -> Result<(), BarError> {
        let progress = Progress::new(progress)?.value();
        self.legacy.set_progress(progress)?;
        self.native.set_progress(progress)
    }

    fn visible(&self) -> bool {
        self.native.visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.legacy.set_visible(visible);
        self.native.set_visible(visible);
    }

    fn viewers(&self) -> Vec<ViewerId> {
        let mut viewers = self.native.viewers();
        for viewer in self.legacy.viewers() {
            if !viewers.contains(&viewer) {
                viewers.push(viewer);
            }
        }
        viewers
    }

    /// A viewer held by the other backend after a version change is moved.
    fn add_viewer(&mut self, viewer: ViewerId) {
        let backend = self.backend_for(viewer);
        match self.holder_of(viewer) {
            Some(current) if current == backend => return,
            Some(current) => {
                tracing::debug!(
                    viewer = %viewer,
                    from = ?current,
                    to = ?backend,
                    "Boss bar viewer moved"
                );
                self.bar_mut(current).remove_viewer(viewer);
            }
            None => {}
        }
        tracing::debug!(viewer = %viewer, backend = ?backend, "Boss bar viewer added");
        self.bar_mut(backend).add_viewer(viewer);
    }

    /// Removes from whichever subset holds the viewer, whatever its version now.
    fn remove_viewer(&mut self, viewer: ViewerId) {
        if let Some(current) = self.holder_of(viewer) {
            self.bar_mut(current).remove_viewer(viewer);
        }
    }

    fn remove_all(&mut self) {
        self.legacy.remove_all();
        self.native.remove_all();
    }

    fn close(&mut self) {
        self.legacy.close();
        self.native.close();
    }
}

/// Boss bar factory that serves every client version.
pub struct MixedBossBarFactory {
    versions: Arc<dyn ProtocolVersionPort>,
    legacy: Arc<dyn BossBarFactory>,
    native: Arc<dyn BossBarFactory>,
}

impl MixedBossBarFactory {
    pub fn new(
        versions: Arc<dyn ProtocolVersionPort>,
        legacy: Arc<dyn BossBarFactory>,
        native: Arc<dyn BossBarFactory>,
    ) -> Self {
        Self {
            versions,
            legacy,
            native,
        }
    }

    /// Concrete bar, for callers that need the per-backend viewer lists.
    pub fn new_mixed_bar(&self) -> MixedBossBar {
        MixedBossBar::new(
            self.versions.clone(),
            self.legacy.new_boss_bar(),
            self.native.new_boss_bar(),
        )
    }
}

impl BossBarFactory for MixedBossBarFactory {
    fn new_boss_bar(&self) -> Box<dyn BossBar> {
        Box::new(self.new_mixed_bar())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bossbar_domain::ProtocolVersion;

    use super::*;
    use crate::infrastructure::native::TracingBossBarFactory;
    use crate::test_fixtures::Harness;
    use crate::use_cases::boss_bar::LegacyBossBarFactory;

    struct Fixture {
        harness: Harness,
        bar: MixedBossBar,
        old: ViewerId,
        new: ViewerId,
    }

    fn fixture() -> Fixture {
        let harness = Harness::new();
        let old = harness.connect(ProtocolVersion::V1_8);
        let new = harness.connect(ProtocolVersion::V1_9);
        let factory = MixedBossBarFactory::new(
            harness.viewers.clone(),
            Arc::new(LegacyBossBarFactory::new(harness.bars.clone())),
            Arc::new(TracingBossBarFactory),
        );
        let bar = factory.new_mixed_bar();
        Fixture {
            harness,
            bar,
            old,
            new,
        }
    }

    #[test]
    fn when_viewers_added_then_routed_by_protocol_version() {
        let Fixture {
            harness,
            mut bar,
            old,
            new,
        } = fixture();

        bar.add_viewer(old);
        bar.add_viewer(new);
        bar.add_viewer(old);

        assert_eq!(bar.legacy_viewers(), vec![old]);
        assert_eq!(bar.native_viewers(), vec![new]);
        assert_eq!(bar.viewers().len(), 2);
        assert!(harness.bars.has_bar(old));
        assert!(!harness.bars.has_bar(new));
    }

    #[test]
    fn when_legacy_viewer_removed_then_native_subset_untouched() {
        let Fixture {
            harness,
            mut bar,
            old,
            new,
        } = fixture();
        bar.add_viewer(old);
        bar.add_viewer(new);

        bar.remove_viewer(old);
        bar.remove_viewer(ViewerId::new());

        assert!(bar.legacy_viewers().is_empty());
        assert_eq!(bar.native_viewers(), vec![new]);
        assert!(!harness.bars.has_bar(old));
    }

    #[test]
    fn when_title_and_progress_set_then_both_bars_follow() {
        let Fixture {
            harness,
            mut bar,
            old,
            ..
        } = fixture();
        bar.add_viewer(old);

        bar.set_title("Siege");
        bar.set_progress(0.5).unwrap();

        assert_eq!(bar.title(), "Siege");
        assert_eq!(bar.progress(), 0.5);
        assert_eq!(harness.bars.message(old), "Siege");
        assert!((harness.bars.health(old) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn when_progress_out_of_range_then_neither_bar_changes() {
        let Fixture { mut bar, .. } = fixture();
        bar.set_progress(0.4).unwrap();

        assert!(bar.set_progress(-0.1).is_err());

        assert_eq!(bar.progress(), 0.4);
        assert_eq!(bar.legacy.progress(), 0.4);
    }

    #[test]
    fn when_closed_then_both_subsets_are_empty() {
        let Fixture {
            harness,
            mut bar,
            old,
            new,
        } = fixture();
        bar.add_viewer(old);
        bar.add_viewer(new);

        bar.close();

        assert!(bar.viewers().is_empty());
        assert!(!harness.bars.has_bar(old));
    }

    #[test]
    fn when_version_changes_between_adds_then_viewer_moves_to_native() {
        let Fixture {
            harness,
            mut bar,
            old,
            ..
        } = fixture();
        bar.add_viewer(old);
        assert!(harness.bars.has_bar(old));

        harness.viewers.set_version(old, ProtocolVersion::V1_9);
        bar.add_viewer(old);

        assert!(bar.legacy_viewers().is_empty());
        assert_eq!(bar.native_viewers(), vec![old]);
        assert!(!harness.bars.has_bar(old));
    }

    #[test]
    fn when_version_changes_between_add_and_remove_then_viewer_still_removed() {
        let Fixture {
            harness,
            mut bar,
            old,
            new,
        } = fixture();
        bar.add_viewer(old);
        bar.add_viewer(new);

        harness.viewers.set_version(old, ProtocolVersion::V1_9);
        harness.viewers.set_version(new, ProtocolVersion::V1_8);
        bar.remove_viewer(old);
        bar.remove_viewer(new);

        assert!(bar.viewers().is_empty());
        assert!(!harness.bars.has_bar(old));
    }

    /// Native stand-in that counts `close` calls.
    struct CountingBar {
        closed: Arc<AtomicUsize>,
    }

    impl BossBar for CountingBar {
        fn title(&self) -> &str {
            ""
        }
        fn set_title(&mut self, _title: &str) {}
        fn progress(&self) -> f64 {
            0.0
        }
        fn set_progress(&mut self, _progress: f64) -> Result<(), BarError> {
            Ok(())
        }
        fn visible(&self) -> bool {
            true
        }
        fn set_visible(&mut self, _visible: bool) {}
        fn viewers(&self) -> Vec<ViewerId> {
            Vec::new()
        }
        fn add_viewer(&mut self, _viewer: ViewerId) {}
        fn remove_viewer(&mut self, _viewer: ViewerId) {}
        fn remove_all(&mut self) {}
        fn close(&mut self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn when_closed_then_close_reaches_both_backends() {
        let harness = Harness::new();
        let old = harness.connect(ProtocolVersion::V1_8);
        let closed = Arc::new(AtomicUsize::new(0));
        let legacy = LegacyBossBarFactory::new(harness.bars.clone());
        let mut bar = MixedBossBar::new(
            harness.viewers.clone(),
            legacy.new_boss_bar(),
            Box::new(CountingBar {
                closed: closed.clone(),
            }),
        );
        bar.add_viewer(old);

        bar.close();

        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert!(!harness.bars.has_bar(old));
    }
}
