//! Boss bar backed by the disguised-entity emulation.

use std::sync::Arc;

use bossbar_domain::{BarTitle, Progress, ViewerId};

use crate::infrastructure::ports::{BarError, BossBar, BossBarFactory};
use crate::use_cases::BarApi;

/// Logical bar for viewers without native boss bars.
///
/// Every change is pushed to each viewer through [`BarApi`] while the bar is
/// visible. Viewers added while hidden see it once it is shown again.
pub struct LegacyBossBar {
    bars: Arc<BarApi>,
    title: String,
    progress: Progress,
    visible: bool,
    viewers: Vec<ViewerId>,
}

impl LegacyBossBar {
    pub fn new(bars: Arc<BarApi>) -> Self {
        Self {
            bars,
            title: String::new(),
            progress: Progress::FULL,
            visible: true,
            viewers: Vec::new(),
        }
    }

    fn show_to(&self, viewer: ViewerId) {
        if self.visible {
            self.bars
                .show(viewer, BarTitle::new(self.title.as_str()), self.progress.to_percent());
        }
    }

    fn show_all(&self) {
        for viewer in &self.viewers {
            self.show_to(*viewer);
        }
    }
}

impl BossBar for LegacyBossBar {
    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.show_all();
    }

    fn progress(&self) -> f64 {
        self.progress.value()
    }

    fn set_progress(&mut self, progress: f64) -> Result<(), BarError> {
        self.progress = Progress::new(progress)?;
        self.show_all();
        Ok(())
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            self.show_all();
        } else {
            for viewer in &self.viewers {
                self.bars.remove_bar(*viewer);
            }
        }
    }

    fn viewers(&self) -> Vec<ViewerId> {
        self.viewers.clone()
    }

    fn add_viewer(&mut self, viewer: ViewerId) {
        if self.viewers.contains(&viewer) {
            return;
        }
        self.viewers.push(viewer);
        self.show_to(viewer);
    }

    fn remove_viewer(&mut self, viewer: ViewerId) {
        let before = self.viewers.len();
        self.viewers.retain(|v| *v != viewer);
        if self.viewers.len() != before {
            self.bars.remove_bar(viewer);
        }
    }

    fn remove_all(&mut self) {
        for viewer in std::mem::take(&mut self.viewers) {
            self.bars.remove_bar(viewer);
        }
    }
}

/// Creates [`LegacyBossBar`]s sharing one [`BarApi`].
pub struct LegacyBossBarFactory {
    bars: Arc<BarApi>,
}

impl LegacyBossBarFactory {
    pub fn new(bars: Arc<BarApi>) -> Self {
        Self { bars }
    }
}

impl BossBarFactory for LegacyBossBarFactory {
    fn new_boss_bar(&self) -> Box<dyn BossBar> {
        Box::new(LegacyBossBar::new(self.bars.clone()))
    }
}
