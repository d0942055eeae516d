//! In-process native boss bar provider.
//!
//! Keeps bar state in memory and reports changes through `tracing`. Hosts
//! that speak the 1.9+ boss bar protocol plug in their own factory instead.

use bossbar_domain::{Progress, ViewerId};

use super::ports::{BarError, BossBar, BossBarFactory};

#[derive(Debug)]
pub struct TracingBossBar {
    title: String,
    progress: Progress,
    visible: bool,
    viewers: Vec<ViewerId>,
}

impl TracingBossBar {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            progress: Progress::FULL,
            visible: true,
            viewers: Vec::new(),
        }
    }
}

impl Default for TracingBossBar {
    fn default() -> Self {
        Self::new()
    }
}

impl BossBar for TracingBossBar {
    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        tracing::debug!(title = %self.title, viewers = self.viewers.len(), "Native bar title set");
    }

    fn progress(&self) -> f64 {
        self.progress.value()
    }

    fn set_progress(&mut self, progress: f64) -> Result<(), BarError> {
        self.progress = Progress::new(progress)?;
        tracing::debug!(progress, viewers = self.viewers.len(), "Native bar progress set");
        Ok(())
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        tracing::debug!(visible, "Native bar visibility set");
    }

    fn viewers(&self) -> Vec<ViewerId> {
        self.viewers.clone()
    }

    fn add_viewer(&mut self, viewer: ViewerId) {
        if !self.viewers.contains(&viewer) {
            self.viewers.push(viewer);
            tracing::debug!(viewer = %viewer, "Native bar shown");
        }
    }

    fn remove_viewer(&mut self, viewer: ViewerId) {
        let before = self.viewers.len();
        self.viewers.retain(|v| *v != viewer);
        if self.viewers.len() != before {
            tracing::debug!(viewer = %viewer, "Native bar hidden");
        }
    }

    fn remove_all(&mut self) {
        for viewer in std::mem::take(&mut self.viewers) {
            tracing::debug!(viewer = %viewer, "Native bar hidden");
        }
    }
}

#[derive(Debug, Default)]
pub struct TracingBossBarFactory;

impl BossBarFactory for TracingBossBarFactory {
    fn new_boss_bar(&self) -> Box<dyn BossBar> {
        Box::new(TracingBossBar::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_viewer_added_twice_then_listed_once() {
        let mut bar = TracingBossBarFactory.new_boss_bar();
        let viewer = ViewerId::new();

        bar.add_viewer(viewer);
        bar.add_viewer(viewer);

        assert_eq!(bar.viewers(), vec![viewer]);
    }

    #[test]
    fn when_progress_out_of_range_then_rejected_and_unchanged() {
        let mut bar = TracingBossBar::new();
        bar.set_progress(0.3).unwrap();

        assert!(bar.set_progress(1.2).is_err());
        assert_eq!(bar.progress(), 0.3);
    }
}
