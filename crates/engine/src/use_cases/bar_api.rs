//! Per-viewer message API.
//!
//! Shows, updates and removes the emulated boss bar of a single viewer. All
//! state lives in the [`SessionRegistry`]; this layer validates input, picks
//! positions and schedules the countdown drain.

use std::sync::Arc;

use bossbar_domain::{BarTask, BarTitle, DomainError, Location, Percent, ViewerId};

use crate::entities::Placement;
use crate::infrastructure::ports::{BarError, PendingTask, SchedulerPort, ViewerLocator};
use crate::stores::{SessionRegistry, SessionView};

/// Reported by [`BarApi::health`] when the viewer has no bar.
pub const NO_BAR_HEALTH: f32 = -1.0;
/// A countdown bar drains once per second.
pub const COUNTDOWN_PERIOD_TICKS: u32 = 20;

pub struct BarApi {
    sessions: Arc<SessionRegistry>,
    placement: Placement,
    viewers: Arc<dyn ViewerLocator>,
    scheduler: Arc<dyn SchedulerPort>,
}

impl BarApi {
    pub fn new(
        sessions: Arc<SessionRegistry>,
        placement: Placement,
        viewers: Arc<dyn ViewerLocator>,
        scheduler: Arc<dyn SchedulerPort>,
    ) -> Self {
        Self {
            sessions,
            placement,
            viewers,
            scheduler,
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Show `title` with the bar filled to `percent` (0 to 100).
    ///
    /// Replaces any countdown. Fails without changing anything when
    /// `percent` is out of range.
    pub fn set_message(&self, viewer: ViewerId, title: &str, percent: f32) -> Result<(), BarError> {
        let percent = Percent::new(percent)?;
        self.show(viewer, BarTitle::new(title), percent);
        Ok(())
    }

    pub fn set_message_full(&self, viewer: ViewerId, title: &str) {
        self.show(viewer, BarTitle::new(title), Percent::FULL);
    }

    /// Show a full bar that drains linearly over `seconds` and then
    /// disappears.
    pub fn set_message_timed(
        &self,
        viewer: ViewerId,
        title: &str,
        seconds: u32,
    ) -> Result<(), BarError> {
        if seconds == 0 {
            return Err(DomainError::validation("Countdown must last at least one second").into());
        }

        self.show(viewer, BarTitle::new(title), Percent::FULL);
        let drain = self.sessions.builder().max_health() / seconds as f32;
        if self.arm_countdown(viewer, drain) {
            tracing::debug!(viewer = %viewer, seconds, "Countdown bar started");
        }
        Ok(())
    }

    /// Change the fill of an existing bar. Does nothing when the viewer has
    /// no bar.
    pub fn set_health(&self, viewer: ViewerId, percent: f32) -> Result<(), BarError> {
        let percent = Percent::new(percent)?;
        let health = self.sessions.builder().health_for(percent);

        let updated = self.sessions.update(viewer, |session| {
            session.set_health(health);
            session.countdown = None;
            session.set_pending(None);
        });
        if updated.is_some() {
            self.refresh(viewer);
        }
        Ok(())
    }

    /// Remove the viewer's bar. Does nothing when there is none.
    pub fn remove_bar(&self, viewer: ViewerId) {
        self.sessions.remove(viewer);
    }

    /// Remove every bar. Returns how many were removed.
    pub fn remove_all_bars(&self) -> usize {
        self.sessions.clear()
    }

    /// Create or update the viewer's bar. Offline viewers are skipped.
    ///
    /// Stops any countdown. A re-spawn pending after a relocation still runs
    /// and carries the new title and health.
    pub fn show(&self, viewer: ViewerId, title: BarTitle, percent: Percent) {
        let Some(location) = self.viewers.location(viewer) else {
            tracing::debug!(viewer = %viewer, "Viewer offline, bar not shown");
            return;
        };
        let health = self.sessions.builder().health_for(percent);

        let updated = self.sessions.update(viewer, |session| {
            session.set_title(title.clone());
            session.set_health(health);
            session.countdown = None;
            session.set_pending(None);
        });
        if updated.is_none() {
            let spawn_at = self
                .placement
                .spawn_point(&location, self.viewers.view_distance());
            self.sessions.get_or_create(viewer, title, health, spawn_at);
        }

        self.refresh(viewer);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current health of the disguised entity, or [`NO_BAR_HEALTH`].
    pub fn health(&self, viewer: ViewerId) -> f32 {
        self.sessions
            .get(viewer)
            .map_or(NO_BAR_HEALTH, |session| session.health)
    }

    /// Current title, or an empty string when the viewer has no bar.
    pub fn message(&self, viewer: ViewerId) -> String {
        self.sessions
            .get(viewer)
            .map(|session| session.title.into_inner())
            .unwrap_or_default()
    }

    pub fn has_bar(&self, viewer: ViewerId) -> bool {
        self.sessions.contains(viewer)
    }

    pub fn session(&self, viewer: ViewerId) -> Option<SessionView> {
        self.sessions.get(viewer)
    }

    // =========================================================================
    // Engine internals
    // =========================================================================

    pub(crate) fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub(crate) fn placement(&self) -> Placement {
        self.placement
    }

    pub(crate) fn view_distance(&self) -> u32 {
        self.viewers.view_distance()
    }

    pub(crate) fn scheduler(&self) -> &Arc<dyn SchedulerPort> {
        &self.scheduler
    }

    /// Anchor for the viewer's current position, if it can be resolved.
    pub(crate) fn anchor_for(&self, viewer: ViewerId) -> Option<Location> {
        let location = self.viewers.location(viewer)?;
        self.placement
            .anchor(&location, self.viewers.view_distance())
    }

    /// Re-send title and health, then move the entity to its anchor.
    pub(crate) fn refresh(&self, viewer: ViewerId) {
        self.sessions.send_status(viewer);
        self.reanchor(viewer);
    }

    /// Move the entity to the anchor of the viewer's current position.
    /// Offline viewers and unresolvable facings are skipped.
    pub(crate) fn reanchor(&self, viewer: ViewerId) {
        if let Some(anchor) = self.anchor_for(viewer) {
            self.sessions.send_teleport(viewer, anchor);
        }
    }

    /// Start draining the bar by `drain` health per second.
    pub(crate) fn arm_countdown(&self, viewer: ViewerId, drain: f32) -> bool {
        if !self.sessions.contains(viewer) {
            return false;
        }

        let handle = self
            .scheduler
            .run_periodic(COUNTDOWN_PERIOD_TICKS, BarTask::CountdownTick { viewer });
        let task = PendingTask::new(handle, self.scheduler.clone());
        self.sessions
            .update(viewer, |session| {
                session.countdown = Some(drain);
                session.set_pending(Some(task));
            })
            .is_some()
    }

    /// One second of a countdown. Removes the bar once it is empty.
    pub(crate) fn countdown_tick(&self, viewer: ViewerId) {
        let remaining = self.sessions.update(viewer, |session| {
            let drain = session.countdown?;
            let health = (session.health() - drain).max(0.0);
            session.set_health(health);
            Some((health, drain))
        });

        match remaining.flatten() {
            Some((health, drain)) if health <= drain / 2.0 => {
                tracing::debug!(viewer = %viewer, "Countdown bar expired");
                self.sessions.remove(viewer);
            }
            Some(_) => self.refresh(viewer),
            None => {}
        }
    }
}
