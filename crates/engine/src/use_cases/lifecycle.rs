//! Keeps emulated bars attached to their viewers.
//!
//! Reacts to viewer events from the host (disconnects, teleports, respawns)
//! and runs the tasks the engine scheduled on the host's queue.

use std::sync::Arc;

use bossbar_domain::{BarTask, Location, RelocationSnapshot, ViewerEvent, ViewerId};

use crate::infrastructure::ports::PendingTask;
use crate::use_cases::BarApi;

/// Ticks between a relocation and the re-spawn of the entity.
pub const RELOCATION_RESPAWN_DELAY_TICKS: u32 = 2;
/// Period of the re-anchor task in below-ground mode.
pub const REANCHOR_PERIOD_TICKS: u32 = 5;

pub struct BarLifecycle {
    bars: Arc<BarApi>,
}

impl BarLifecycle {
    pub fn new(bars: Arc<BarApi>) -> Self {
        Self { bars }
    }

    /// Schedule the repeating re-anchor task when the placement needs it.
    ///
    /// The task runs until the returned guard is dropped.
    pub fn start(&self) -> Option<PendingTask> {
        if !self.bars.placement().below_ground() {
            return None;
        }

        let scheduler = self.bars.scheduler().clone();
        let handle = scheduler.run_periodic(REANCHOR_PERIOD_TICKS, BarTask::Reanchor);
        tracing::info!(period_ticks = REANCHOR_PERIOD_TICKS, "Re-anchor task started");
        Some(PendingTask::new(handle, scheduler))
    }

    pub fn handle_event(&self, event: &ViewerEvent) {
        match event {
            ViewerEvent::Connected { viewer } => {
                tracing::debug!(viewer = %viewer, "Viewer connected");
            }
            ViewerEvent::Disconnected { viewer } | ViewerEvent::Kicked { viewer } => {
                self.bars.remove_bar(*viewer);
            }
            ViewerEvent::Teleported { viewer, to } => self.relocate(*viewer, *to),
            ViewerEvent::Respawned { viewer, at } => self.relocate(*viewer, *at),
        }
    }

    /// Run a task handed back by the scheduler.
    pub fn run_task(&self, task: BarTask) {
        match task {
            BarTask::RespawnAfterRelocation(snapshot) => self.respawn(snapshot),
            BarTask::Reanchor => self.reanchor_all(),
            BarTask::CountdownTick { viewer } => self.bars.countdown_tick(viewer),
        }
    }

    /// Schedule a re-spawn at `destination` for a viewer that has a bar.
    pub fn relocate(&self, viewer: ViewerId, destination: Location) {
        let Some(session) = self.bars.session(viewer) else {
            return;
        };

        let snapshot = RelocationSnapshot {
            viewer,
            title: session.title,
            health: session.health,
            destination,
        };
        let scheduler = self.bars.scheduler().clone();
        let handle = scheduler.run_after(
            RELOCATION_RESPAWN_DELAY_TICKS,
            BarTask::RespawnAfterRelocation(snapshot.clone()),
        );
        let task = PendingTask::new(handle, scheduler);
        self.bars.sessions().set_relocation(viewer, snapshot, task);
        tracing::debug!(viewer = %viewer, "Bar re-spawn scheduled after relocation");
    }

    /// Replace the viewer's entity with a fresh one near the destination.
    ///
    /// Title and health come from the session's pending relocation, which
    /// follows updates made since it was scheduled; `queued` is only used
    /// when none is recorded.
    pub fn respawn(&self, queued: RelocationSnapshot) {
        let viewer = queued.viewer;
        let sessions = self.bars.sessions();
        if !sessions.contains(viewer) {
            tracing::debug!(viewer = %viewer, "Bar gone before re-spawn, skipping");
            return;
        }

        let snapshot = sessions.take_relocation(viewer).unwrap_or(queued);
        let spawn_at = self
            .bars
            .placement()
            .spawn_point(&snapshot.destination, self.bars.view_distance());
        if sessions.respawn(viewer, snapshot.title, snapshot.health, spawn_at) {
            self.bars.refresh(viewer);
            tracing::debug!(viewer = %viewer, "Bar re-spawned after relocation");
        }
    }

    /// Re-send a teleport for every bar, from each viewer's current position.
    pub fn reanchor_all(&self) {
        for viewer in self.bars.sessions().viewers() {
            self.bars.reanchor(viewer);
        }
    }
}
