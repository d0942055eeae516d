//! Events delivered by the host runtime and tasks handed to its scheduler.

use serde::{Deserialize, Serialize};

use crate::{BarTitle, Location, ViewerId};

/// Connection and movement notifications for a viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerEvent {
    Connected { viewer: ViewerId },
    Disconnected { viewer: ViewerId },
    /// Forced disconnect.
    Kicked { viewer: ViewerId },
    Teleported { viewer: ViewerId, to: Location },
    Respawned { viewer: ViewerId, at: Location },
}

impl ViewerEvent {
    pub fn viewer(&self) -> ViewerId {
        match self {
            Self::Connected { viewer }
            | Self::Disconnected { viewer }
            | Self::Kicked { viewer }
            | Self::Teleported { viewer, .. }
            | Self::Respawned { viewer, .. } => *viewer,
        }
    }
}

/// Bar state captured when a viewer is relocated.
///
/// The re-spawn fires a few ticks later and restores this state, including
/// any title or health change made while it was pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocationSnapshot {
    pub viewer: ViewerId,
    pub title: BarTitle,
    pub health: f32,
    pub destination: Location,
}

/// Work scheduled on the host's task queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BarTask {
    RespawnAfterRelocation(RelocationSnapshot),
    /// Re-send teleports for every emulated bar.
    Reanchor,
    CountdownTick { viewer: ViewerId },
}
