//! In-memory viewer directory.
//!
//! Tracks positions and negotiated protocol versions of connected viewers for
//! hosts that push updates into the engine instead of answering queries.

use dashmap::DashMap;

use bossbar_domain::{Location, ProtocolVersion, ViewerId};

use super::ports::{ProtocolVersionPort, ViewerLocator};

#[derive(Debug, Clone, Copy)]
struct ViewerState {
    location: Location,
    version: ProtocolVersion,
}

#[derive(Debug)]
pub struct InMemoryViewers {
    viewers: DashMap<ViewerId, ViewerState>,
    view_distance: u32,
    /// Reported for viewers the directory has never seen.
    default_version: ProtocolVersion,
}

impl InMemoryViewers {
    pub fn new(view_distance: u32) -> Self {
        Self {
            viewers: DashMap::new(),
            view_distance,
            default_version: ProtocolVersion::V1_9,
        }
    }

    pub fn connect(&self, viewer: ViewerId, version: ProtocolVersion, location: Location) {
        self.viewers.insert(viewer, ViewerState { location, version });
        tracing::debug!(viewer = %viewer, version = %version, "Viewer registered");
    }

    pub fn disconnect(&self, viewer: ViewerId) {
        if self.viewers.remove(&viewer).is_some() {
            tracing::debug!(viewer = %viewer, "Viewer unregistered");
        }
    }

    /// Returns false when the viewer is not connected.
    pub fn move_to(&self, viewer: ViewerId, location: Location) -> bool {
        match self.viewers.get_mut(&viewer) {
            Some(mut state) => {
                state.location = location;
                true
            }
            None => false,
        }
    }

    /// Update the negotiated version, e.g. after a protocol upgrade.
    pub fn set_version(&self, viewer: ViewerId, version: ProtocolVersion) {
        if let Some(mut state) = self.viewers.get_mut(&viewer) {
            state.version = version;
        }
    }

    pub fn is_connected(&self, viewer: ViewerId) -> bool {
        self.viewers.contains_key(&viewer)
    }
}

impl ViewerLocator for InMemoryViewers {
    fn location(&self, viewer: ViewerId) -> Option<Location> {
        self.viewers.get(&viewer).map(|state| state.location)
    }

    fn view_distance(&self) -> u32 {
        self.view_distance
    }
}

impl ProtocolVersionPort for InMemoryViewers {
    fn protocol_version(&self, viewer: ViewerId) -> ProtocolVersion {
        self.viewers
            .get(&viewer)
            .map(|state| state.version)
            .unwrap_or(self.default_version)
    }
}
