//! Boss bar capability shared by the native provider and the emulation.

use serde::{Deserialize, Serialize};

use bossbar_domain::{ProtocolVersion, ViewerId};

use super::error::BarError;

/// A boss bar shown to a set of viewers.
///
/// Implemented by the native provider, by the legacy emulation and by the
/// version-dispatching facade that combines the two.
pub trait BossBar: Send {
    fn title(&self) -> &str;
    fn set_title(&mut self, title: &str);

    /// Fill as a fraction in `[0, 1]`.
    fn progress(&self) -> f64;
    /// Rejects values outside `[0, 1]` without changing anything.
    fn set_progress(&mut self, progress: f64) -> Result<(), BarError>;

    fn visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    fn viewers(&self) -> Vec<ViewerId>;
    /// Adding a viewer that is already present does nothing.
    fn add_viewer(&mut self, viewer: ViewerId);
    /// Removing a viewer that is not present does nothing.
    fn remove_viewer(&mut self, viewer: ViewerId);
    fn remove_all(&mut self);

    fn close(&mut self) {
        self.remove_all();
    }
}

/// Creates boss bars.
pub trait BossBarFactory: Send + Sync {
    fn new_boss_bar(&self) -> Box<dyn BossBar>;
}

/// Which implementation serves a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarBackend {
    /// Disguised-entity emulation for clients without native boss bars.
    Legacy,
    Native,
}

impl BarBackend {
    pub fn for_version(version: ProtocolVersion) -> Self {
        if version.supports_native_boss_bar() {
            Self::Native
        } else {
            Self::Legacy
        }
    }
}
