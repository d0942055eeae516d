//! Viewer and entity positions.

use serde::{Deserialize, Serialize};

use super::CardinalDirection;

/// A position in the world together with a look direction.
///
/// `yaw` follows the client convention: 0 faces south (+z), 90 west,
/// 180 north and 270 east. `pitch` is positive when looking down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Translate the position, keeping the look direction.
    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
            ..self
        }
    }

    /// Corner of the block containing this position, with no rotation.
    pub fn block(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    /// Block `distance` blocks away from this one along `direction`.
    pub fn relative(self, direction: CardinalDirection, distance: i32) -> Self {
        let (dx, dz) = direction.step();
        self.block().offset(
            f64::from(dx * distance),
            0.0,
            f64::from(dz * distance),
        )
    }
}
