//! Where the disguised entity goes relative to its viewer.
//!
//! The client only draws the bar while the entity is loaded, so it is kept
//! out of sight: straight above or below the viewer, or at the edge of the
//! render distance in the direction the viewer is facing.

use bossbar_domain::{CardinalDirection, Location};

/// Vertical distance used to hide the entity above or below the viewer.
pub const VERTICAL_HIDE_OFFSET: f64 = 300.0;
/// Pitch (degrees) from which the viewer counts as looking straight down or up.
pub const STEEP_PITCH: f32 = 55.0;
const BLOCKS_PER_CHUNK: u32 = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    below_ground: bool,
}

impl Placement {
    pub fn new(below_ground: bool) -> Self {
        Self { below_ground }
    }

    pub fn below_ground(&self) -> bool {
        self.below_ground
    }

    /// Anchor for a viewer at `viewer`, or `None` when the facing cannot be
    /// resolved.
    pub fn anchor(&self, viewer: &Location, view_distance: u32) -> Option<Location> {
        if self.below_ground || viewer.pitch >= STEEP_PITCH {
            return Some(viewer.offset(0.0, -VERTICAL_HIDE_OFFSET, 0.0));
        }
        if viewer.pitch <= -STEEP_PITCH {
            return Some(viewer.offset(0.0, VERTICAL_HIDE_OFFSET, 0.0));
        }

        let direction = CardinalDirection::from_yaw(viewer.yaw)?;
        let blocks = view_distance.saturating_mul(BLOCKS_PER_CHUNK);
        let distance = i32::try_from(blocks).unwrap_or(i32::MAX);
        Some(viewer.relative(direction, distance))
    }

    /// Anchor, falling back to the hiding spot below the viewer.
    pub fn spawn_point(&self, viewer: &Location, view_distance: u32) -> Location {
        self.anchor(viewer, view_distance)
            .unwrap_or_else(|| viewer.offset(0.0, -VERTICAL_HIDE_OFFSET, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW_DISTANCE: u32 = 10;

    fn facing(yaw: f32, pitch: f32) -> Location {
        Location::new(0.5, 64.0, 0.5).with_rotation(yaw, pitch)
    }

    #[test]
    fn when_viewer_faces_a_cardinal_direction_then_anchor_is_at_render_edge() {
        let placement = Placement::new(false);
        let cases = [
            (0.0, Location::new(0.0, 64.0, 160.0)),
            (90.0, Location::new(-160.0, 64.0, 0.0)),
            (180.0, Location::new(0.0, 64.0, -160.0)),
            (270.0, Location::new(160.0, 64.0, 0.0)),
        ];

        for (yaw, expected) in cases {
            assert_eq!(placement.anchor(&facing(yaw, 0.0), VIEW_DISTANCE), Some(expected));
            assert_eq!(
                placement.anchor(&facing(yaw + 360.0, 0.0), VIEW_DISTANCE),
                Some(expected)
            );
            assert_eq!(
                placement.anchor(&facing(yaw - 360.0, 0.0), VIEW_DISTANCE),
                Some(expected)
            );
        }
    }

    #[test]
    fn when_pitch_is_steep_then_offset_is_vertical_regardless_of_yaw() {
        let placement = Placement::new(false);

        for yaw in [0.0, 37.0, 180.0, -90.0] {
            let down = facing(yaw, 55.0);
            let anchor = placement.anchor(&down, VIEW_DISTANCE).unwrap();
            assert_eq!((anchor.x, anchor.y, anchor.z), (0.5, -236.0, 0.5));

            let up = facing(yaw, -70.0);
            let anchor = placement.anchor(&up, VIEW_DISTANCE).unwrap();
            assert_eq!((anchor.x, anchor.y, anchor.z), (0.5, 364.0, 0.5));
        }
    }

    #[test]
    fn when_below_ground_mode_then_always_below_viewer() {
        let placement = Placement::new(true);

        let anchor = placement.anchor(&facing(90.0, -80.0), VIEW_DISTANCE).unwrap();

        assert_eq!(anchor.y, 64.0 - VERTICAL_HIDE_OFFSET);
        assert_eq!(anchor.x, 0.5);
    }

    #[test]
    fn when_yaw_is_not_finite_then_no_anchor_and_spawn_hides_below() {
        let placement = Placement::new(false);
        let viewer = facing(f32::NAN, 0.0);

        assert_eq!(placement.anchor(&viewer, VIEW_DISTANCE), None);
        assert_eq!(placement.spawn_point(&viewer, VIEW_DISTANCE).y, -236.0);
    }
}
