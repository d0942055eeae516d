//! Horizontal facing snapped to the four cardinal directions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    South,
    West,
    North,
    East,
}

impl CardinalDirection {
    /// Snap a yaw angle to the nearest cardinal direction.
    ///
    /// Returns `None` when the yaw cannot be mapped (non-finite input).
    pub fn from_yaw(yaw: f32) -> Option<Self> {
        if !yaw.is_finite() {
            return None;
        }

        let quarter = (yaw.rem_euclid(360.0) / 90.0).round() as i32;
        match quarter {
            -4 | 0 | 4 => Some(Self::South),
            -1 | 3 => Some(Self::East),
            -2 | 2 => Some(Self::North),
            -3 | 1 => Some(Self::West),
            _ => None,
        }
    }

    /// Block step `(dx, dz)` for one block in this direction.
    pub fn step(self) -> (i32, i32) {
        match self {
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::North => (0, -1),
            Self::East => (1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_yaw_is_a_right_angle_then_maps_to_matching_direction() {
        assert_eq!(CardinalDirection::from_yaw(0.0), Some(CardinalDirection::South));
        assert_eq!(CardinalDirection::from_yaw(90.0), Some(CardinalDirection::West));
        assert_eq!(CardinalDirection::from_yaw(180.0), Some(CardinalDirection::North));
        assert_eq!(CardinalDirection::from_yaw(270.0), Some(CardinalDirection::East));
    }

    #[test]
    fn when_yaw_wraps_by_a_full_turn_then_direction_is_unchanged() {
        for yaw in [0.0_f32, 90.0, 180.0, 270.0] {
            let expected = CardinalDirection::from_yaw(yaw);
            assert_eq!(CardinalDirection::from_yaw(yaw + 360.0), expected);
            assert_eq!(CardinalDirection::from_yaw(yaw - 360.0), expected);
        }
    }

    #[test]
    fn when_yaw_is_near_full_turn_then_rounds_back_to_south() {
        assert_eq!(CardinalDirection::from_yaw(350.0), Some(CardinalDirection::South));
        assert_eq!(CardinalDirection::from_yaw(-10.0), Some(CardinalDirection::South));
        assert_eq!(CardinalDirection::from_yaw(-90.0), Some(CardinalDirection::East));
    }

    #[test]
    fn when_yaw_not_finite_then_direction_unknown() {
        assert_eq!(CardinalDirection::from_yaw(f32::NAN), None);
        assert_eq!(CardinalDirection::from_yaw(f32::INFINITY), None);
    }
}
