//! Validated bar fill amounts.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Bar fill as a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Percent(f32);

impl Percent {
    pub const FULL: Self = Self(100.0);

    pub fn new(value: f32) -> Result<Self, DomainError> {
        if (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(format!(
                "Percent must be between 0 and 100, but was: {value}"
            )))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Fill as a fraction in `[0, 1]`.
    pub fn fraction(self) -> f32 {
        self.0 / 100.0
    }
}

/// Bar fill as a fraction in `[0, 1]`, the unit used by boss bar APIs.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Progress(f64);

impl Progress {
    pub const FULL: Self = Self(1.0);

    pub fn new(value: f64) -> Result<Self, DomainError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(format!(
                "Progress must be between 0 and 1, but was: {value}"
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_percent(self) -> Percent {
        // In range by construction; clamp guards float rounding at the edges.
        Percent((self.0 * 100.0).clamp(0.0, 100.0) as f32)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_percent_in_range_then_accepted() {
        for value in [0.0, 0.5, 50.0, 100.0] {
            assert_eq!(Percent::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn when_percent_out_of_range_then_validation_error() {
        for value in [-0.1, 100.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Percent::new(value),
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn when_progress_out_of_range_then_validation_error() {
        assert!(Progress::new(1.5).is_err());
        assert!(Progress::new(-0.01).is_err());
        assert!(Progress::new(f64::NAN).is_err());
    }

    #[test]
    fn progress_converts_to_percent() {
        let percent = Progress::new(0.25).unwrap().to_percent();
        assert!((percent.value() - 25.0).abs() < f32::EPSILON);
    }
}
