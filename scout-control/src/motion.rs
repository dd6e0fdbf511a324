use glam::DVec2;

use crate::{SPEED_CHANGE_THRESHOLD, SPEED_MIN_THRESHOLD};

/// Desired normalized rover motion. Both axes are in `[-1, 1]` once filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionVector {
    pub forward: f64,
    pub steer: f64,
}

impl MotionVector {
    pub const ZERO: Self = Self {
        forward: 0.0,
        steer: 0.0,
    };

    pub fn new(forward: f64, steer: f64) -> Self {
        Self { forward, steer }
    }

    /// Steer on x, forward on y.
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.steer, self.forward)
    }

    fn from_dvec2(v: DVec2) -> Self {
        Self {
            forward: v.y,
            steer: v.x,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.as_dvec2().length()
    }

    pub fn is_zero(&self) -> bool {
        self.forward == 0.0 && self.steer == 0.0
    }

    /// Snap to exactly zero when shorter than `min`.
    pub fn apply_dead_zone(self, min: f64) -> Self {
        if self.as_dvec2().length_squared() < min * min {
            Self::ZERO
        } else {
            self
        }
    }

    /// Clamp each axis independently to `[-1, 1]`.
    pub fn clamped(self) -> Self {
        Self::from_dvec2(self.as_dvec2().clamp(DVec2::NEG_ONE, DVec2::ONE))
    }

    /// Dead zone first, then clamp. The order matters for overdriven pad input.
    pub fn filtered(self) -> Self {
        self.apply_dead_zone(SPEED_MIN_THRESHOLD).clamped()
    }

    /// True when either axis moved by strictly more than `threshold`.
    pub fn differs_from(&self, other: &MotionVector, threshold: f64) -> bool {
        (self.forward - other.forward).abs() > threshold
            || (self.steer - other.steer).abs() > threshold
    }

    pub fn differs_noticeably_from(&self, other: &MotionVector) -> bool {
        self.differs_from(other, SPEED_CHANGE_THRESHOLD)
    }
}
