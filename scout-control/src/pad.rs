//! Geometry of the on-screen d-pad.
//!
//! The pad is drawn in a view box where the visible edge sits at ±100 units.
//! Pointer positions are normalized so the pad center maps to (0, 0) and the
//! edge of the bounding rectangle maps to ±`overdrive`, which lets a drag that
//! ends slightly past the drawn edge still reach full speed.

use glam::DVec2;

use crate::motion::MotionVector;
use crate::{SPEED_CHANGE_THRESHOLD, SPEED_MIN_THRESHOLD};

/// View-box units per unit of motion.
pub const PAD_UNITS: f64 = 100.0;

/// Default `stroke-width` of the pad outline on the control page.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Client-space bounding rectangle of the pad element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PadBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Position relative to the rectangle, (0, 0) top-left and (1, 1) bottom-right.
    fn relative(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            (point.x - self.left) / self.width,
            (point.y - self.top) / self.height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DPad {
    pub stroke_width: f64,
}

impl Default for DPad {
    fn default() -> Self {
        Self::new(DEFAULT_STROKE_WIDTH)
    }
}

impl DPad {
    pub fn new(stroke_width: f64) -> Self {
        Self { stroke_width }
    }

    /// Scale applied to normalized pointer positions.
    pub fn overdrive(&self) -> f64 {
        1.0 + SPEED_CHANGE_THRESHOLD + self.stroke_width / PAD_UNITS
    }

    /// Motion requested by a pointer at `point` (client coordinates).
    /// The result is not clamped; the controller tick does that.
    pub fn motion_at(&self, point: DVec2, bounds: &PadBounds) -> MotionVector {
        if bounds.is_degenerate() {
            return MotionVector::ZERO;
        }
        let centered = (bounds.relative(point) - DVec2::splat(0.5)) * 2.0 * self.overdrive();
        // Screen y grows downwards, forward is up
        MotionVector::new(-centered.y, centered.x)
    }

    /// `viewBox` attribute value that fits the overdriven pad.
    pub fn view_box(&self) -> String {
        let k = self.overdrive();
        let origin = svg_number(-PAD_UNITS * k);
        let size = svg_number(2.0 * PAD_UNITS * k);
        format!("{origin} {origin} {size} {size}")
    }

    pub fn dead_zone_radius(&self) -> f64 {
        SPEED_MIN_THRESHOLD * PAD_UNITS
    }

    pub fn indicator_radius(&self) -> f64 {
        SPEED_CHANGE_THRESHOLD * PAD_UNITS
    }

    /// Indicator circle center `(cx, cy)` for a sent vector.
    pub fn indicator_position(&self, motion: &MotionVector) -> (f64, f64) {
        (motion.steer * PAD_UNITS, -motion.forward * PAD_UNITS)
    }
}

/// Two decimals with trailing zeros dropped, so float noise stays out of markup.
fn svg_number(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn square() -> PadBounds {
        PadBounds::new(100.0, 50.0, 200.0, 200.0)
    }

    #[test]
    fn test_overdrive_default_stroke() {
        assert!(approx_eq(DPad::default().overdrive(), 1.12));
    }

    #[test]
    fn test_overdrive_no_stroke() {
        assert!(approx_eq(DPad::new(0.0).overdrive(), 1.1));
    }

    #[test]
    fn test_center_is_zero() {
        let v = DPad::default().motion_at(DVec2::new(200.0, 150.0), &square());
        assert!(approx_eq(v.forward, 0.0));
        assert!(approx_eq(v.steer, 0.0));
    }

    #[test]
    fn test_top_edge_is_full_forward_with_overdrive() {
        let pad = DPad::default();
        let v = pad.motion_at(DVec2::new(200.0, 50.0), &square());
        assert!(approx_eq(v.forward, pad.overdrive()));
        assert!(approx_eq(v.steer, 0.0));
    }

    #[test]
    fn test_bottom_right_corner() {
        let pad = DPad::new(0.0);
        let v = pad.motion_at(DVec2::new(300.0, 250.0), &square());
        assert!(approx_eq(v.forward, -1.1));
        assert!(approx_eq(v.steer, 1.1));
    }

    #[test]
    fn test_left_of_center() {
        let pad = DPad::new(0.0);
        // Quarter of the width left of center: -0.5 * 1.1
        let v = pad.motion_at(DVec2::new(150.0, 150.0), &square());
        assert!(approx_eq(v.steer, -0.55));
    }

    #[test]
    fn test_degenerate_bounds() {
        let v = DPad::default().motion_at(DVec2::new(1.0, 1.0), &PadBounds::new(0.0, 0.0, 0.0, 10.0));
        assert_eq!(v, MotionVector::ZERO);
    }

    #[test]
    fn test_view_box() {
        assert_eq!(DPad::new(0.0).view_box(), "-110 -110 220 220");
        assert_eq!(DPad::default().view_box(), "-112 -112 224 224");
        assert_eq!(DPad::new(5.0).view_box(), "-115 -115 230 230");
        assert_eq!(DPad::new(0.5).view_box(), "-110.5 -110.5 221 221");
    }

    #[test]
    fn test_radii() {
        let pad = DPad::default();
        assert!(approx_eq(pad.dead_zone_radius(), 15.0));
        assert!(approx_eq(pad.indicator_radius(), 10.0));
    }

    #[test]
    fn test_indicator_position() {
        let (cx, cy) = DPad::default().indicator_position(&MotionVector::new(0.5, -0.25));
        assert!(approx_eq(cx, -25.0));
        assert!(approx_eq(cy, -50.0));
    }
}
