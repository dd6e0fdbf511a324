use scout_control::DriveController;

/// `cx`/`cy` for the d-pad's indicator circle. Follows the vector that was
/// last put on the wire, before it was rounded to whole percent.
pub fn position(ctrl: &DriveController) -> (f64, f64) {
    ctrl.pad().indicator_position(&ctrl.last_sent().motion)
}

#[cfg(target_arch = "wasm32")]
pub fn place(indicator: &web_sys::Element, ctrl: &DriveController) {
    let (cx, cy) = position(ctrl);
    let _ = indicator.set_attribute("cx", &cx.to_string());
    let _ = indicator.set_attribute("cy", &cy.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use scout_control::{DPad, PadBounds};

    #[test]
    fn test_position_before_first_send_is_centre() {
        let ctrl = DriveController::default();
        assert_eq!(position(&ctrl), (0.0, 0.0));
    }

    #[test]
    fn test_position_uses_unrounded_sent_vector() {
        let mut ctrl = DriveController::new(DPad::new(0.0));
        let bounds = PadBounds::new(0.0, 0.0, 1000.0, 1000.0);
        // forward = -2 * (270/1000 - 0.5) * 1.1 = 0.506
        ctrl.pointer_down(DVec2::new(500.0, 270.0), &bounds);
        let cmd = ctrl.tick(1_700_000_000_000).unwrap();
        assert_eq!(cmd.forward, 51);

        let (cx, cy) = position(&ctrl);
        assert!(cx.abs() < 1e-9);
        assert!((cy + 50.6).abs() < 1e-9, "cy = {cy}");
    }
}
