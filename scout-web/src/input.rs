use glam::DVec2;
use scout_control::{DriveController, DriveKey, PadBounds};

/// Browser input reduced to what the drive controller needs.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown { code: String },
    KeyUp { code: String },
    MouseDown { client: DVec2 },
    MouseMove { client: DVec2 },
    MouseUp,
    TouchStart { client: DVec2 },
    TouchMove { client: DVec2 },
    TouchEnd,
}

/// What the DOM handler should do with the original event afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    PreventDefault,
    PassThrough,
}

/// Feed one event into the controller. `bounds` is the d-pad's current
/// client rectangle; only pointer events look at it.
pub fn apply(ctrl: &mut DriveController, event: &InputEvent, bounds: &PadBounds) -> Disposition {
    match event {
        InputEvent::KeyDown { code } => {
            if let Some(key) = DriveKey::from_code(code) {
                ctrl.key_down(key);
            }
            // The page must not scroll on arrow keys
            Disposition::PreventDefault
        }
        InputEvent::KeyUp { code } => {
            if let Some(key) = DriveKey::from_code(code) {
                ctrl.key_up(key);
            }
            Disposition::PassThrough
        }
        InputEvent::MouseDown { client } => {
            ctrl.pointer_down(*client, bounds);
            Disposition::PassThrough
        }
        InputEvent::MouseMove { client } => {
            if ctrl.pointer_move(*client, bounds) {
                Disposition::PreventDefault
            } else {
                Disposition::PassThrough
            }
        }
        InputEvent::MouseUp => {
            ctrl.pointer_up();
            Disposition::PassThrough
        }
        InputEvent::TouchStart { client } => {
            ctrl.touch_start(*client, bounds);
            Disposition::PassThrough
        }
        InputEvent::TouchMove { client } => {
            ctrl.touch_move(*client, bounds);
            Disposition::PassThrough
        }
        InputEvent::TouchEnd => {
            ctrl.touch_end();
            Disposition::PassThrough
        }
    }
}
