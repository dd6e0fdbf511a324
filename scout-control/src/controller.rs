use glam::DVec2;

use crate::command::DriveCommand;
use crate::motion::MotionVector;
use crate::pad::{DPad, PadBounds};
use crate::transport::CommandSink;
use crate::SPEED_MAX_SEND_DELAY_MS;

/// The four directional keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveKey {
    Up,
    Down,
    Left,
    Right,
}

impl DriveKey {
    /// Map a DOM `KeyboardEvent.code`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }
}

/// The vector most recently put on the wire and when.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LastSent {
    pub motion: MotionVector,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

/// Turns input events into a debounced stream of drive commands.
///
/// Input handlers only update the current vector. [`tick`](Self::tick) runs on
/// a fixed period, filters the vector, and decides whether it is worth
/// sending: either an axis moved by more than the change threshold since the
/// last send, or the last send is older than the heartbeat interval.
#[derive(Debug, Clone, Default)]
pub struct DriveController {
    motion: MotionVector,
    last_sent: LastSent,
    pointer_active: bool,
    pad: DPad,
}

impl DriveController {
    pub fn new(pad: DPad) -> Self {
        Self {
            pad,
            ..Self::default()
        }
    }

    pub fn motion(&self) -> MotionVector {
        self.motion
    }

    pub fn last_sent(&self) -> LastSent {
        self.last_sent
    }

    pub fn pointer_active(&self) -> bool {
        self.pointer_active
    }

    pub fn pad(&self) -> &DPad {
        &self.pad
    }

    // ── Keyboard ──

    pub fn key_down(&mut self, key: DriveKey) {
        match key {
            DriveKey::Up => self.motion.forward = 1.0,
            DriveKey::Down => self.motion.forward = -1.0,
            DriveKey::Left => self.motion.steer = -1.0,
            DriveKey::Right => self.motion.steer = 1.0,
        }
    }

    pub fn key_up(&mut self, key: DriveKey) {
        match key {
            DriveKey::Up | DriveKey::Down => self.motion.forward = 0.0,
            DriveKey::Left | DriveKey::Right => self.motion.steer = 0.0,
        }
    }

    // ── Mouse ──

    pub fn pointer_down(&mut self, point: DVec2, bounds: &PadBounds) {
        self.motion = self.pad.motion_at(point, bounds);
        self.pointer_active = true;
    }

    /// Returns whether the move was consumed (a button is held).
    pub fn pointer_move(&mut self, point: DVec2, bounds: &PadBounds) -> bool {
        if self.pointer_active {
            self.motion = self.pad.motion_at(point, bounds);
        }
        self.pointer_active
    }

    pub fn pointer_up(&mut self) {
        self.motion = MotionVector::ZERO;
        self.pointer_active = false;
    }

    // ── Touch ──

    pub fn touch_start(&mut self, point: DVec2, bounds: &PadBounds) {
        self.motion = self.pad.motion_at(point, bounds);
    }

    pub fn touch_move(&mut self, point: DVec2, bounds: &PadBounds) {
        self.motion = self.pad.motion_at(point, bounds);
    }

    pub fn touch_end(&mut self) {
        self.motion = MotionVector::ZERO;
    }

    /// Release everything, as if all keys and pointers were let go.
    pub fn release_all(&mut self) {
        self.pointer_up();
    }

    // ── Periodic ──

    /// Filter the current vector and return a command if one should be sent.
    /// `now_ms` is wall-clock time in milliseconds since the Unix epoch.
    pub fn tick(&mut self, now_ms: u64) -> Option<DriveCommand> {
        self.motion = self.motion.filtered();

        let changed = self.motion.differs_noticeably_from(&self.last_sent.motion);
        let stale = now_ms.saturating_sub(self.last_sent.timestamp_ms) > SPEED_MAX_SEND_DELAY_MS;

        if !(changed || stale) {
            return None;
        }

        self.last_sent = LastSent {
            motion: self.motion,
            timestamp_ms: now_ms,
        };
        Some(DriveCommand::from_motion(&self.motion))
    }

    /// [`tick`](Self::tick), then hand the command (if any) to `sink`.
    pub fn run_tick(&mut self, now_ms: u64, sink: &impl CommandSink) -> Option<DriveCommand> {
        let cmd = self.tick(now_ms)?;
        log::debug!("drive {}", cmd.query());
        sink.drive(cmd);
        Some(cmd)
    }
}
