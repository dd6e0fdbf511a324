use std::collections::HashMap;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use scout_control::{CommandSink, DriveCommand, DriveController, DriveKey, Setting};

// ─── Key Hold Tracking ───────────────────────────────────────────────

/// Tracks which arrow keys are held.
///
/// Terminals that report key releases hand us real key-up events. Others only
/// send presses and auto-repeats, so a key is treated as released once no
/// repeat has arrived for `release_after_ms`.
#[derive(Debug, Clone)]
pub struct KeyHold {
    last_seen: HashMap<DriveKey, u64>,
    release_after_ms: u64,
    reports_release: bool,
}

impl KeyHold {
    pub fn new(release_after_ms: u64, reports_release: bool) -> Self {
        Self {
            last_seen: HashMap::new(),
            release_after_ms,
            reports_release,
        }
    }

    pub fn press(&mut self, key: DriveKey, now_ms: u64, ctrl: &mut DriveController) {
        self.last_seen.insert(key, now_ms);
        ctrl.key_down(key);
    }

    pub fn release(&mut self, key: DriveKey, ctrl: &mut DriveController) {
        if self.last_seen.remove(&key).is_some() {
            ctrl.key_up(key);
        }
    }

    /// Release keys whose repeats stopped. No-op when real releases are reported.
    pub fn expire(&mut self, now_ms: u64, ctrl: &mut DriveController) {
        if self.reports_release {
            return;
        }
        let expired: Vec<DriveKey> = self
            .last_seen
            .iter()
            .filter(|(_, seen)| now_ms.saturating_sub(**seen) > self.release_after_ms)
            .map(|(&key, _)| key)
            .collect();
        for key in expired {
            self.release(key, ctrl);
        }
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }

    pub fn is_held(&self, key: DriveKey) -> bool {
        self.last_seen.contains_key(&key)
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }
}

// ─── Log Buffer ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Command,
    Heartbeat,
    Info,
}

#[derive(Debug, Clone)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub text: String,
    pub kind: LineKind,
}

pub struct LogBuffer {
    pub lines: Vec<LogLine>,
    pub scroll_offset: usize,
    pub auto_scroll: bool,
    max_lines: usize,
}

impl LogBuffer {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: Vec::new(),
            scroll_offset: 0,
            auto_scroll: true,
            max_lines,
        }
    }

    pub fn push(&mut self, text: String, kind: LineKind) {
        if self.lines.len() >= self.max_lines {
            self.lines.remove(0);
            self.scroll_offset = self.scroll_offset.saturating_sub(1);
        }
        self.lines.push(LogLine {
            timestamp: chrono::Local::now(),
            text,
            kind,
        });
        if self.auto_scroll {
            self.scroll_to_bottom();
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.lines.len().saturating_sub(1);
        self.auto_scroll = true;
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
        self.auto_scroll = false;
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = (self.scroll_offset + amount).min(self.lines.len().saturating_sub(1));
        if self.scroll_offset >= self.lines.len().saturating_sub(1) {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
        self.auto_scroll = false;
    }
}

// ─── Drive Session State ─────────────────────────────────────────────

pub struct DriveState {
    pub origin: String,
    pub controller: DriveController,
    pub keys: KeyHold,
    pub log: LogBuffer,
    /// Motor speed level, the rover's `speed` setting.
    pub speed_level: i32,
    pub commands_sent: u64,
    pub last_command: Option<DriveCommand>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl DriveState {
    pub fn new(origin: String, keys: KeyHold) -> Self {
        let speed_level = Setting::lookup("speed").map_or(0, |s| s.default);
        Self {
            origin,
            controller: DriveController::default(),
            keys,
            log: LogBuffer::new(2000),
            speed_level,
            commands_sent: 0,
            last_command: None,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64, sink: &impl CommandSink) {
        if let Some(drive_key) = drive_key(key.code) {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.keys.press(drive_key, now_ms, &mut self.controller)
                }
                KeyEventKind::Release => self.keys.release(drive_key, &mut self.controller),
            }
            return;
        }

        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => {
                self.keys.clear();
                self.controller.release_all();
                self.log.push("stop".into(), LineKind::Info);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(1, sink),
            KeyCode::Char('-') => self.change_speed(-1, sink),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::PageUp => self.log.scroll_up(10),
            KeyCode::PageDown => self.log.scroll_down(10),
            KeyCode::Char('g') => self.log.scroll_to_top(),
            KeyCode::Char('G') => self.log.scroll_to_bottom(),
            _ => {}
        }
    }

    fn change_speed(&mut self, delta: i32, sink: &impl CommandSink) {
        let Some(setting) = Setting::lookup("speed") else {
            return;
        };
        let level = setting.clamp(self.speed_level + delta);
        if level == self.speed_level {
            return;
        }
        self.speed_level = level;
        let param = setting.param(level);
        sink.set_parameter(&param);
        self.log.push(format!("set {}", param.query()), LineKind::Info);
    }

    /// One send period: expire released keys, then let the controller decide.
    pub fn tick(&mut self, now_ms: u64, sink: &impl CommandSink) -> Option<DriveCommand> {
        self.keys.expire(now_ms, &mut self.controller);
        let cmd = self.controller.run_tick(now_ms, sink)?;

        let kind = if self.last_command == Some(cmd) {
            LineKind::Heartbeat
        } else {
            LineKind::Command
        };
        self.log.push(cmd.to_string(), kind);
        self.last_command = Some(cmd);
        self.commands_sent += 1;
        Some(cmd)
    }
}

fn drive_key(code: KeyCode) -> Option<DriveKey> {
    match code {
        KeyCode::Up => Some(DriveKey::Up),
        KeyCode::Down => Some(DriveKey::Down),
        KeyCode::Left => Some(DriveKey::Left),
        KeyCode::Right => Some(DriveKey::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_KEY_RELEASE_MS;
    use scout_control::{ConfigParam, MotionVector};
    use std::cell::RefCell;

    const T0: u64 = 1_700_000_000_000;

    #[derive(Default)]
    struct RecordingSink {
        drives: RefCell<Vec<DriveCommand>>,
        params: RefCell<Vec<ConfigParam>>,
    }

    impl CommandSink for RecordingSink {
        fn drive(&self, cmd: DriveCommand) {
            self.drives.borrow_mut().push(cmd);
        }

        fn set_parameter(&self, param: &ConfigParam) {
            self.params.borrow_mut().push(param.clone());
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    // ── KeyHold ──

    #[test]
    fn test_key_hold_expires_without_repeats() {
        let mut ctrl = DriveController::default();
        let mut keys = KeyHold::new(300, false);
        keys.press(DriveKey::Up, T0, &mut ctrl);
        keys.expire(T0 + 300, &mut ctrl);
        assert!(keys.is_held(DriveKey::Up));
        assert_eq!(ctrl.motion().forward, 1.0);

        keys.expire(T0 + 301, &mut ctrl);
        assert!(!keys.is_held(DriveKey::Up));
        assert_eq!(ctrl.motion().forward, 0.0);
    }

    #[test]
    fn test_key_hold_repeat_keeps_key_down() {
        let mut ctrl = DriveController::default();
        let mut keys = KeyHold::new(300, false);
        keys.press(DriveKey::Left, T0, &mut ctrl);
        keys.press(DriveKey::Left, T0 + 250, &mut ctrl);
        keys.expire(T0 + 500, &mut ctrl);
        assert!(keys.is_held(DriveKey::Left));
    }

    #[test]
    fn test_key_hold_with_release_reporting_never_expires() {
        let mut ctrl = DriveController::default();
        let mut keys = KeyHold::new(300, true);
        keys.press(DriveKey::Right, T0, &mut ctrl);
        keys.expire(T0 + 10_000, &mut ctrl);
        assert!(keys.is_held(DriveKey::Right));
        keys.release(DriveKey::Right, &mut ctrl);
        assert_eq!(ctrl.motion(), MotionVector::ZERO);
    }

    #[test]
    fn test_held_key_with_slow_autorepeat_never_stops() {
        // X11 defaults: first repeat after 660 ms, then every 40 ms
        let sink = RecordingSink::default();
        let keys = KeyHold::new(DEFAULT_KEY_RELEASE_MS, false);
        let mut state = DriveState::new("http://rover".into(), keys);
        state.handle_key(press(KeyCode::Up), T0, &sink);

        for elapsed in (0..2000).step_by(10) {
            if elapsed >= 660 && (elapsed - 660) % 40 == 0 {
                state.handle_key(press(KeyCode::Up), T0 + elapsed, &sink);
            }
            if elapsed % 50 == 0 {
                state.tick(T0 + elapsed, &sink);
            }
        }

        let drives = sink.drives.borrow();
        assert!(drives.len() >= 4);
        assert!(drives
            .iter()
            .all(|cmd| *cmd == DriveCommand { forward: 100, steer: 0 }));
    }

    #[test]
    fn test_release_of_unheld_key_leaves_axis_alone() {
        let mut ctrl = DriveController::default();
        let mut keys = KeyHold::new(300, true);
        keys.press(DriveKey::Up, T0, &mut ctrl);
        keys.release(DriveKey::Down, &mut ctrl);
        assert_eq!(ctrl.motion().forward, 1.0);
    }

    // ── DriveState ──

    #[test]
    fn test_arrow_press_and_release_drive() {
        let sink = RecordingSink::default();
        let mut state = DriveState::new("http://rover".into(), KeyHold::new(500, true));
        assert_eq!(state.tick(T0, &sink), Some(DriveCommand::STOP));

        state.handle_key(press(KeyCode::Up), T0 + 10, &sink);
        assert_eq!(state.tick(T0 + 50, &sink), Some(DriveCommand { forward: 100, steer: 0 }));

        state.handle_key(release(KeyCode::Up), T0 + 60, &sink);
        assert_eq!(state.tick(T0 + 100, &sink), Some(DriveCommand::STOP));
        assert_eq!(state.commands_sent, 3);
        assert_eq!(sink.drives.borrow().len(), 3);
    }

    #[test]
    fn test_heartbeat_logged_as_heartbeat() {
        let sink = RecordingSink::default();
        let mut state = DriveState::new("http://rover".into(), KeyHold::new(500, true));
        state.tick(T0, &sink);
        assert_eq!(state.tick(T0 + 501, &sink), Some(DriveCommand::STOP));
        assert_eq!(state.log.lines.last().map(|l| l.kind), Some(LineKind::Heartbeat));
    }

    #[test]
    fn test_space_stops_everything() {
        let sink = RecordingSink::default();
        let mut state = DriveState::new("http://rover".into(), KeyHold::new(500, false));
        state.handle_key(press(KeyCode::Up), T0, &sink);
        state.handle_key(press(KeyCode::Right), T0, &sink);
        state.handle_key(press(KeyCode::Char(' ')), T0, &sink);
        assert_eq!(state.controller.motion(), MotionVector::ZERO);
        assert!(!state.keys.is_held(DriveKey::Up));
    }

    #[test]
    fn test_quit_keys() {
        let sink = RecordingSink::default();
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut state = DriveState::new("http://rover".into(), KeyHold::new(500, false));
            state.handle_key(key, T0, &sink);
            assert!(state.should_quit);
        }
    }

    #[test]
    fn test_speed_keys_send_clamped_setting() {
        let sink = RecordingSink::default();
        let mut state = DriveState::new("http://rover".into(), KeyHold::new(500, false));
        assert_eq!(state.speed_level, 8);
        // Already at the maximum: nothing to send
        state.handle_key(press(KeyCode::Char('+')), T0, &sink);
        assert!(sink.params.borrow().is_empty());

        state.handle_key(press(KeyCode::Char('-')), T0, &sink);
        state.handle_key(press(KeyCode::Char('-')), T0, &sink);
        assert_eq!(state.speed_level, 6);
        assert_eq!(
            *sink.params.borrow(),
            vec![ConfigParam::new("speed", "7"), ConfigParam::new("speed", "6")]
        );
    }

    // ── LogBuffer ──

    #[test]
    fn test_log_buffer_max_lines_eviction() {
        let mut buf = LogBuffer::new(3);
        for text in ["a", "b", "c", "d"] {
            buf.push(text.into(), LineKind::Info);
        }
        assert_eq!(buf.lines.len(), 3);
        assert_eq!(buf.lines[0].text, "b");
        assert_eq!(buf.lines[2].text, "d");
    }

    #[test]
    fn test_log_buffer_scroll_up_disables_auto_scroll() {
        let mut buf = LogBuffer::new(100);
        for i in 0..10 {
            buf.push(format!("line {i}"), LineKind::Command);
        }
        assert!(buf.auto_scroll);
        buf.scroll_up(3);
        assert!(!buf.auto_scroll);
        assert_eq!(buf.scroll_offset, 6);
    }

    #[test]
    fn test_log_buffer_scroll_down_clamps() {
        let mut buf = LogBuffer::new(100);
        buf.push("only line".into(), LineKind::Info);
        buf.scroll_to_top();
        buf.scroll_down(1000);
        assert_eq!(buf.scroll_offset, 0);
        assert!(buf.auto_scroll);
    }
}
