pub mod drive_view;
pub mod log_panel;

use ratatui::prelude::*;

use crate::state::DriveState;

pub fn render(frame: &mut Frame, state: &DriveState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(14), Constraint::Length(10)])
        .split(frame.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(0)])
        .split(rows[0]);

    drive_view::render_pad(frame, state, top[0]);
    drive_view::render_info(frame, state, top[1]);
    log_panel::render(frame, &state.log, rows[1], " Commands ");
}
