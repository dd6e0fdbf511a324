use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Circle, Rectangle};
use ratatui::widgets::{Block, Borders, Paragraph};
use scout_control::pad::PAD_UNITS;

use crate::state::DriveState;

const PAD_EXTENT: f64 = PAD_UNITS * 1.15;

/// The d-pad with the current input and the last sent vector.
pub fn render_pad(frame: &mut Frame, state: &DriveState, area: Rect) {
    let pad = *state.controller.pad();
    let sent = state.controller.last_sent().motion;
    let current = state.controller.motion();
    // Canvas y grows upwards, so forward maps straight onto it
    let (sent_x, sent_y) = (sent.steer * PAD_UNITS, sent.forward * PAD_UNITS);
    let (cur_x, cur_y) = (current.steer * PAD_UNITS, current.forward * PAD_UNITS);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pad ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_bounds([-PAD_EXTENT, PAD_EXTENT])
        .y_bounds([-PAD_EXTENT, PAD_EXTENT])
        .paint(move |ctx| {
            ctx.draw(&Rectangle {
                x: -PAD_UNITS,
                y: -PAD_UNITS,
                width: 2.0 * PAD_UNITS,
                height: 2.0 * PAD_UNITS,
                color: Color::Gray,
            });
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: pad.dead_zone_radius(),
                color: Color::DarkGray,
            });
            ctx.draw(&Circle {
                x: cur_x,
                y: cur_y,
                radius: pad.indicator_radius() / 2.0,
                color: Color::Yellow,
            });
            ctx.draw(&Circle {
                x: sent_x,
                y: sent_y,
                radius: pad.indicator_radius(),
                color: Color::Green,
            });
        });
    frame.render_widget(canvas, area);
}

pub fn render_info(frame: &mut Frame, state: &DriveState, area: Rect) {
    let current = state.controller.motion();
    let last = state.controller.last_sent();
    let release_mode = if state.keys.reports_release() {
        "key release reported"
    } else {
        "key release timed"
    };

    let mut info = vec![
        Line::styled("Scout Drive", Style::default().bold().fg(Color::Cyan)),
        Line::styled(state.origin.clone(), Style::default().fg(Color::DarkGray)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Input:  "),
            Span::styled(
                format!("fwd {:+.2}  steer {:+.2}", current.forward, current.steer),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::raw("Sent:   "),
            Span::styled(
                match state.last_command {
                    Some(cmd) => cmd.to_string(),
                    None => "-".to_string(),
                },
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::raw(format!("Count:  {}", state.commands_sent)),
        Line::raw(format!("Speed:  {}", state.speed_level)),
        Line::styled(
            format!("        {release_mode}"),
            Style::default().fg(Color::DarkGray),
        ),
        Line::raw(""),
    ];

    if state.show_help || last.timestamp_ms == 0 {
        info.extend([
            Line::raw("[Arrows] Drive"),
            Line::raw("[Space]  Stop"),
            Line::raw("[+/-]    Speed level"),
            Line::raw("[PgUp/PgDn] Scroll log"),
            Line::raw("[g/G]    Top/Bottom"),
            Line::raw("[q/Esc]  Quit"),
        ]);
    } else {
        info.push(Line::styled("[?] Help", Style::default().fg(Color::DarkGray)));
    }

    let widget = Paragraph::new(info).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(widget, area);
}
