use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::state::{LineKind, LogBuffer};

/// Render the tail of a log buffer ending at its scroll offset.
pub fn render(frame: &mut Frame, log: &LogBuffer, area: Rect, title: &str) {
    let visible = area.height.saturating_sub(2) as usize;
    let end = (log.scroll_offset + 1).min(log.lines.len());
    let start = end.saturating_sub(visible);

    let lines: Vec<Line> = log.lines[start..end]
        .iter()
        .map(|line| {
            let style = match line.kind {
                LineKind::Command => Style::default(),
                LineKind::Heartbeat => Style::default().fg(Color::DarkGray),
                LineKind::Info => Style::default().fg(Color::Yellow),
            };
            Line::from(vec![
                Span::styled(
                    line.timestamp.format("%H:%M:%S%.3f ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(line.text.clone(), style),
            ])
        })
        .collect();

    let scroll_hint = if log.auto_scroll { "" } else { " [scrolled] " };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .title_bottom(scroll_hint)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(widget, area);
}
