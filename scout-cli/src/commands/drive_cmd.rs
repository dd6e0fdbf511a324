use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use futures::StreamExt;
use ratatui::DefaultTerminal;
use scout_control::{DriveCommand, Endpoint, SPEED_MIN_SEND_DELAY_MS};
use tokio::time::MissedTickBehavior;

use super::now_ms;
use crate::state::{DriveState, KeyHold};
use crate::transport::HttpSink;
use crate::ui;

pub async fn run(endpoint: Endpoint, key_release_ms: u64) -> anyhow::Result<()> {
    let sink = HttpSink::new(endpoint)?;

    let mut terminal = ratatui::init();
    let reports_release = matches!(crossterm::terminal::supports_keyboard_enhancement(), Ok(true));
    if reports_release {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    log::info!(
        "driving {} (key release {})",
        sink.endpoint().origin(),
        if reports_release { "reported" } else { "timed" }
    );

    let mut state = DriveState::new(
        sink.endpoint().origin().to_string(),
        KeyHold::new(key_release_ms, reports_release),
    );
    let result = drive_loop(&mut terminal, &mut state, &sink).await;

    if reports_release {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
    ratatui::restore();

    // Leave the rover stopped rather than waiting for its own command timeout
    if let Err(e) = sink.drive_now(DriveCommand::STOP).await {
        log::warn!("final stop not delivered: {e}");
    }
    result
}

async fn drive_loop(
    terminal: &mut DefaultTerminal,
    state: &mut DriveState,
    sink: &HttpSink,
) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(SPEED_MIN_SEND_DELAY_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| ui::render(frame, state))?;

        tokio::select! {
            _ = ticker.tick() => {
                state.tick(now_ms(), sink);
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => state.handle_key(key, now_ms(), sink),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}
