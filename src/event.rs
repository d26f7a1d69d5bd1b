use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEvent, KeyEventKind};

/// Everything the main loop reacts to in one iteration.
pub enum AppEvent {
    /// A key press (repeats and releases are filtered out).
    Key(KeyEvent),
    /// The terminal was resized; the next draw picks up the new size.
    Resize,
    /// Nothing arrived within the poll interval.
    Tick,
}

/// Wait up to `timeout` for the next terminal event.
///
/// The timeout doubles as the loop's sleep, so a key press is handled as soon
/// as it arrives rather than after a fixed delay.
pub fn next(timeout: Duration) -> Result<AppEvent> {
    if !ct_event::poll(timeout)? {
        return Ok(AppEvent::Tick);
    }

    Ok(match ct_event::read()? {
        // Windows reports both press and release; only act once.
        Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
        Event::Resize(_, _) => AppEvent::Resize,
        _ => AppEvent::Tick,
    })
}
