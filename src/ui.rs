use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, MessageKind, StatusMessage};
use crate::clock::Clock;
use crate::format::format_elapsed;
use crate::stopwatch::State;

const COMMANDS: [&str; 4] = [
    "  [S] Start the Stopwatch",
    "  [T] Stop the Stopwatch",
    "  [R] Reset the Stopwatch",
    "  [Q] Quit the Application",
];

const PROMPT: &str = "Press a key to begin...";

/// Render the full TUI frame.
pub fn draw<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(6), // command list
            Constraint::Length(1), // elapsed time
            Constraint::Length(1), // spacer
            Constraint::Length(1), // status message
            Constraint::Min(0),
        ])
        .split(frame.area());

    // ── Title ───────────────────────────────────────────────────
    let title = Paragraph::new(Line::from(Span::styled(
        "Welcome to the Console Stopwatch",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .centered()
    .block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(title, chunks[0]);

    // ── Commands ────────────────────────────────────────────────
    let mut command_lines = vec![Line::from("Available Commands:")];
    command_lines.extend(COMMANDS.iter().map(|c| Line::from(*c)));
    frame.render_widget(Paragraph::new(command_lines), chunks[1]);

    // ── Elapsed time ────────────────────────────────────────────
    let (label, label_color) = match app.stopwatch.state() {
        State::Running => ("running", Color::Green),
        State::Idle => ("stopped", Color::DarkGray),
    };
    let elapsed = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Elapsed Time: {}", format_elapsed(app.stopwatch.elapsed())),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({label})"), Style::default().fg(label_color)),
    ]));
    frame.render_widget(elapsed, chunks[2]);

    // ── Status message ──────────────────────────────────────────
    let status = match app.status() {
        Some(msg) => style_message(msg),
        None => Line::from(Span::styled(PROMPT, Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(Paragraph::new(status), chunks[4]);
}

/// Colour a status message by the notification that produced it.
fn style_message(msg: StatusMessage) -> Line<'static> {
    let color = match msg.kind {
        MessageKind::Started => Color::Green,
        MessageKind::Stopped => Color::Yellow,
        MessageKind::Reset => Color::Cyan,
        MessageKind::Invalid => Color::Red,
    };
    Line::from(Span::styled(msg.text, Style::default().fg(color)))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::clock::ManualClock;
    use crate::stopwatch::Stopwatch;

    fn render(app: &App<ManualClock>) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn find_row(buf: &Buffer, needle: &str) -> Option<u16> {
        (0..buf.area.height).find(|&y| row_text(buf, y).contains(needle))
    }

    fn press(app: &mut App<ManualClock>, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    fn app() -> (App<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (App::with_stopwatch(Stopwatch::with_clock(clock.clone())), clock)
    }

    #[test]
    fn initial_frame_shows_zero_and_prompt() {
        let (app, _clock) = app();
        let buf = render(&app);
        assert!(find_row(&buf, "Welcome to the Console Stopwatch").is_some());
        assert!(find_row(&buf, "[Q] Quit the Application").is_some());
        assert!(find_row(&buf, "Elapsed Time: 00:00").is_some());
        assert!(find_row(&buf, "(stopped)").is_some());
        assert!(find_row(&buf, PROMPT).is_some());
    }

    #[test]
    fn running_time_is_rendered_with_started_message() {
        let (mut app, clock) = app();
        press(&mut app, 's');
        clock.advance(Duration::from_secs(45));
        app.on_tick();

        let buf = render(&app);
        assert!(find_row(&buf, "Elapsed Time: 00:45").is_some());
        assert!(find_row(&buf, "(running)").is_some());

        let y = find_row(&buf, "Stopwatch Started!").expect("status row");
        let x = row_text(&buf, y).find('S').unwrap() as u16;
        assert_eq!(buf[(x, y)].fg, Color::Green);
    }

    #[test]
    fn long_runs_switch_to_hours() {
        let (mut app, clock) = app();
        press(&mut app, 's');
        clock.advance(Duration::from_secs(3661));
        press(&mut app, 't');

        let buf = render(&app);
        assert!(find_row(&buf, "Elapsed Time: 01:01:01").is_some());
    }

    #[test]
    fn invalid_command_is_red() {
        let (mut app, _clock) = app();
        press(&mut app, 'z');

        let buf = render(&app);
        let y = find_row(&buf, "Invalid Command!").expect("status row");
        let x = row_text(&buf, y).find('I').unwrap() as u16;
        assert_eq!(buf[(x, y)].fg, Color::Red);
    }
}
