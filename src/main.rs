mod app;
mod clock;
mod event;
mod format;
mod logging;
mod stopwatch;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    style::Stylize,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::app::App;
use crate::event::AppEvent;
use crate::format::format_elapsed;

#[derive(Parser)]
#[command(name = "console-stopwatch", about = "Interactive terminal stopwatch")]
struct Cli {
    /// Refresh and key-poll interval in milliseconds
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Write diagnostics to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init(path)?;
    }
    info!(tick_ms = cli.tick_ms, "starting stopwatch");

    // ── Terminal setup ──────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Panic hook: restore terminal before printing the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    // ── Run ─────────────────────────────────────────────────────
    let result = run(&mut terminal, Duration::from_millis(cli.tick_ms));

    // ── Terminal teardown ───────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let elapsed = result?;
    info!(elapsed = %format_elapsed(elapsed), "quitting");
    println!(
        "{}",
        "Thank you for using the Stopwatch Application. Goodbye!".magenta()
    );
    Ok(())
}

/// Drive the stopwatch until the user quits. Returns the final elapsed time.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    tick: Duration,
) -> Result<Duration> {
    let mut app = App::new();

    // ── Main loop ───────────────────────────────────────────────
    // Quit is only honoured at the top of an iteration.
    while !app.should_quit {
        app.on_tick();
        terminal.draw(|frame| ui::draw(frame, &app))?;

        match event::next(tick)? {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Resize | AppEvent::Tick => {}
        }
    }

    Ok(app.stopwatch.elapsed())
}
