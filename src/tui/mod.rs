//! Terminal User Interface (TUI) for salutis.
//!
//! An interactive breathing screen built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::error::SalutisError;

/// How long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(mut app: App) -> Result<(), SalutisError> {
    enable_raw_mode()
        .map_err(|e| SalutisError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| SalutisError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| SalutisError::Terminal(format!("Failed to create terminal: {e}")))?;

    info!("tui started");
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
    info!("tui stopped");

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), SalutisError> {
    while !app.should_quit {
        app.drain_ticks()?;

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| SalutisError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::next_action(POLL_INTERVAL)? {
            match action {
                event::Action::Quit => app.quit(),
                event::Action::Previous => app.select_previous(),
                event::Action::Next => app.select_next(),
                event::Action::Toggle => app.toggle(),
                event::Action::Reset => app.reset(),
                event::Action::Help => app.toggle_help(),
            }
        }
    }

    Ok(())
}
