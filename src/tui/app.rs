//! Application state for the TUI.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use crate::error::SalutisError;
use crate::features::breathing::{
    BreathingController, BreathingPattern, BreathingSession, PatternCatalog, ThreadTicker,
    TickEvent,
};

/// Key summary shown in the status bar.
pub const HELP: &str = "j/k:select | space:start/pause | r:reset | ?:help | q:quit";

/// Ticks applied per frame; the rest wait for the next frame.
const MAX_TICKS_PER_FRAME: usize = 64;

/// Application state.
pub struct App {
    /// Patterns offered in the list.
    catalog: PatternCatalog,
    /// Index of the highlighted pattern.
    pub selected: usize,
    controller: BreathingController<ThreadTicker>,
    ticks: Receiver<TickEvent>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the key help is shown.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create the app with `default_pattern` selected, ticking every `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty.
    pub fn new(
        catalog: PatternCatalog,
        default_pattern: &str,
        period: Duration,
    ) -> Result<Self, SalutisError> {
        let pattern = catalog.preferred(default_pattern)?;
        let selected = catalog.position(pattern.name()).unwrap_or_default();
        let (source, ticks) = ThreadTicker::channel(period);

        Ok(Self {
            catalog,
            selected,
            controller: BreathingController::new(pattern, source),
            ticks,
            status: Some("Press space to begin, ? for help".to_string()),
            show_help: false,
            should_quit: false,
        })
    }

    /// Patterns in display order.
    pub fn patterns(&self) -> impl Iterator<Item = &Arc<BreathingPattern>> {
        self.catalog.iter()
    }

    /// Number of patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.catalog.len()
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> &BreathingSession {
        self.controller.session()
    }

    /// Move selection up and switch to that pattern.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.select(self.selected - 1);
        }
    }

    /// Move selection down and switch to that pattern.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.catalog.len() {
            self.select(self.selected + 1);
        }
    }

    fn select(&mut self, index: usize) {
        if let Some(pattern) = self.catalog.get(index) {
            let pattern = Arc::clone(pattern);
            self.selected = index;
            self.status = Some(format!("Selected: {}", pattern.name()));
            self.controller.select_pattern(pattern);
        }
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) {
        self.controller.toggle();
        self.status = Some(if self.session().is_running() {
            "Breathing...".to_string()
        } else {
            "Paused".to_string()
        });
    }

    /// Return to the start of the selected pattern.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.status = Some("Reset".to_string());
    }

    /// Show or hide the key help.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Apply ticks that have arrived since the last call, at most
    /// `MAX_TICKS_PER_FRAME` of them.
    ///
    /// # Errors
    ///
    /// Returns an error if the tick channel is closed.
    pub fn drain_ticks(&mut self) -> Result<(), SalutisError> {
        for _ in 0..MAX_TICKS_PER_FRAME {
            match self.ticks.try_recv() {
                Ok(event) => {
                    self.controller.on_tick(event);
                }
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Disconnected) => {
                    return Err(SalutisError::Terminal("Tick source stopped".to_string()))
                }
            }
        }
        Ok(())
    }

    /// Stop the exercise before leaving.
    pub fn quit(&mut self) {
        self.controller.pause();
        self.should_quit = true;
    }
}
