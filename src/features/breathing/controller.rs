//! Breathing session controller.
//!
//! Couples a [`BreathingSession`] with the timer that drives it. The
//! controller holds at most one live timer handle: `start` acquires one, and
//! `pause`, `reset` and `select_pattern` drop it. Ticks from a dropped handle
//! are recognised by their generation and ignored.

use std::sync::Arc;

use tracing::{debug, trace};

use super::pattern::BreathingPattern;
use super::phase::Phase;
use super::session::BreathingSession;
use super::ticker::{TickEvent, TickSource};

/// Drives a breathing session from a tick source.
pub struct BreathingController<S: TickSource> {
    session: BreathingSession,
    source: S,
    timer: Option<S::Handle>,
    generation: u64,
}

impl<S: TickSource> BreathingController<S> {
    /// Create a stopped controller for `pattern`.
    pub fn new(pattern: Arc<BreathingPattern>, source: S) -> Self {
        Self {
            session: BreathingSession::new(pattern),
            source,
            timer: None,
            generation: 0,
        }
    }

    /// Switch pattern. Always stops the timer and resets.
    pub fn select_pattern(&mut self, pattern: Arc<BreathingPattern>) {
        self.release_timer();
        debug!(pattern = pattern.name(), "breathing pattern selected");
        self.session.select_pattern(pattern);
    }

    /// Start or resume the exercise.
    pub fn start(&mut self) {
        if !self.session.start() {
            return;
        }
        self.generation += 1;
        self.timer = Some(self.source.schedule(self.generation));
        debug!(
            generation = self.generation,
            phase = %self.session.phase(),
            remaining = self.session.remaining_seconds(),
            "breathing started"
        );
    }

    /// Pause, keeping the current position.
    pub fn pause(&mut self) {
        self.release_timer();
        if self.session.pause() {
            debug!(
                phase = %self.session.phase(),
                remaining = self.session.remaining_seconds(),
                "breathing paused"
            );
        }
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) {
        if self.session.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and return to the first phase of the active pattern.
    pub fn reset(&mut self) {
        self.release_timer();
        self.session.reset();
        debug!(pattern = self.session.pattern().name(), "breathing reset");
    }

    /// Apply a tick from the timer.
    ///
    /// Returns the new phase on a transition. Ticks from a released timer
    /// are ignored.
    pub fn on_tick(&mut self, event: TickEvent) -> Option<Phase> {
        if self.timer.is_none() || event.generation != self.generation {
            trace!(
                stale = event.generation,
                current = self.generation,
                "ignoring stale tick"
            );
            return None;
        }

        let transition = self.session.tick();
        if let Some(phase) = transition {
            debug!(
                %phase,
                remaining = self.session.remaining_seconds(),
                cycles = self.session.cycle_count(),
                "breathing phase changed"
            );
        }
        transition
    }

    /// Current session state.
    pub fn session(&self) -> &BreathingSession {
        &self.session
    }

    /// Whether a timer handle is currently held.
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Generation of the most recently acquired timer.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn release_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            drop(handle);
            trace!(generation = self.generation, "timer released");
        }
    }
}
