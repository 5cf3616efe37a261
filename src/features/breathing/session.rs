//! Breathing session state machine.
//!
//! The session owns the countdown state for one pattern. It knows nothing
//! about clocks: whoever drives it calls [`BreathingSession::tick`] once per
//! second while it is running.

use std::sync::Arc;

use serde::Serialize;

use super::pattern::BreathingPattern;
use super::phase::Phase;
use super::render::phase_progress;

/// Countdown state for the active pattern.
#[derive(Debug, Clone)]
pub struct BreathingSession {
    pattern: Arc<BreathingPattern>,
    phase: Phase,
    remaining_seconds: u32,
    cycle_count: u32,
    running: bool,
}

/// Read-only view of a session, for JSON output and logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Active pattern name
    pub pattern: String,
    /// Current phase
    pub phase: Phase,
    /// Instruction for the current phase
    pub label: &'static str,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Completed cycles
    pub cycle_count: u32,
    /// Whether the countdown is advancing
    pub running: bool,
    /// Progress through the current phase in `[0, 1]`
    pub progress: f64,
}

impl BreathingSession {
    /// Create a stopped session at the start of `pattern`.
    #[must_use]
    pub fn new(pattern: Arc<BreathingPattern>) -> Self {
        let remaining_seconds = pattern.duration(Phase::Inhale);
        Self {
            pattern,
            phase: Phase::Inhale,
            remaining_seconds,
            cycle_count: 0,
            running: false,
        }
    }

    /// Switch to `pattern` and reset.
    pub fn select_pattern(&mut self, pattern: Arc<BreathingPattern>) {
        self.pattern = pattern;
        self.reset();
    }

    /// Resume the countdown.
    ///
    /// Returns true if the session was not already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Suspend the countdown, keeping phase, remaining time and cycles.
    ///
    /// Returns true if the session was running.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Stop and return to the start of the active pattern.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Inhale;
        self.remaining_seconds = self.pattern.duration(Phase::Inhale);
        self.cycle_count = 0;
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the new phase when the tick caused a transition. Zero-length
    /// phases are passed through in the same tick, stopping after at most one
    /// full cycle of phases.
    pub fn tick(&mut self) -> Option<Phase> {
        if !self.running {
            return None;
        }

        if self.remaining_seconds > 1 {
            self.remaining_seconds -= 1;
            return None;
        }

        self.enter_next_phase();
        let mut traversed = 1;
        while self.remaining_seconds == 0 && traversed < Phase::ALL.len() {
            self.enter_next_phase();
            traversed += 1;
        }

        Some(self.phase)
    }

    fn enter_next_phase(&mut self) {
        self.phase = self.phase.next();
        self.remaining_seconds = self.pattern.duration(self.phase);
        if self.phase == Phase::Inhale {
            self.cycle_count += 1;
        }
    }

    /// Active pattern.
    #[must_use]
    pub fn pattern(&self) -> &Arc<BreathingPattern> {
        &self.pattern
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left in the current phase.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Completed cycles since the last reset.
    #[must_use]
    pub const fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    /// Whether the countdown is advancing.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Progress through the current phase in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        phase_progress(self.phase, self.remaining_seconds, self.pattern.durations())
    }

    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            pattern: self.pattern.name().to_string(),
            phase: self.phase,
            label: self.phase.label(),
            remaining_seconds: self.remaining_seconds,
            cycle_count: self.cycle_count,
            running: self.running,
            progress: self.progress(),
        }
    }
}
