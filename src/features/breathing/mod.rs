//! Guided breathing exercises.
//!
//! A session cycles inhale → hold → exhale → pause with a per-phase
//! countdown, counting completed cycles:
//! - Pattern catalog (built-in plus configured patterns)
//! - Session state machine, advanced one tick per second
//! - Controller owning the cancellable timer that produces ticks
//! - Pure progress values for rendering

pub mod controller;
pub mod pattern;
pub mod phase;
pub mod render;
pub mod session;
pub mod ticker;

pub use controller::BreathingController;
pub use pattern::{BreathingPattern, PatternCatalog};
pub use phase::Phase;
pub use render::{circle_scale, phase_progress, render_progress_bar};
pub use session::{BreathingSession, SessionSnapshot};
pub use ticker::{ThreadTicker, TickEvent, TickSource, TickerHandle};
