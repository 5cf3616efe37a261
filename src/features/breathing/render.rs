//! Pure presentation values derived from the session state.

use super::phase::Phase;

/// How far through the current phase the countdown is, in `[0, 1]`.
///
/// Zero-length phases count as fully progressed.
#[must_use]
pub fn phase_progress(phase: Phase, remaining_seconds: u32, durations: [u32; 4]) -> f64 {
    let total = durations[phase.index()];
    if total == 0 {
        return 1.0;
    }
    (1.0 - f64::from(remaining_seconds) / f64::from(total)).clamp(0.0, 1.0)
}

/// Relative size of the breathing circle: grows while inhaling, shrinks
/// while exhaling, full on hold and small on pause.
#[must_use]
pub fn circle_scale(phase: Phase, progress: f64) -> f64 {
    let progress = progress.clamp(0.0, 1.0);
    match phase {
        Phase::Inhale => 0.5 + progress * 0.5,
        Phase::Exhale => 1.0 - progress * 0.5,
        Phase::Hold => 1.0,
        Phase::Pause => 0.5,
    }
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
