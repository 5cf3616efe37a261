//! Breathing command implementation.
//!
//! `breathe run` drives a [`BreathingController`] from a [`ThreadTicker`] and
//! prints one line per phase until the requested cycles are done.

use std::io::Write;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::cli::args::{BreatheCommands, OutputFormat};
use crate::config::Config;
use crate::error::SalutisError;
use crate::features::breathing::{
    BreathingController, BreathingPattern, PatternCatalog, ThreadTicker, TickEvent, TickSource,
};
use crate::output::{format_patterns, format_phase_pretty};

/// Execute breathe subcommands.
///
/// # Errors
///
/// Returns an error if the pattern catalog is invalid, the pattern cannot be
/// resolved, or output cannot be written.
pub fn breathe(
    config: &Config,
    cmd: BreatheCommands,
    format: OutputFormat,
) -> Result<String, SalutisError> {
    let catalog = PatternCatalog::with_custom(&config.breathing.custom_patterns)?;

    match cmd {
        BreatheCommands::List => format_patterns(&catalog, format),
        BreatheCommands::Run { pattern, cycles } => {
            let pattern = match pattern {
                Some(query) => catalog.lookup(&query)?,
                None => catalog.preferred(&config.breathing.default_pattern)?,
            };
            let cycles = cycles.unwrap_or(config.breathing.default_cycles);
            let period = config.breathing.tick_period()?;

            let (source, ticks) = ThreadTicker::channel(period);
            let mut stdout = std::io::stdout().lock();
            let summary = run_exercise(pattern, source, &ticks, cycles, format, &mut stdout)?;
            format_summary(&summary, format)
        }
    }
}

/// What a finished exercise accomplished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSummary {
    pub pattern: String,
    pub cycles: u32,
    pub phase_changes: u32,
}

/// Run `pattern` until `cycles` cycles are complete, writing one line per
/// phase to `out`.
///
/// # Errors
///
/// Returns `InvalidInput` for zero cycles, and an error if the tick channel
/// closes or `out` cannot be written.
pub fn run_exercise<S: TickSource, W: Write>(
    pattern: Arc<BreathingPattern>,
    source: S,
    ticks: &Receiver<TickEvent>,
    cycles: u32,
    format: OutputFormat,
    out: &mut W,
) -> Result<ExerciseSummary, SalutisError> {
    if cycles == 0 {
        return Err(SalutisError::InvalidInput(
            "cycles must be at least 1".to_string(),
        ));
    }

    if format == OutputFormat::Pretty {
        writeln!(
            out,
            "{} ({}), {} cycles. Press Ctrl+C to stop.",
            pattern.name().bold(),
            pattern.format_durations(),
            cycles
        )?;
    }

    let mut controller = BreathingController::new(Arc::clone(&pattern), source);
    controller.start();
    info!(pattern = pattern.name(), cycles, "breathing exercise started");

    write_phase(&controller, format, out)?;
    let mut phase_changes = 0;

    while controller.session().cycle_count() < cycles {
        let event = ticks
            .recv()
            .map_err(|e| SalutisError::Terminal(format!("Tick source stopped: {e}")))?;

        if controller.on_tick(event).is_some() {
            phase_changes += 1;
            if controller.session().cycle_count() < cycles {
                write_phase(&controller, format, out)?;
            }
        }
    }

    controller.pause();
    info!(pattern = pattern.name(), cycles, "breathing exercise finished");

    Ok(ExerciseSummary {
        pattern: pattern.name().to_string(),
        cycles: controller.session().cycle_count(),
        phase_changes,
    })
}

fn write_phase<S: TickSource, W: Write>(
    controller: &BreathingController<S>,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), SalutisError> {
    let snapshot = controller.session().snapshot();
    let line = match format {
        OutputFormat::Pretty => format_phase_pretty(&snapshot),
        OutputFormat::Json => serde_json::to_string(&snapshot)?,
    };
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

fn format_summary(summary: &ExerciseSummary, format: OutputFormat) -> Result<String, SalutisError> {
    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Completed {} cycles of {}.",
            "✓".green(),
            summary.cycles,
            summary.pattern.bold()
        )),
        OutputFormat::Json => Ok(serde_json::to_string(summary)?),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn run(durations: [u32; 4], cycles: u32, format: OutputFormat) -> (ExerciseSummary, String) {
        let pattern = Arc::new(BreathingPattern::new("Test", "", durations));
        let (source, ticks) = ThreadTicker::channel(Duration::from_millis(1));
        let mut out = Vec::new();
        let summary = run_exercise(pattern, source, &ticks, cycles, format, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_box_breathing_one_cycle() {
        let (summary, out) = run([4, 4, 4, 4], 1, OutputFormat::Json);

        assert_eq!(summary.cycles, 1);
        assert_eq!(summary.phase_changes, 4);

        let phases: Vec<String> = out
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["phase"].to_string())
            .collect();
        assert_eq!(phases, vec!["\"inhale\"", "\"hold\"", "\"exhale\"", "\"pause\""]);
    }

    #[test]
    fn test_zero_phase_is_not_printed() {
        let (summary, out) = run([4, 0, 4, 4], 2, OutputFormat::Json);

        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.phase_changes, 6);
        assert!(!out.contains("\"hold\""));
        assert_eq!(out.lines().count(), 6);
    }

    #[test]
    fn test_pretty_output_has_header() {
        let (_, out) = run([1, 1, 1, 1], 1, OutputFormat::Pretty);
        assert!(out.contains("Test"));
        assert!(out.contains("1-1-1-1"));
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn test_zero_cycles_rejected() {
        let pattern = Arc::new(BreathingPattern::new("Test", "", [1, 1, 1, 1]));
        let (source, ticks) = ThreadTicker::channel(Duration::from_millis(1));
        let result = run_exercise(pattern, source, &ticks, 0, OutputFormat::Json, &mut Vec::<u8>::new());
        assert!(matches!(result, Err(SalutisError::InvalidInput(_))));
    }

    #[test]
    fn test_json_summary_is_a_single_line() {
        let (summary, _) = run([1, 1, 1, 1], 1, OutputFormat::Json);
        let line = format_summary(&summary, OutputFormat::Json).unwrap();

        assert_eq!(line.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["phaseChanges"], 4);
    }
}
