//! Breathing patterns and the catalog offered to the user.
//!
//! The catalog is built once at startup from the built-in patterns plus any
//! `breathing.custom_patterns` in the config, and is never mutated afterwards.

use std::sync::Arc;

use serde::Serialize;

use super::phase::Phase;
use crate::config::PatternConfig;
use crate::error::SalutisError;

/// Built-in patterns: name, description, `[inhale, hold, exhale, pause]`.
const BUILTIN_PATTERNS: [(&str, &str, [u32; 4]); 4] = [
    (
        "4-7-8 Relaxation",
        "Calming technique for stress relief and better sleep",
        [4, 7, 8, 0],
    ),
    (
        "Box Breathing",
        "Equal timing for focus and concentration",
        [4, 4, 4, 4],
    ),
    (
        "Triangle Breathing",
        "Simple pattern for beginners",
        [4, 0, 4, 4],
    ),
    (
        "Energizing Breath",
        "Quick pattern to boost energy and alertness",
        [3, 1, 3, 1],
    ),
];

/// A named assignment of seconds to each phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreathingPattern {
    name: String,
    description: String,
    durations: [u32; 4],
}

impl BreathingPattern {
    /// Create a pattern.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, durations: [u32; 4]) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            durations,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// `[inhale, hold, exhale, pause]` in seconds.
    #[must_use]
    pub const fn durations(&self) -> [u32; 4] {
        self.durations
    }

    /// Seconds configured for `phase`.
    #[must_use]
    pub const fn duration(&self, phase: Phase) -> u32 {
        self.durations[phase.index()]
    }

    /// Durations joined with dashes, e.g. `4-7-8-0`.
    #[must_use]
    pub fn format_durations(&self) -> String {
        self.durations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl From<&PatternConfig> for BreathingPattern {
    fn from(config: &PatternConfig) -> Self {
        Self::new(config.name.trim(), config.description.clone(), config.durations)
    }
}

/// The fixed set of patterns offered in a run of the program.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<Arc<BreathingPattern>>,
}

impl PatternCatalog {
    /// The built-in patterns only.
    #[must_use]
    pub fn builtin() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(name, description, durations)| {
                Arc::new(BreathingPattern::new(*name, *description, *durations))
            })
            .collect();
        Self { patterns }
    }

    /// The built-in patterns followed by `custom`.
    ///
    /// # Errors
    ///
    /// Returns a config error if a name is empty or used twice (names are
    /// compared case-insensitively).
    pub fn with_custom(custom: &[PatternConfig]) -> Result<Self, SalutisError> {
        let mut catalog = Self::builtin();

        for config in custom {
            let pattern = BreathingPattern::from(config);
            if pattern.name().is_empty() {
                return Err(SalutisError::Config(
                    "Custom breathing pattern needs a name".to_string(),
                ));
            }
            if catalog.find(pattern.name()).is_some() {
                return Err(SalutisError::Config(format!(
                    "Duplicate breathing pattern name: {}",
                    pattern.name()
                )));
            }
            catalog.patterns.push(Arc::new(pattern));
        }

        Ok(catalog)
    }

    /// Number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<BreathingPattern>> {
        self.patterns.iter()
    }

    /// Pattern at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<BreathingPattern>> {
        self.patterns.get(index)
    }

    /// Position of the pattern named `name` (case-insensitive).
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.patterns
            .iter()
            .position(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Pattern named exactly `name` (case-insensitive).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Arc<BreathingPattern>> {
        self.position(name).and_then(|i| self.patterns.get(i))
    }

    /// Resolve user input to a pattern.
    ///
    /// Accepts an exact name, a unique case-insensitive prefix
    /// (`box` → "Box Breathing"), or a 1-based index.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing matches and `InvalidInput` if a prefix
    /// is ambiguous.
    pub fn lookup(&self, query: &str) -> Result<Arc<BreathingPattern>, SalutisError> {
        if let Some(pattern) = self.find(query) {
            return Ok(Arc::clone(pattern));
        }

        let query = query.trim();
        if let Ok(n) = query.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| self.patterns.get(i))
                .map(Arc::clone)
                .ok_or_else(|| SalutisError::NotFound(format!("No breathing pattern #{n}")));
        }

        let lower = query.to_lowercase();
        let matches: Vec<_> = self
            .patterns
            .iter()
            .filter(|p| p.name().to_lowercase().starts_with(&lower))
            .collect();

        match matches.as_slice() {
            [single] => Ok(Arc::clone(single)),
            [] => Err(SalutisError::NotFound(format!(
                "No breathing pattern matches '{query}'"
            ))),
            many => Err(SalutisError::InvalidInput(format!(
                "'{query}' matches several patterns: {}",
                many.iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Pattern named `name`, or the first pattern when there is none.
    ///
    /// # Errors
    ///
    /// Returns a config error if the catalog is empty.
    pub fn preferred(&self, name: &str) -> Result<Arc<BreathingPattern>, SalutisError> {
        self.find(name)
            .or_else(|| self.patterns.first())
            .map(Arc::clone)
            .ok_or_else(|| SalutisError::Config("No breathing patterns available".to_string()))
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
