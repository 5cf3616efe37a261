//! Breathing phases and their fixed cyclic order.

use serde::{Deserialize, Serialize};

/// One stage of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Breathe in
    Inhale,
    /// Hold after inhaling
    Hold,
    /// Breathe out
    Exhale,
    /// Rest after exhaling
    Pause,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Self; 4] = [Self::Inhale, Self::Hold, Self::Exhale, Self::Pause];

    /// Position in the cycle, also the index into a pattern's durations.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Inhale => 0,
            Self::Hold => 1,
            Self::Exhale => 2,
            Self::Pause => 3,
        }
    }

    /// The phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Inhale => Self::Hold,
            Self::Hold => Self::Exhale,
            Self::Exhale => Self::Pause,
            Self::Pause => Self::Inhale,
        }
    }

    /// Instruction shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inhale => "Breathe In",
            Self::Hold => "Hold",
            Self::Exhale => "Breathe Out",
            Self::Pause => "Pause",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Inhale => "inhale",
            Self::Hold => "hold",
            Self::Exhale => "exhale",
            Self::Pause => "pause",
        };
        write!(f, "{name}")
    }
}
