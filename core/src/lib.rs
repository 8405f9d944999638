#![no_std]

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scheduler::*;
pub use score::*;
pub use store::*;

mod card;
mod engine;
mod error;
mod generator;
mod scheduler;
mod score;
mod store;

/// Named board configuration, serialized with the lowercase names used by the stored leaderboard.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Medium and hard currently share the same board, kept as is for stored-score compatibility.
    pub const fn config(self) -> DifficultyConfig {
        use Difficulty::*;
        match self {
            Easy => DifficultyConfig::new_unchecked(4, 8),
            Medium => DifficultyConfig::new_unchecked(6, 18),
            Hard => DifficultyConfig::new_unchecked(6, 18),
        }
    }

    pub const fn pairs(self) -> PairCount {
        self.config().pairs
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy (4×4)",
            Medium => "Medium (6×6)",
            Hard => "Hard (6×6)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Count type used for pairs, moves and matches.
pub type PairCount = u32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Side length of the square board.
    pub grid_size: u8,
    pub pairs: PairCount,
}

impl DifficultyConfig {
    pub const fn new_unchecked(grid_size: u8, pairs: PairCount) -> Self {
        Self { grid_size, pairs }
    }

    pub const fn total_cards(&self) -> usize {
        self.pairs as usize * 2
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    Ignored,
    Flipped,
    PairSelected,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Flipped => true,
            Self::PairSelected => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Task belonged to a replaced session or its guard no longer holds.
    Stale,
    Ticked,
    Matched,
    Mismatched,
    Won { score: u32, new_best: bool },
}

impl TaskOutcome {
    pub const fn has_update(self) -> bool {
        use TaskOutcome::*;
        match self {
            Stale => false,
            Ticked => true,
            Matched => true,
            Mismatched => true,
            Won { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_and_hard_share_board() {
        assert_eq!(Difficulty::Easy.config(), DifficultyConfig::new_unchecked(4, 8));
        assert_eq!(Difficulty::Medium.config(), Difficulty::Hard.config());
        assert_eq!(Difficulty::Hard.config().total_cards(), 36);
    }

    #[test]
    fn difficulty_names_round_trip_through_from_name() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_name(difficulty.name()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_name("nightmare"), None);
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"medium\"");
        let hard: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(hard, Difficulty::Hard);
    }
}
