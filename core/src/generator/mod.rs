use crate::*;
use alloc::vec::Vec;
pub use random::*;

mod random;

/// Fixed palette the deck draws its symbols from, large enough for the biggest board.
pub const SYMBOLS: [&str; 24] = [
    "🎮", "🎯", "🚀", "⭐", "🎨", "🎪", "🎭", "🎲", "🎸", "🎺", "🥁", "🎹", "🎤", "🎧", "🎵", "🎶",
    "🌟", "💫", "✨", "🔥", "💎", "🌈", "🎊", "🎉",
];

/// Source of freshly dealt decks, each call deals a new one.
pub trait DeckGenerator {
    fn generate(&mut self, difficulty: Difficulty) -> Vec<Card>;
}
