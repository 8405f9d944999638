use core::fmt;
use serde::{Deserialize, Serialize};

/// Position of a card in the dealt deck, stable for the lifetime of one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u16);

impl CardId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: &'static str,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    pub const fn new(id: CardId, symbol: &'static str) -> Self {
        Self {
            id,
            symbol,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Whether the symbol is currently visible to the player.
    pub const fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }

    pub const fn can_flip(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }
}
