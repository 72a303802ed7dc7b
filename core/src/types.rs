use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Pair key shared by exactly two cards of a deck, starting at 1.
pub type CardValue = u16;

/// Count type used for pair counts.
pub type PairCount = u16;

/// Count type used for moves and elapsed seconds.
pub type Counter = u32;

/// Opaque identity of a card, independent of its value.
///
/// `deck` is drawn once per deck build and `slot` is the position the card was dealt to, so
/// ids never collide inside a deck and almost never across decks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    deck: u64,
    slot: u32,
}

impl CardId {
    pub const fn new(deck: u64, slot: u32) -> Self {
        Self { deck, slot }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}-{}", self.deck, self.slot)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub value: CardValue,
    pub is_flipped: bool,
    pub is_matched: bool,
    pub is_shaking: bool,
}

impl Card {
    pub const fn new(id: CardId, value: CardValue) -> Self {
        Self {
            id,
            value,
            is_flipped: false,
            is_matched: false,
            is_shaking: false,
        }
    }

    /// Whether a player may still turn this card face up.
    pub const fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }
}

/// Two board positions resolved together as one move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub first: usize,
    pub second: usize,
}

impl Pair {
    pub const fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }

    pub const fn contains(&self, index: usize) -> bool {
        self.first == index || self.second == index
    }
}

/// Best completed game, fewer moves first and less time as the tie-break.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestResult {
    pub moves: Counter,
    pub seconds: Counter,
}

impl BestResult {
    pub const fn new(moves: Counter, seconds: Counter) -> Self {
        Self { moves, seconds }
    }

    /// A completed game always takes at least one move, anything else was not written by us.
    pub const fn is_plausible(&self) -> bool {
        self.moves >= 1
    }

    pub fn beats(&self, best: Option<&BestResult>) -> bool {
        match best {
            None => true,
            Some(best) => {
                self.moves < best.moves || (self.moves == best.moves && self.seconds < best.seconds)
            }
        }
    }
}

/// Formats seconds as `m:ss`.
pub fn format_time(seconds: Counter) -> String {
    alloc::format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `numerator / denominator` as a rounded percentage, rounding halves up.
pub(crate) const fn rounded_percent(numerator: Counter, denominator: Counter) -> Counter {
    if denominator == 0 {
        return 0;
    }
    let numerator = numerator as u64;
    let denominator = denominator as u64;
    ((numerator * 200 + denominator) / (denominator * 2)) as Counter
}
