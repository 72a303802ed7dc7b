use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use entropy::*;
pub use shuffle::*;

mod entropy;
mod shuffle;

pub trait DeckGenerator {
    fn generate(&mut self, pairs: PairCount) -> Deck;
}

/// Cards in dealing order, every value present exactly twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Deals `values` in order, giving every card an id scoped to `deck_nonce`.
    pub(crate) fn deal(deck_nonce: u64, values: impl IntoIterator<Item = CardValue>) -> Self {
        let cards = values
            .into_iter()
            .enumerate()
            .map(|(slot, value)| Card::new(CardId::new(deck_nonce, slot as u32), value))
            .collect();
        Self { cards }
    }

    /// Builds a deck with a known layout, `None` unless each of `1..=N` appears exactly twice.
    pub fn from_values(values: &[CardValue]) -> Option<Self> {
        if values.len() % 2 != 0 {
            return None;
        }
        let pairs = values.len() / 2;
        let mut seen = alloc::vec![0u8; pairs];
        for &value in values {
            let slot = usize::from(value).checked_sub(1)?;
            let count = seen.get_mut(slot)?;
            *count += 1;
            if *count > 2 {
                return None;
            }
        }
        Some(Self::deal(0, values.iter().copied()))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pairs(&self) -> PairCount {
        (self.cards.len() / 2) as PairCount
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}
