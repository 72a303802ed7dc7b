use alloc::vec::Vec;
use rand::{Rng, RngCore};

use super::*;

/// Deals `1..=N` twice and shuffles the result with Fisher-Yates.
#[derive(Clone, Debug)]
pub struct ShuffledDeckGenerator<R> {
    rng: R,
}

impl<R: RngCore> ShuffledDeckGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> DeckGenerator for ShuffledDeckGenerator<R> {
    fn generate(&mut self, pairs: PairCount) -> Deck {
        let mut values: Vec<CardValue> = (1..=pairs).chain(1..=pairs).collect();

        for i in (1..values.len()).rev() {
            let j = self.rng.random_range(0..=i);
            values.swap(i, j);
        }

        let deck_nonce = self.rng.next_u64();
        log::trace!("dealt {} pairs, deck {:016x}", pairs, deck_nonce);
        Deck::deal(deck_nonce, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    fn generator(seed: u64) -> ShuffledDeckGenerator<Entropy> {
        ShuffledDeckGenerator::new(Entropy::from_seed(seed))
    }

    #[test]
    fn every_value_appears_exactly_twice() {
        let mut generator = generator(1);

        for pairs in [1, 2, 6, 8, 18, 64] {
            let deck = generator.generate(pairs);
            assert_eq!(deck.len(), 2 * usize::from(pairs));

            let mut counts = alloc::vec![0u8; usize::from(pairs) + 1];
            for card in deck.cards() {
                counts[usize::from(card.value)] += 1;
            }
            assert_eq!(counts[0], 0);
            assert!(counts[1..].iter().all(|&count| count == 2));
        }
    }

    #[test]
    fn card_ids_are_pairwise_distinct() {
        let deck = generator(2).generate(32);

        let ids: HashSet<CardId> = deck.cards().iter().map(|card| card.id).collect();
        assert_eq!(ids.len(), deck.len());
    }

    #[test]
    fn consecutive_decks_get_fresh_ids() {
        let mut generator = generator(3);
        let first = generator.generate(4);
        let second = generator.generate(4);

        assert_ne!(first.cards()[0].id, second.cards()[0].id);
    }

    #[test]
    fn shuffle_is_reproducible_from_seed() {
        assert_eq!(generator(11).generate(8), generator(11).generate(8));
    }

    #[test]
    fn shuffle_moves_cards_around() {
        let deck = generator(5).generate(16);
        let in_order: Vec<CardValue> = (1..=16).chain(1..=16).collect();
        let dealt: Vec<CardValue> = deck.cards().iter().map(|card| card.value).collect();

        assert_ne!(dealt, in_order);
    }

    #[test]
    fn no_pairs_no_cards() {
        assert!(generator(0).generate(0).is_empty());
    }

    #[test]
    fn fallback_generator_deals_full_decks() {
        let deck = ShuffledDeckGenerator::new(Entropy::fallback(77)).generate(8);
        assert_eq!(deck.len(), 16);
    }
}
