use std::ops::{Index, Range, RangeFull};

use rand::Rng;

use super::{Card, CardBitSet};

/// `FlatDeck` is a deck of cards that allows easy
/// indexing into the cards. It does not provide
/// contains methods.
///
/// The simulator keeps the cards nobody has seen yet in one of these and
/// reshuffles it before every game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatDeck {
    /// Card storage.
    cards: Vec<Card>,
}

impl FlatDeck {
    /// How many cards are there in the deck ?
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all cards been dealt ?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Uniformly permute the deck in place.
    ///
    /// Walks forward from the top and swaps each position with one drawn
    /// uniformly from itself to the end of the deck. `random_range` does
    /// rejection sampling so there's no modulo bias.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.cards.len();
        if n < 2 {
            return;
        }
        for i in 0..n - 1 {
            let j = rng.random_range(i..n);
            self.cards.swap(i, j);
        }
    }
}

impl Default for FlatDeck {
    /// All 52 cards in deck index order.
    fn default() -> Self {
        CardBitSet::default().into()
    }
}

impl From<Vec<Card>> for FlatDeck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

// Trait for converting a CardBitSet into a FlatDeck
// Create the vec for storage and then return the flatdeck
impl From<CardBitSet> for FlatDeck {
    fn from(value: CardBitSet) -> Self {
        value.into_iter().collect::<Vec<Card>>().into()
    }
}

impl Index<usize> for FlatDeck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl Index<Range<usize>> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: Range<usize>) -> &[Card] {
        &self.cards[index]
    }
}

impl Index<RangeFull> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: RangeFull) -> &[Card] {
        &self.cards[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_default_is_ordered_deck() {
        let deck = FlatDeck::default();
        assert_eq!(52, deck.len());
        assert_eq!(Card::from(0), deck[0]);
        assert_eq!(Card::from(51), deck[51]);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut deck = FlatDeck::default();
        deck.shuffle(&mut rng);

        assert_eq!(52, deck.len());
        let set: CardBitSet = deck[..].iter().copied().collect();
        assert_eq!(CardBitSet::default(), set);
        assert_ne!(FlatDeck::default(), deck);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a = FlatDeck::default();
        let mut b = FlatDeck::default();
        a.shuffle(&mut StdRng::seed_from_u64(7));
        b.shuffle(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_tiny_decks() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty = FlatDeck::from(vec![]);
        empty.shuffle(&mut rng);
        assert!(empty.is_empty());

        let mut one = FlatDeck::from(vec![Card::from(3)]);
        one.shuffle(&mut rng);
        assert_eq!(Card::from(3), one[0]);
    }

    #[test]
    fn test_shuffle_top_card_is_uniform() {
        // Every one of 4 cards should land on top about a quarter of the time.
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0usize; 4];
        let cards: Vec<Card> = (0..4u8).map(Card::from).collect();
        for _ in 0..40_000 {
            let mut deck = FlatDeck::from(cards.clone());
            deck.shuffle(&mut rng);
            counts[deck[0].index() as usize] += 1;
        }
        for c in counts {
            assert!((9_000..11_000).contains(&c), "count {c} is not close to 10000");
        }
    }
}
