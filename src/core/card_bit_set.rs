use std::fmt::Debug;
use std::ops::{BitOrAssign, Not};

use super::Card;

/// This struct is a bitset for cards
/// Each card is represented by the bit at its deck index in a 64 bit integer
///
/// The bit is set if the card present
/// The bit is unset if the card not in the set
///
/// Iteration always yields cards in ascending deck index order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardBitSet {
    cards: u64,
}

const FIFTY_TWO_ONES: u64 = (1 << 52) - 1;

impl CardBitSet {
    /// Create a new empty bitset
    ///
    /// ```
    /// use holdem_odds::core::CardBitSet;
    /// let cards = CardBitSet::new();
    /// assert!(cards.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self { cards: 0 }
    }

    /// Insert a card, returning `false` if it was already present.
    ///
    /// ```
    /// use holdem_odds::core::{Card, CardBitSet, Suit, Value};
    /// let mut cards = CardBitSet::new();
    ///
    /// assert!(cards.insert(Card::new(Value::Six, Suit::Club)));
    /// assert!(!cards.insert(Card::new(Value::Six, Suit::Club)));
    /// assert_eq!(1, cards.count());
    /// ```
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1 << u8::from(card);
        let fresh = self.cards & bit == 0;
        self.cards |= bit;
        fresh
    }

    pub fn contains(&self, card: Card) -> bool {
        (self.cards & (1 << u8::from(card))) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.cards == 0
    }

    pub fn count(&self) -> usize {
        self.cards.count_ones() as usize
    }
}

impl Default for CardBitSet {
    /// Create a new bitset with all the cards in it
    /// ```
    /// use holdem_odds::core::CardBitSet;
    ///
    /// assert_eq!(52, CardBitSet::default().count());
    /// ```
    fn default() -> Self {
        Self {
            cards: FIFTY_TWO_ONES,
        }
    }
}

impl Debug for CardBitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(*self).finish()
    }
}

impl BitOrAssign<Card> for CardBitSet {
    fn bitor_assign(&mut self, rhs: Card) {
        self.cards |= 1 << u8::from(rhs);
    }
}

impl Not for CardBitSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            cards: !self.cards & FIFTY_TWO_ONES, // Ensure we only keep the first 52 bits
        }
    }
}

/// The iterator for the CardBitSet
/// It iterates over the cards in the bitset
pub struct CardBitSetIter(u64);

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardBitSetIter(self.cards)
    }
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }

        let card = self.0.trailing_zeros();
        self.0 &= !(1 << card);

        Some(Card::from(card as u8))
    }
}

impl FromIterator<Card> for CardBitSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut set = CardBitSet::new();
        for card in iter {
            set |= card;
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let cards = CardBitSet::new();
        assert!(cards.is_empty());
        assert_eq!(0, cards.into_iter().count());
    }

    #[test]
    fn test_insert_all() {
        let mut all_cards = CardBitSet::new();
        for idx in 0..52u8 {
            assert!(all_cards.insert(Card::from(idx)));
        }
        assert_eq!(CardBitSet::default(), all_cards);
    }

    #[test]
    fn test_not_is_complement() {
        let known: CardBitSet = ["AS", "KD", "2C"]
            .iter()
            .map(|s| s.parse::<Card>().unwrap())
            .collect();
        let unknown = !known;

        assert_eq!(49, unknown.count());
        for card in known {
            assert!(!unknown.contains(card));
        }
        let all: CardBitSet = known.into_iter().chain(unknown).collect();
        assert_eq!(CardBitSet::default(), all);
    }

    #[test]
    fn test_iter_ascending() {
        let cards: Vec<u8> = CardBitSet::default().into_iter().map(u8::from).collect();
        assert_eq!((0..52).collect::<Vec<u8>>(), cards);
    }
}
