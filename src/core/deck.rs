use super::{Card, CardBitSet, EncodedCard, FlatDeck};

/// The 52 card deck in evaluator encoding.
///
/// Entry `i` is the encoding of the card with deck index `i`. Built once
/// and never changed, so it can be shared between threads freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: [EncodedCard; 52],
}

impl Deck {
    pub const fn new() -> Self {
        let mut cards = [Card::from_index(0).encode(); 52];
        let mut idx = 0;
        while idx < 52 {
            cards[idx] = Card::from_index(idx as u8).encode();
            idx += 1;
        }
        Self { cards }
    }

    /// Look up the packed encoding of a card.
    ///
    /// ```
    /// use holdem_odds::core::{Card, Deck};
    ///
    /// let deck = Deck::new();
    /// let card: Card = "KD".parse().unwrap();
    /// assert_eq!(card.encode(), deck.encode(card));
    /// ```
    #[inline]
    pub fn encode(&self, card: Card) -> EncodedCard {
        self.cards[card.index() as usize]
    }

    /// Every card in the deck that isn't in `known`, lowest index first.
    pub fn unknown_cards(&self, known: &CardBitSet) -> FlatDeck {
        (!*known).into()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EncodedCard> {
        self.cards.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
