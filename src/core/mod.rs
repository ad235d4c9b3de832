//! This is the core module. It exports the non-holdem
//! related code: cards, the deck and five card hand evaluation.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, EncodedCard, PRIMES, Suit, Value};

/// Bit set of cards, used for finding the unseen cards.
mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Deck is the normal 52 card deck, in evaluator encoding.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Flattened deck
mod flat_deck;
/// Export the shuffle buffer.
pub use self::flat_deck::FlatDeck;

/// Errors
mod error;
pub use self::error::{CardParseError, DataSourceError, EvaluationError, SimulationError};

/// Hand categories and equivalence ranks.
mod rank;
pub use self::rank::{CATEGORY_UPPER_BOUNDS, HandCategory, HandRank, NUM_EQUIVALENCE_CLASSES};

/// Where the equivalence classes come from.
mod equivalence;
pub use self::equivalence::{
    CsvEquivalenceSource, EquivalenceClass, EquivalenceSource, GeneratedEquivalenceSource,
    write_csv,
};

/// The tables built from the equivalence classes.
mod lookup;
pub use self::lookup::LookupTables;

/// The 21 ways to pick five cards out of seven.
mod combinations;
pub use self::combinations::{FIVE_OF_SEVEN, NUM_FIVE_OF_SEVEN};

/// 5 Card hand ranking code.
mod evaluator;
pub use self::evaluator::HandEvaluator;

/// Bit set of players, used to record who won a game.
mod player_bit_set;
pub use self::player_bit_set::{ActivePlayerBitSetIter, PlayerBitSet};
