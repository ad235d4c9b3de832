use std::fmt;
use std::str::FromStr;

use super::CardParseError;

/// The prime assigned to each value, `Two` through `Ace`.
///
/// The product of the primes of five cards identifies the multiset of
/// values in the hand, which is what the evaluator keys paired hands on.
pub const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Get all of the `Value`'s that are possible, lowest first.
    pub const fn values() -> [Value; 13] {
        VALUES
    }

    /// Convert the zero based index (`Two` is 0) back into a value.
    /// Anything past the ace saturates to `Ace`.
    pub const fn from_index(idx: u8) -> Value {
        if idx < 13 {
            VALUES[idx as usize]
        } else {
            Value::Ace
        }
    }

    /// Parse the single character rank symbol used in card tokens
    /// and in the equivalence class table.
    ///
    /// ```
    /// use holdem_odds::core::Value;
    ///
    /// assert_eq!(Some(Value::Ten), Value::from_char('T'));
    /// assert_eq!(None, Value::from_char('1'));
    /// ```
    pub fn from_char(c: char) -> Option<Value> {
        match c {
            'A' => Some(Value::Ace),
            'K' => Some(Value::King),
            'Q' => Some(Value::Queen),
            'J' => Some(Value::Jack),
            'T' => Some(Value::Ten),
            '9' => Some(Value::Nine),
            '8' => Some(Value::Eight),
            '7' => Some(Value::Seven),
            '6' => Some(Value::Six),
            '5' => Some(Value::Five),
            '4' => Some(Value::Four),
            '3' => Some(Value::Three),
            '2' => Some(Value::Two),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Value::Ace => 'A',
            Value::King => 'K',
            Value::Queen => 'Q',
            Value::Jack => 'J',
            Value::Ten => 'T',
            Value::Nine => '9',
            Value::Eight => '8',
            Value::Seven => '7',
            Value::Six => '6',
            Value::Five => '5',
            Value::Four => '4',
            Value::Three => '3',
            Value::Two => '2',
        }
    }

    /// The prime number for this value. Two is 2, Ace is 41.
    pub const fn prime(self) -> u32 {
        PRIMES[self as usize]
    }

    /// The one hot 13 bit mask for this value. Two is bit 0, Ace is bit 12.
    pub const fn rank_bit(self) -> u16 {
        1 << (self as u16)
    }

    /// English name used when building display names.
    pub const fn name(self) -> &'static str {
        match self {
            Value::Ace => "Ace",
            Value::King => "King",
            Value::Queen => "Queen",
            Value::Jack => "Jack",
            Value::Ten => "Ten",
            Value::Nine => "Nine",
            Value::Eight => "Eight",
            Value::Seven => "Seven",
            Value::Six => "Six",
            Value::Five => "Five",
            Value::Four => "Four",
            Value::Three => "Three",
            Value::Two => "Deuce",
        }
    }

    pub const fn plural(self) -> &'static str {
        match self {
            Value::Six => "Sixes",
            Value::Two => "Deuces",
            Value::Ace => "Aces",
            Value::King => "Kings",
            Value::Queen => "Queens",
            Value::Jack => "Jacks",
            Value::Ten => "Tens",
            Value::Nine => "Nines",
            Value::Eight => "Eights",
            Value::Seven => "Sevens",
            Value::Five => "Fives",
            Value::Four => "Fours",
            Value::Three => "Threes",
        }
    }
}

/// Enum for the four different suits.
///
/// The discriminant is the order the deck is laid out in: all the clubs
/// come first, then diamonds, hearts and spades.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Clubs
    Club = 0,
    /// Diamonds
    Diamond = 1,
    /// Hearts
    Heart = 2,
    /// Spades
    Spade = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Suit; 4] {
        SUITS
    }

    pub const fn from_index(idx: u8) -> Suit {
        SUITS[(idx & 0b11) as usize]
    }

    pub fn from_char(s: char) -> Option<Suit> {
        match s {
            'C' => Some(Suit::Club),
            'D' => Some(Suit::Diamond),
            'H' => Some(Suit::Heart),
            'S' => Some(Suit::Spade),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Club => 'C',
            Suit::Diamond => 'D',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
        }
    }

    /// One hot 4 bit mask: clubs 1000, diamonds 0100, hearts 0010, spades 0001.
    pub const fn mask(self) -> u32 {
        0b1000 >> (self as u32)
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
///
/// Every card has a stable index in `0..52`: `suit * 13 + value`, so the
/// clubs are 0 through 12 and the ace of spades is 51.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Build a card from its deck index. Indexes past 51 wrap.
    pub const fn from_index(idx: u8) -> Self {
        let idx = idx % 52;
        Self {
            value: Value::from_index(idx % 13),
            suit: Suit::from_index(idx / 13),
        }
    }

    /// Index of this card in the deck.
    ///
    /// ```
    /// use holdem_odds::core::{Card, Suit, Value};
    ///
    /// assert_eq!(0, Card::new(Value::Two, Suit::Club).index());
    /// assert_eq!(51, Card::new(Value::Ace, Suit::Spade).index());
    /// ```
    pub const fn index(self) -> u8 {
        (self.suit as u8) * 13 + self.value as u8
    }

    /// Pack the card into the 32 bit evaluator encoding.
    pub const fn encode(self) -> EncodedCard {
        let value = self.value as u32;
        EncodedCard(
            self.value.prime() | (value << 8) | (self.suit.mask() << 12) | (1 << (16 + value)),
        )
    }
}

impl From<u8> for Card {
    fn from(idx: u8) -> Self {
        Card::from_index(idx)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.index()
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parse a two character token such as `"AH"` or `"7S"`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(v), Some(s), None) => {
                let value = Value::from_char(v).ok_or(CardParseError::UnexpectedValueChar(v))?;
                let suit = Suit::from_char(s).ok_or(CardParseError::UnexpectedSuitChar(s))?;
                Ok(Card { value, suit })
            }
            _ => Err(CardParseError::WrongLength(token.to_string())),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

/// A card packed into 32 bits:
///
/// ```text
/// +--------+--------+--------+--------+
/// |xxxbbbbb|bbbbbbbb|cdhsrrrr|xxpppppp|
/// +--------+--------+--------+--------+
/// ```
///
/// `p` is the value's prime, `r` the value index, `cdhs` the one hot suit
/// and `b` the one hot value bit (`AKQJT98765432`).
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Default)]
pub struct EncodedCard(u32);

impl EncodedCard {
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn prime(self) -> u32 {
        self.0 & 0x3F
    }

    pub const fn value_index(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    pub const fn suit_mask(self) -> u32 {
        (self.0 >> 12) & 0xF
    }

    pub const fn rank_bits(self) -> u16 {
        (self.0 >> 16) as u16
    }
}

impl From<Card> for EncodedCard {
    fn from(card: Card) -> Self {
        card.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::mem;

    #[test]
    fn test_constructor() {
        let c = Card {
            value: Value::Three,
            suit: Suit::Spade,
        };
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!(Value::Three, c.value);
    }

    #[test]
    fn test_value_cmp() {
        assert!(Value::Two < Value::Ace);
        assert!(Value::King < Value::Ace);
        assert_eq!(Value::Two, Value::Two);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Value::Two, Value::from_index(0));
        assert_eq!(Value::Ace, Value::from_index(12));
    }

    #[test]
    fn test_size() {
        // Card should be really small. Hopefully just two u8's
        assert!(mem::size_of::<Card>() <= 4);
        assert_eq!(4, mem::size_of::<EncodedCard>());
    }

    #[test]
    fn test_parse_indexes() {
        assert_eq!(0, "2C".parse::<Card>().unwrap().index());
        assert_eq!(12, "AC".parse::<Card>().unwrap().index());
        assert_eq!(13, "2D".parse::<Card>().unwrap().index());
        assert_eq!(34, "TH".parse::<Card>().unwrap().index());
        assert_eq!(48, "JS".parse::<Card>().unwrap().index());
        assert_eq!(51, "AS".parse::<Card>().unwrap().index());
    }

    #[test]
    fn test_parse_is_injective() {
        let mut seen = HashSet::new();
        for s in Suit::suits() {
            for v in Value::values() {
                let token = format!("{}{}", v.to_char(), s.to_char());
                let card: Card = token.parse().unwrap();
                assert_eq!(token, card.to_string());
                assert!(seen.insert(card.index()));
            }
        }
        assert_eq!(52, seen.len());
    }

    #[test]
    fn test_index_round_trip() {
        for idx in 0..52u8 {
            assert_eq!(idx, Card::from(idx).index());
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Err(CardParseError::WrongLength("A".to_string())),
            "A".parse::<Card>()
        );
        assert_eq!(
            Err(CardParseError::WrongLength("AHS".to_string())),
            "AHS".parse::<Card>()
        );
        assert_eq!(
            Err(CardParseError::UnexpectedValueChar('1')),
            "1H".parse::<Card>()
        );
        assert_eq!(
            Err(CardParseError::UnexpectedSuitChar('x')),
            "Ax".parse::<Card>()
        );
        assert!("ah".parse::<Card>().is_err());
    }

    #[test]
    fn test_encoding_fields() {
        let ace_spades = Card::new(Value::Ace, Suit::Spade).encode();
        assert_eq!(41, ace_spades.prime());
        assert_eq!(12, ace_spades.value_index());
        assert_eq!(0b0001, ace_spades.suit_mask());
        assert_eq!(1 << 12, ace_spades.rank_bits());

        let two_clubs = Card::new(Value::Two, Suit::Club).encode();
        assert_eq!(2, two_clubs.prime());
        assert_eq!(0, two_clubs.value_index());
        assert_eq!(0b1000, two_clubs.suit_mask());
        assert_eq!(1, two_clubs.rank_bits());
        // The classic Cactus Kev value for the deuce of clubs.
        assert_eq!(0x0001_8002, two_clubs.raw());
    }
}
