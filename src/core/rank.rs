use std::cmp::Ordering;
use std::fmt;

/// Number of distinct five card hand strengths.
pub const NUM_EQUIVALENCE_CLASSES: usize = 7462;

/// The nine kinds of poker hand, strongest first.
///
/// The discriminant is the column offset used in every odds matrix.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandCategory {
    /// Five cards in a sequence all fo the same suit.
    StraightFlush = 0,
    /// Four of the same value.
    FourOfAKind = 1,
    /// Three of one value and two of another value
    FullHouse = 2,
    /// Five cards of the same suit
    Flush = 3,
    /// Five cards in a sequence
    Straight = 4,
    /// Three of the same value.
    ThreeOfAKind = 5,
    /// Two diffent pair of matching cards.
    TwoPair = 6,
    /// One Card matches another.
    OnePair = 7,
    /// No matches
    HighCard = 8,
}

/// Upper (inclusive) equivalence rank of each category.
///
/// These come from counting poker hands, not from any table file:
/// 10 straight flushes, 156 quads, 156 full houses, 1277 flushes,
/// 10 straights, 858 trips, 858 two pair, 2860 pairs and 1277 high cards.
pub const CATEGORY_UPPER_BOUNDS: [u16; 9] = [10, 166, 322, 1599, 1609, 2467, 3325, 6185, 7462];

const CATEGORIES: [HandCategory; 9] = [
    HandCategory::StraightFlush,
    HandCategory::FourOfAKind,
    HandCategory::FullHouse,
    HandCategory::Flush,
    HandCategory::Straight,
    HandCategory::ThreeOfAKind,
    HandCategory::TwoPair,
    HandCategory::OnePair,
    HandCategory::HighCard,
];

impl HandCategory {
    /// All categories, strongest first.
    pub const fn all() -> [HandCategory; 9] {
        CATEGORIES
    }

    /// Category of an equivalence rank in `1..=7462`.
    ///
    /// ```
    /// use holdem_odds::core::HandCategory;
    ///
    /// assert_eq!(HandCategory::StraightFlush, HandCategory::of_rank(1));
    /// assert_eq!(HandCategory::Straight, HandCategory::of_rank(1600));
    /// assert_eq!(HandCategory::HighCard, HandCategory::of_rank(7462));
    /// ```
    pub fn of_rank(rank: u16) -> HandCategory {
        let idx = CATEGORY_UPPER_BOUNDS.partition_point(|upper| *upper < rank);
        CATEGORIES[idx.min(8)]
    }

    /// First and last equivalence rank of this category.
    pub const fn bounds(self) -> (u16, u16) {
        let idx = self as usize;
        let lower = if idx == 0 {
            1
        } else {
            CATEGORY_UPPER_BOUNDS[idx - 1] + 1
        };
        (lower, CATEGORY_UPPER_BOUNDS[idx])
    }

    /// Number of equivalence classes in this category.
    pub const fn width(self) -> u16 {
        let (lower, upper) = self.bounds();
        upper - lower + 1
    }

    /// Index into the nine category columns of an odds matrix.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The short code used in the equivalence class table.
    pub const fn code(self) -> &'static str {
        match self {
            HandCategory::StraightFlush => "SF",
            HandCategory::FourOfAKind => "4K",
            HandCategory::FullHouse => "FH",
            HandCategory::Flush => "F",
            HandCategory::Straight => "S",
            HandCategory::ThreeOfAKind => "3K",
            HandCategory::TwoPair => "2P",
            HandCategory::OnePair => "1P",
            HandCategory::HighCard => "HC",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::Flush => "Flush",
            HandCategory::Straight => "Straight",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::OnePair => "One Pair",
            HandCategory::HighCard => "High Card",
        };
        f.write_str(name)
    }
}

/// The equivalence rank of a five card hand.
///
/// The raw number runs from 1 (a royal flush) to 7462 (seven high).
/// Comparison follows hand strength, so a stronger hand is the greater
/// `HandRank` even though its raw number is smaller.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HandRank(u16);

impl HandRank {
    /// The weakest possible hand.
    pub const WORST: HandRank = HandRank(NUM_EQUIVALENCE_CLASSES as u16);
    /// A royal flush.
    pub const BEST: HandRank = HandRank(1);

    /// Wrap a raw equivalence rank. Returns `None` outside `1..=7462`.
    pub fn new(raw: u16) -> Option<Self> {
        (1..=NUM_EQUIVALENCE_CLASSES as u16)
            .contains(&raw)
            .then_some(HandRank(raw))
    }

    pub(crate) const fn new_unchecked(raw: u16) -> Self {
        HandRank(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub fn category(self) -> HandCategory {
        HandCategory::of_rank(self.0)
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category(), self.0)
    }
}
