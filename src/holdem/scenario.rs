use crate::core::{Card, CardBitSet, SimulationError};

use super::parse_cards;

/// Cards on a full board.
pub const BOARD_SIZE: usize = 5;

/// What the simulator knows going into a run, whichever view it came from.
///
/// `holes[i]` is `None` when player `i`'s cards are dealt at random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) holes: Vec<Option<[Card; 2]>>,
    pub(crate) board: Vec<Card>,
    pub(crate) known: CardBitSet,
}

impl Layout {
    fn new(
        holes: Vec<Option<[Card; 2]>>,
        board: &[Card],
        discarded: &[Card],
    ) -> Result<Self, SimulationError> {
        if board.len() > BOARD_SIZE {
            return Err(SimulationError::TooManyBoardCards(board.len()));
        }

        let mut known = CardBitSet::new();
        let fixed = holes.iter().flatten().flatten();
        for card in fixed.chain(board).chain(discarded) {
            if !known.insert(*card) {
                return Err(SimulationError::DuplicateCard(*card));
            }
        }

        let random_holes = holes.iter().filter(|h| h.is_none()).count();
        let needed = random_holes * 2 + BOARD_SIZE - board.len();
        let available = 52 - known.count();
        if needed > available {
            return Err(SimulationError::NotEnoughCards { needed, available });
        }

        Ok(Self {
            holes,
            board: board.to_vec(),
            known,
        })
    }

    pub(crate) fn num_players(&self) -> usize {
        self.holes.len()
    }
}

fn hole_pair(cards: &[Card]) -> Result<[Card; 2], SimulationError> {
    cards
        .try_into()
        .map_err(|_| SimulationError::HoleCardCount { found: cards.len() })
}

/// A single player's view of the table.
///
/// The player's own two cards and the revealed board are fixed, every
/// opponent's hole cards and the rest of the board are random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    hole: [Card; 2],
    layout: Layout,
}

impl PlayerView {
    /// `num_players` counts the subject too, so it must be at least 2.
    pub fn new(hole: [Card; 2], board: &[Card], num_players: usize) -> Result<Self, SimulationError> {
        if num_players < 2 {
            return Err(SimulationError::TooFewPlayers {
                found: num_players,
                min: 2,
            });
        }
        let mut holes = vec![None; num_players];
        holes[0] = Some(hole);
        Ok(Self {
            hole,
            layout: Layout::new(holes, board, &[])?,
        })
    }

    /// The first two known cards are the player's, the rest is the board.
    pub fn from_known_cards(known: &[Card], num_players: usize) -> Result<Self, SimulationError> {
        if known.len() < 2 {
            return Err(SimulationError::HoleCardCount { found: known.len() });
        }
        Self::new(hole_pair(&known[..2])?, &known[2..], num_players)
    }

    /// Same as `from_known_cards` but straight from card tokens.
    ///
    /// ```
    /// use holdem_odds::holdem::PlayerView;
    ///
    /// let view = PlayerView::from_tokens(&["AH", "JS", "2C", "JD", "QH"], 5).unwrap();
    /// assert_eq!(5, view.num_players());
    /// assert_eq!(3, view.board().len());
    /// ```
    pub fn from_tokens<S: AsRef<str>>(known: &[S], num_players: usize) -> Result<Self, SimulationError> {
        Self::from_known_cards(&parse_cards(known)?, num_players)
    }

    pub fn hole(&self) -> [Card; 2] {
        self.hole
    }

    pub fn board(&self) -> &[Card] {
        &self.layout.board
    }

    pub fn num_players(&self) -> usize {
        self.layout.num_players()
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }
}

/// A spectator's view: every active player's hole cards are face up.
///
/// Only the missing board cards are random. Cards folded by players who
/// left the hand are known to be out of the deck but never dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectatorView {
    layout: Layout,
}

impl SpectatorView {
    pub fn new(
        players: &[[Card; 2]],
        board: &[Card],
        discarded: &[Card],
    ) -> Result<Self, SimulationError> {
        if players.is_empty() {
            return Err(SimulationError::TooFewPlayers { found: 0, min: 1 });
        }
        let holes = players.iter().map(|h| Some(*h)).collect();
        Ok(Self {
            layout: Layout::new(holes, board, discarded)?,
        })
    }

    /// Players' cards come two at a time: `[p0, p0, p1, p1, ...]`.
    pub fn from_flat_cards(
        players_cards: &[Card],
        board: &[Card],
        discarded: &[Card],
    ) -> Result<Self, SimulationError> {
        if players_cards.len() % 2 != 0 {
            return Err(SimulationError::HoleCardCount {
                found: players_cards.len(),
            });
        }
        let players: Vec<[Card; 2]> = players_cards
            .chunks_exact(2)
            .map(hole_pair)
            .collect::<Result<_, _>>()?;
        Self::new(&players, board, discarded)
    }

    /// ```
    /// use holdem_odds::holdem::SpectatorView;
    ///
    /// let empty: [&str; 0] = [];
    /// let view = SpectatorView::from_tokens(&["AS", "AD", "JC", "JD"], &["QH", "2D", "KD"], &empty)
    ///     .unwrap();
    /// assert_eq!(2, view.num_players());
    /// ```
    pub fn from_tokens<S: AsRef<str>, B: AsRef<str>, D: AsRef<str>>(
        players_cards: &[S],
        board: &[B],
        discarded: &[D],
    ) -> Result<Self, SimulationError> {
        Self::from_flat_cards(
            &parse_cards(players_cards)?,
            &parse_cards(board)?,
            &parse_cards(discarded)?,
        )
    }

    pub fn players(&self) -> impl Iterator<Item = [Card; 2]> + '_ {
        self.layout.holes.iter().flatten().copied()
    }

    pub fn board(&self) -> &[Card] {
        &self.layout.board
    }

    pub fn num_players(&self) -> usize {
        self.layout.num_players()
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }
}
