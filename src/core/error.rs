use thiserror::Error;

use super::Card;

/// Errors from turning a two character token into a `Card`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardParseError {
    #[error("Card tokens are exactly two characters, got {0:?}")]
    WrongLength(String),
    #[error("Unable to parse value {0:?}")]
    UnexpectedValueChar(char),
    #[error("Unable to parse suit {0:?}")]
    UnexpectedSuitChar(char),
}

/// Errors reading or validating the equivalence class table.
///
/// Any of these aborts table construction, nothing partially built
/// is ever handed out.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Unable to read the equivalence class table")]
    Io(#[from] std::io::Error),
    #[error("Line {line} has {found} fields, expected 8")]
    FieldCount { line: usize, found: usize },
    #[error("Line {line} has an unexpected rank symbol {found:?}")]
    UnexpectedRankChar { line: usize, found: String },
    #[error("Expected 7462 equivalence classes, found {found}")]
    RowCount { found: usize },
    #[error("Class {row} maps to a lookup key already taken by another class")]
    DuplicateKey { row: usize },
    #[error("Class {row} has a pattern that doesn't fit its category code")]
    InvalidPattern { row: usize },
    #[error("Expected {expected} {table} entries, found {found}")]
    TableSize {
        table: &'static str,
        expected: usize,
        found: usize,
    },
}

/// A five card hand that the lookup tables can't score.
///
/// This can only happen when the tables were built from a bad source or
/// the hand wasn't five distinct cards.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationError {
    #[error("Prime product {0} has no entry in the lookup table")]
    UnknownPrimeProduct(u32),
    #[error("Rank mask {0:#06x} has no entry in the lookup table")]
    UnknownRankMask(u16),
}

/// Everything that can go wrong setting up or running a simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    CardParse(#[from] CardParseError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error("Card {0} is used more than once")]
    DuplicateCard(Card),
    #[error("Each player holds exactly two hole cards, got {found} cards")]
    HoleCardCount { found: usize },
    #[error("The board holds at most 5 cards, got {0}")]
    TooManyBoardCards(usize),
    #[error("At least {min} players are needed, got {found}")]
    TooFewPlayers { found: usize, min: usize },
    #[error("Need {needed} unseen cards per game but only {available} are left")]
    NotEnoughCards { needed: usize, available: usize },
    #[error("At least one game has to be simulated")]
    NoGames,
    #[error("The simulation was cancelled")]
    Cancelled,
}
