//! Texas Hold'em odds on top of the core evaluator: who is at the table,
//! how many games to play, and what came out of them.

/// Card token parsing.
mod parse;
/// Export the parsers
pub use self::parse::{parse_card_string, parse_cards};

/// What is known about the table going in.
mod scenario;
pub use self::scenario::{BOARD_SIZE, PlayerView, SpectatorView};

/// Simulation settings.
mod config;
pub use self::config::{
    CancellationToken, DEFAULT_BATCH_SIZE, DEFAULT_GAMES, SimulationConfig,
};

/// Tallies and percentage matrices.
mod odds;
pub use self::odds::{OddsRow, OutcomeCounts, PlayerOdds, SpectatorOdds};

/// Module for the monte carlo simulator.
mod monte_carlo_game;
/// Export `Simulator` and `MonteCarloGame`
pub use self::monte_carlo_game::{MonteCarloGame, Simulator, resolve_winners};
