//! Monte Carlo odds for Texas Hold'em.
//!
//! Five card hands are scored with a Cactus Kev style evaluator: every hand
//! falls in one of 7462 equivalence classes, looked up from tables built
//! once at start up. On top of that the simulator deals out the unknown
//! cards many times over and reports win, lose and tie percentages along
//! with how often each hand category came up.
//!
//! ```
//! use holdem_odds::core::GeneratedEquivalenceSource;
//! use holdem_odds::holdem::{SimulationConfig, Simulator, SpectatorView};
//!
//! let simulator = Simulator::init(&GeneratedEquivalenceSource).unwrap();
//! let empty: [&str; 0] = [];
//! let view = SpectatorView::from_tokens(&["AS", "AD", "JC", "JD"], &["QH", "2D", "KD"], &empty)
//!     .unwrap();
//! let odds = simulator
//!     .simulate_spectator(&view, &SimulationConfig::new(5_000).with_seed(3))
//!     .unwrap();
//! assert!(odds.players[0].win > odds.players[1].win);
//! ```

/// Cards, the deck and five card hand evaluation.
/// Nothing in core knows about Hold'em.
pub mod core;
/// Player and spectator views and the Monte Carlo simulator.
pub mod holdem;
