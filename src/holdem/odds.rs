use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::core::{HandCategory, HandRank, PlayerBitSet};

const NUM_CATEGORIES: usize = 9;

/// Raw tallies from some number of simulated games.
///
/// Counters only, so two tallies over disjoint games merge by adding them
/// up, in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeCounts {
    games: u64,
    wins: Vec<u64>,
    draws: Vec<u64>,
    categories: Vec<[u64; NUM_CATEGORIES]>,
}

impl OutcomeCounts {
    pub fn new(players: usize) -> Self {
        Self {
            games: 0,
            wins: vec![0; players],
            draws: vec![0; players],
            categories: vec![[0; NUM_CATEGORIES]; players],
        }
    }

    pub fn num_players(&self) -> usize {
        self.wins.len()
    }

    pub fn games(&self) -> u64 {
        self.games
    }

    pub fn wins(&self, player: usize) -> u64 {
        self.wins[player]
    }

    pub fn draws(&self, player: usize) -> u64 {
        self.draws[player]
    }

    /// Everything that was neither a win nor a draw.
    pub fn losses(&self, player: usize) -> u64 {
        self.games - self.wins[player] - self.draws[player]
    }

    pub fn category(&self, player: usize, category: HandCategory) -> u64 {
        self.categories[player][category.index()]
    }

    /// Tally one finished game.
    ///
    /// `best` is each player's best hand, `winners` the players holding
    /// the strongest of them. A lone winner gets a win, several split it
    /// and each get a draw.
    pub fn record(&mut self, best: &[HandRank], winners: PlayerBitSet) {
        self.games += 1;
        for (player, rank) in best.iter().enumerate() {
            self.categories[player][rank.category().index()] += 1;
        }
        if winners.count() == 1 {
            for idx in winners.ones() {
                self.wins[idx] += 1;
            }
        } else {
            for idx in winners.ones() {
                self.draws[idx] += 1;
            }
        }
    }

    /// Combine with the tallies of other games.
    pub fn merge(mut self, other: Self) -> Self {
        self.games += other.games;
        for (a, b) in self.wins.iter_mut().zip(other.wins) {
            *a += b;
        }
        for (a, b) in self.draws.iter_mut().zip(other.draws) {
            *a += b;
        }
        for (a, b) in self.categories.iter_mut().zip(other.categories) {
            for (x, y) in a.iter_mut().zip(b) {
                *x += y;
            }
        }
        self
    }
}

fn percent(count: u64, games: u64) -> f64 {
    if games == 0 {
        0.0
    } else {
        count as f64 * 100.0 / games as f64
    }
}

/// One player's results as percentages of games played.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OddsRow {
    pub win: f64,
    pub lose: f64,
    pub tie: f64,
    /// How often the player's best hand fell in each category, indexed by
    /// `HandCategory::index`.
    pub categories: [f64; NUM_CATEGORIES],
}

impl OddsRow {
    pub fn from_counts(counts: &OutcomeCounts, player: usize) -> Self {
        let games = counts.games;
        Self {
            win: percent(counts.wins[player], games),
            lose: percent(counts.losses(player), games),
            tie: percent(counts.draws[player], games),
            categories: counts.categories[player].map(|c| percent(c, games)),
        }
    }

    pub fn category(&self, category: HandCategory) -> f64 {
        self.categories[category.index()]
    }

    /// `[win, lose, tie, SF, 4K, FH, F, S, 3K, 2P, 1P, HC]`
    pub fn to_array(&self) -> [f64; 12] {
        let mut out = [0.0; 12];
        out[0] = self.win;
        out[1] = self.lose;
        out[2] = self.tie;
        out[3..].copy_from_slice(&self.categories);
        out
    }
}

impl fmt::Display for OddsRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "win {:.2}% lose {:.2}% tie {:.2}%",
            self.win, self.lose, self.tie
        )?;
        for category in HandCategory::all() {
            write!(f, " {} {:.2}%", category.code(), self.category(category))?;
        }
        Ok(())
    }
}

/// Results of a single player's view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PlayerOdds {
    /// The player whose cards were known.
    pub subject: OddsRow,
    /// Category frequencies averaged over all opponents.
    pub opponents: [f64; NUM_CATEGORIES],
    pub games: u64,
    /// Seed the run used, pass it back in to reproduce these numbers.
    pub seed: u64,
}

impl PlayerOdds {
    /// Player 0 is the subject, everybody else an opponent.
    pub fn from_counts(counts: &OutcomeCounts, seed: u64) -> Self {
        let seats = counts.num_players().saturating_sub(1).max(1) as u64;
        let mut totals = [0u64; NUM_CATEGORIES];
        for row in counts.categories.iter().skip(1) {
            for (t, c) in totals.iter_mut().zip(row) {
                *t += c;
            }
        }
        let games = counts.games;
        let opponents = totals.map(|t| {
            if games == 0 {
                0.0
            } else {
                t as f64 * 100.0 / seats as f64 / games as f64
            }
        });
        Self {
            subject: OddsRow::from_counts(counts, 0),
            opponents,
            games,
            seed,
        }
    }

    /// Row 0 is the subject. Row 1 holds the opponents' category averages
    /// from column 3 on, its first three columns are zero.
    pub fn to_matrix(&self) -> [[f64; 12]; 2] {
        let mut opponents = [0.0; 12];
        opponents[3..].copy_from_slice(&self.opponents);
        [self.subject.to_array(), opponents]
    }
}

/// Results of a spectator's view, one row per player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpectatorOdds {
    pub players: Vec<OddsRow>,
    pub games: u64,
    pub seed: u64,
}

impl SpectatorOdds {
    pub fn from_counts(counts: &OutcomeCounts, seed: u64) -> Self {
        Self {
            players: (0..counts.num_players())
                .map(|p| OddsRow::from_counts(counts, p))
                .collect(),
            games: counts.games,
            seed,
        }
    }

    pub fn to_matrix(&self) -> Vec<[f64; 12]> {
        self.players.iter().map(OddsRow::to_array).collect()
    }
}
