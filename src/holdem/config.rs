use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Games in each independently seeded batch unless told otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Games simulated when only the defaults are used.
pub const DEFAULT_GAMES: usize = 100_000;

/// Shared flag for stopping a simulation that is already running.
///
/// Clones share the flag. The simulator checks it between batches so a
/// cancelled run stops within one batch of games.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// # SimulationConfig
///
/// How many games to play and how to play them.
///
/// The games are split into batches of `batch_size`. Batch `i` gets its own
/// rng seeded from `seed` and `i`, so a run with a fixed seed gives the same
/// numbers whether the batches run on one thread or many.
///
/// ## Examples
///
/// ```
/// use holdem_odds::holdem::SimulationConfig;
///
/// let config = SimulationConfig::new(50_000).with_seed(42).sequential();
/// assert_eq!(5, config.batches().len());
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Number of games to simulate.
    pub games: usize,
    /// Base seed. `None` picks a fresh random one for each run.
    pub seed: Option<u64>,
    /// Games per batch.
    pub batch_size: usize,
    /// Run batches on the rayon thread pool.
    pub parallel: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cancel: Option<CancellationToken>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: DEFAULT_GAMES,
            seed: None,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: true,
            cancel: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(games: usize) -> Self {
        Self {
            games,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Run every batch on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// `(batch index, games in batch)` for every batch. Only the last batch
    /// can be short.
    pub fn batches(&self) -> Vec<(u64, usize)> {
        let size = self.batch_size.max(1);
        (0..self.games)
            .step_by(size)
            .enumerate()
            .map(|(idx, start)| (idx as u64, size.min(self.games - start)))
            .collect()
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// ```
    /// use holdem_odds::holdem::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_json(r#"{"games": 2000, "seed": 7}"#).unwrap();
    /// assert_eq!(2000, config.games);
    /// assert_eq!(Some(7), config.seed);
    /// assert!(config.parallel);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(DEFAULT_GAMES, config.games);
        assert_eq!(DEFAULT_BATCH_SIZE, config.batch_size);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(!config.is_cancelled());
    }

    #[test]
    fn test_batches_cover_games() {
        let config = SimulationConfig::new(25_001).with_batch_size(10_000);
        let batches = config.batches();
        assert_eq!(vec![(0, 10_000), (1, 10_000), (2, 5_001)], batches);
        assert_eq!(25_001, batches.iter().map(|(_, g)| g).sum::<usize>());
    }

    #[test]
    fn test_zero_batch_size() {
        let config = SimulationConfig::new(3).with_batch_size(0);
        assert_eq!(vec![(0, 1), (1, 1), (2, 1)], config.batches());
    }

    #[test]
    fn test_no_games_no_batches() {
        assert!(SimulationConfig::new(0).batches().is_empty());
    }

    #[test]
    fn test_cancellation_shared() {
        let token = CancellationToken::new();
        let config = SimulationConfig::new(10).with_cancellation(token.clone());
        assert!(!config.is_cancelled());
        token.cancel();
        assert!(config.is_cancelled());
        assert!(config.clone().is_cancelled());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig::new(1234).with_seed(9).sequential();
        let json = serde_json::to_string(&config).unwrap();
        let back = SimulationConfig::from_json(&json).unwrap();
        assert_eq!(1234, back.games);
        assert_eq!(Some(9), back.seed);
        assert!(!back.parallel);
        assert!(back.cancel.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rejects_garbage() {
        assert!(SimulationConfig::from_json(r#"{"games": "many"}"#).is_err());
    }
}
