use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use tracing::{Level, event, instrument};

use crate::core::{
    DataSourceError, EncodedCard, EquivalenceSource, EvaluationError, FlatDeck, HandEvaluator,
    HandRank, PlayerBitSet, SimulationError,
};

use super::scenario::{BOARD_SIZE, Layout};
use super::{OutcomeCounts, PlayerOdds, PlayerView, SimulationConfig, SpectatorOdds, SpectatorView};

/// Spreads consecutive batch indexes far apart in seed space.
const BATCH_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

fn batch_seed(seed: u64, batch: u64) -> u64 {
    seed.wrapping_add(batch.wrapping_mul(BATCH_SEED_STRIDE))
}

/// Players holding the strongest hand.
pub fn resolve_winners(ranks: &[HandRank]) -> PlayerBitSet {
    let mut found = PlayerBitSet::default();
    let mut max_rank = HandRank::WORST;
    for (idx, rank) in ranks.iter().enumerate() {
        match rank.cmp(&max_rank) {
            std::cmp::Ordering::Equal => found.enable(idx),
            std::cmp::Ordering::Greater => {
                // New best hand, forget everyone found so far.
                found = PlayerBitSet::default();
                found.enable(idx);
                max_rank = *rank;
            }
            std::cmp::Ordering::Less => {}
        }
    }
    found
}

/// One table being dealt out over and over.
///
/// Known cards are filled into every seven card hand once. Each call to
/// `simulate` reshuffles the unseen cards, deals the random hole cards
/// from the top, then the missing board cards, and scores every hand.
#[derive(Debug)]
pub struct MonteCarloGame<'a> {
    evaluator: &'a HandEvaluator,
    /// Cards nobody has seen.
    deck: FlatDeck,
    /// Seats whose hole cards are dealt every game.
    random_seats: Vec<usize>,
    /// First of the hand slots the missing board cards go in.
    board_start: usize,
    hands: Vec<[EncodedCard; 7]>,
    best: Vec<HandRank>,
}

impl<'a> MonteCarloGame<'a> {
    pub(crate) fn new(evaluator: &'a HandEvaluator, layout: &Layout) -> Self {
        let encoder = evaluator.deck();
        let mut hands = vec![[EncodedCard::default(); 7]; layout.num_players()];
        let mut random_seats = Vec::new();

        for (seat, (hand, hole)) in hands.iter_mut().zip(&layout.holes).enumerate() {
            match hole {
                Some([a, b]) => {
                    hand[0] = encoder.encode(*a);
                    hand[1] = encoder.encode(*b);
                }
                None => random_seats.push(seat),
            }
            for (slot, card) in hand[2..].iter_mut().zip(&layout.board) {
                *slot = encoder.encode(*card);
            }
        }

        Self {
            evaluator,
            deck: encoder.unknown_cards(&layout.known),
            random_seats,
            board_start: 2 + layout.board.len(),
            best: vec![HandRank::WORST; hands.len()],
            hands,
        }
    }

    /// Best hand of each player in the last game.
    pub fn best_ranks(&self) -> &[HandRank] {
        &self.best
    }

    /// Deal and score one game, returning who won it.
    pub fn simulate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<PlayerBitSet, EvaluationError> {
        let evaluator = self.evaluator;
        let encoder = evaluator.deck();
        self.deck.shuffle(rng);

        let mut next = 0;
        for seat in &self.random_seats {
            let hand = &mut self.hands[*seat];
            hand[0] = encoder.encode(self.deck[next]);
            hand[1] = encoder.encode(self.deck[next + 1]);
            next += 2;
        }
        for slot in self.board_start..2 + BOARD_SIZE {
            let card = encoder.encode(self.deck[next]);
            next += 1;
            for hand in self.hands.iter_mut() {
                hand[slot] = card;
            }
        }

        for (best, hand) in self.best.iter_mut().zip(&self.hands) {
            *best = evaluator.best_of_seven(hand)?;
        }
        Ok(resolve_winners(&self.best))
    }
}

/// Monte Carlo odds for a table of Texas Hold'em.
///
/// The evaluator is built once and shared, cloning a `Simulator` is cheap.
///
/// ```
/// use holdem_odds::core::GeneratedEquivalenceSource;
/// use holdem_odds::holdem::{PlayerView, SimulationConfig, Simulator};
///
/// let simulator = Simulator::init(&GeneratedEquivalenceSource).unwrap();
/// let view = PlayerView::from_tokens(&["AH", "AD"], 3).unwrap();
/// let odds = simulator
///     .simulate_player(&view, &SimulationConfig::new(2_000).with_seed(1))
///     .unwrap();
/// assert!(odds.subject.win > odds.subject.lose);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    evaluator: Arc<HandEvaluator>,
}

impl Simulator {
    pub fn new(evaluator: Arc<HandEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Build the evaluator from an equivalence class source.
    pub fn init<S: EquivalenceSource + ?Sized>(source: &S) -> Result<Self, DataSourceError> {
        Ok(Self::new(Arc::new(HandEvaluator::build(source)?)))
    }

    pub fn evaluator(&self) -> &HandEvaluator {
        &self.evaluator
    }

    /// A single table for dealing out a player view one game at a time.
    pub fn player_game(&self, view: &PlayerView) -> MonteCarloGame<'_> {
        MonteCarloGame::new(&self.evaluator, view.layout())
    }

    pub fn spectator_game(&self, view: &SpectatorView) -> MonteCarloGame<'_> {
        MonteCarloGame::new(&self.evaluator, view.layout())
    }

    /// Odds for the player whose hole cards are in `view`.
    #[instrument(level = "debug", skip_all, fields(players = view.num_players(), board = view.board().len()))]
    pub fn simulate_player(
        &self,
        view: &PlayerView,
        config: &SimulationConfig,
    ) -> Result<PlayerOdds, SimulationError> {
        let (counts, seed) = self.run(view.layout(), config)?;
        Ok(PlayerOdds::from_counts(&counts, seed))
    }

    /// Odds for every player at a table where all hole cards are known.
    #[instrument(level = "debug", skip_all, fields(players = view.num_players(), board = view.board().len()))]
    pub fn simulate_spectator(
        &self,
        view: &SpectatorView,
        config: &SimulationConfig,
    ) -> Result<SpectatorOdds, SimulationError> {
        let (counts, seed) = self.run(view.layout(), config)?;
        Ok(SpectatorOdds::from_counts(&counts, seed))
    }

    fn run(
        &self,
        layout: &Layout,
        config: &SimulationConfig,
    ) -> Result<(OutcomeCounts, u64), SimulationError> {
        if config.games == 0 {
            return Err(SimulationError::NoGames);
        }
        let seed = config.seed.unwrap_or_else(rand::random);
        let players = layout.num_players();
        let batches = config.batches();
        event!(
            Level::DEBUG,
            seed,
            games = config.games,
            batches = batches.len(),
            parallel = config.parallel,
            "Starting simulation"
        );

        let run_batch = |(batch, games): (u64, usize)| -> Result<OutcomeCounts, SimulationError> {
            if config.is_cancelled() {
                return Err(SimulationError::Cancelled);
            }
            let mut rng = StdRng::seed_from_u64(batch_seed(seed, batch));
            let mut game = MonteCarloGame::new(&self.evaluator, layout);
            let mut counts = OutcomeCounts::new(players);
            for _ in 0..games {
                let winners = game.simulate(&mut rng)?;
                counts.record(game.best_ranks(), winners);
            }
            event!(Level::TRACE, batch, games, "Finished batch");
            Ok(counts)
        };

        let result: Result<OutcomeCounts, SimulationError> = if config.parallel {
            batches
                .into_par_iter()
                .map(&run_batch)
                .try_reduce(|| OutcomeCounts::new(players), |a, b| Ok(a.merge(b)))
        } else {
            batches
                .into_iter()
                .map(&run_batch)
                .try_fold(
                    OutcomeCounts::new(players),
                    |acc, counts| -> Result<OutcomeCounts, SimulationError> {
                        Ok(acc.merge(counts?))
                    },
                )
        };

        match result {
            Ok(counts) => {
                event!(Level::DEBUG, games = counts.games(), "Simulation finished");
                Ok((counts, seed))
            }
            Err(SimulationError::Cancelled) => {
                event!(Level::WARN, seed, "Simulation cancelled");
                Err(SimulationError::Cancelled)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GeneratedEquivalenceSource, HandCategory};
    use crate::holdem::CancellationToken;
    use approx::assert_relative_eq;
    use std::sync::OnceLock;

    fn simulator() -> &'static Simulator {
        static SIMULATOR: OnceLock<Simulator> = OnceLock::new();
        SIMULATOR.get_or_init(|| Simulator::init(&GeneratedEquivalenceSource).unwrap())
    }

    fn rank(raw: u16) -> HandRank {
        HandRank::new(raw).unwrap()
    }

    fn assert_row_sums(row: &crate::holdem::OddsRow) {
        assert_relative_eq!(100.0, row.win + row.lose + row.tie, epsilon = 1e-9);
        assert_relative_eq!(100.0, row.categories.iter().sum::<f64>(), epsilon = 1e-9);
    }

    #[test]
    fn test_resolve_single_winner() {
        let winners = resolve_winners(&[rank(4000), rank(12), rank(7000)]);
        assert_eq!(1, winners.count());
        assert!(winners.get(1));
    }

    #[test]
    fn test_resolve_tie() {
        let winners = resolve_winners(&[rank(300), rank(7000), rank(300)]);
        assert_eq!(vec![0, 2], winners.ones().collect::<Vec<_>>());
    }

    #[test]
    fn test_resolve_all_worst() {
        let winners = resolve_winners(&[HandRank::WORST, HandRank::WORST]);
        assert_eq!(2, winners.count());
    }

    #[test]
    fn test_game_deck_excludes_known() {
        let view =
            SpectatorView::from_tokens(&["AS", "AD", "JC", "JD"], &["QH", "2D", "KD"], &["7C"])
                .unwrap();
        let game = simulator().spectator_game(&view);
        assert_eq!(44, game.deck.len());
        assert!(game.random_seats.is_empty());
        assert_eq!(5, game.board_start);
    }

    #[test]
    fn test_game_deals_distinct_cards() {
        let view = PlayerView::from_tokens(&["2H", "7S", "9D"], 4).unwrap();
        let mut game = simulator().player_game(&view);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            game.simulate(&mut rng).unwrap();
            let mut seen = std::collections::HashSet::new();
            for hand in &game.hands {
                seen.insert(hand[0]);
                seen.insert(hand[1]);
            }
            for card in &game.hands[0][2..] {
                seen.insert(*card);
            }
            // 4 hole pairs and a full board.
            assert_eq!(13, seen.len());
        }
    }

    #[test]
    fn test_board_plays_for_everyone() {
        let empty: [&str; 0] = [];
        let view = SpectatorView::from_tokens(
            &["2C", "3D", "4H", "5C"],
            &["AS", "KS", "QS", "JS", "TS"],
            &empty,
        )
        .unwrap();
        let odds = simulator()
            .simulate_spectator(&view, &SimulationConfig::new(500).with_seed(5))
            .unwrap();
        for row in &odds.players {
            assert_relative_eq!(100.0, row.tie);
            assert_relative_eq!(0.0, row.win);
            assert_relative_eq!(100.0, row.category(HandCategory::StraightFlush));
        }
    }

    #[test]
    fn test_river_is_decided() {
        let empty: [&str; 0] = [];
        let view = SpectatorView::from_tokens(
            &["AS", "AD", "JC", "JD"],
            &["QH", "2D", "KD", "3C", "4S"],
            &empty,
        )
        .unwrap();
        let odds = simulator()
            .simulate_spectator(&view, &SimulationConfig::new(100).with_seed(1))
            .unwrap();
        assert_relative_eq!(100.0, odds.players[0].win);
        assert_relative_eq!(100.0, odds.players[1].lose);
        assert_eq!(100, odds.games);
    }

    #[test_log::test]
    fn test_heads_up_preflop() {
        let view = PlayerView::from_tokens(&["2H", "7S"], 2).unwrap();
        let odds = simulator()
            .simulate_player(&view, &SimulationConfig::new(50_000).with_seed(2024))
            .unwrap();
        assert_eq!(50_000, odds.games);
        assert_eq!(2024, odds.seed);
        assert_row_sums(&odds.subject);
        assert_relative_eq!(100.0, odds.opponents.iter().sum::<f64>(), epsilon = 1e-9);
        // The worst starting hand still wins about a third of the time.
        assert!(odds.subject.win > 25.0 && odds.subject.win < 40.0);
        let m = odds.to_matrix();
        assert_eq!([0.0; 3], m[1][..3]);
    }

    #[test]
    fn test_five_way_flop() {
        let view = PlayerView::from_tokens(&["AH", "JS", "2C", "JD", "QH"], 5).unwrap();
        let odds = simulator()
            .simulate_player(&view, &SimulationConfig::new(20_000).with_seed(7))
            .unwrap();
        assert_row_sums(&odds.subject);
        assert!(odds.subject.win > 20.0);
        // Already holding a pair of jacks.
        assert_relative_eq!(0.0, odds.subject.category(HandCategory::HighCard));
        assert_relative_eq!(100.0, odds.opponents.iter().sum::<f64>(), epsilon = 1e-9);
    }

    #[test]
    fn test_spectator_overpair() {
        let empty: [&str; 0] = [];
        let view =
            SpectatorView::from_tokens(&["AS", "AD", "JC", "JD"], &["QH", "2D", "KD"], &empty)
                .unwrap();
        let odds = simulator()
            .simulate_spectator(&view, &SimulationConfig::new(20_000).with_seed(99))
            .unwrap();
        assert_eq!(2, odds.players.len());
        for row in &odds.players {
            assert_row_sums(row);
        }
        assert!(odds.players[0].win > 50.0);
        assert_relative_eq!(odds.players[0].tie, odds.players[1].tie);
        assert_relative_eq!(odds.players[0].win, odds.players[1].lose, epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let view = PlayerView::from_tokens(&["KC", "QC", "TC"], 4).unwrap();
        let config = SimulationConfig::new(12_345).with_seed(17).with_batch_size(1_000);
        let parallel = simulator().simulate_player(&view, &config).unwrap();
        let sequential = simulator()
            .simulate_player(&view, &config.clone().sequential())
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_reported_seed_reproduces() {
        let view = PlayerView::from_tokens(&["8D", "8S"], 3).unwrap();
        let first = simulator()
            .simulate_player(&view, &SimulationConfig::new(3_000))
            .unwrap();
        let again = simulator()
            .simulate_player(&view, &SimulationConfig::new(3_000).with_seed(first.seed))
            .unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_different_seeds_differ() {
        let view = PlayerView::from_tokens(&["8D", "8S"], 3).unwrap();
        let a = simulator()
            .simulate_player(&view, &SimulationConfig::new(3_000).with_seed(1))
            .unwrap();
        let b = simulator()
            .simulate_player(&view, &SimulationConfig::new(3_000).with_seed(2))
            .unwrap();
        assert_ne!(a.subject, b.subject);
    }

    #[test]
    fn test_no_games() {
        let view = PlayerView::from_tokens(&["2H", "7S"], 2).unwrap();
        assert!(matches!(
            simulator().simulate_player(&view, &SimulationConfig::new(0)),
            Err(SimulationError::NoGames)
        ));
    }

    #[test]
    fn test_cancelled_run() {
        let token = CancellationToken::new();
        token.cancel();
        let view = PlayerView::from_tokens(&["2H", "7S"], 2).unwrap();
        for config in [
            SimulationConfig::new(10_000).with_cancellation(token.clone()),
            SimulationConfig::new(10_000)
                .with_cancellation(token.clone())
                .sequential(),
        ] {
            assert!(matches!(
                simulator().simulate_player(&view, &config),
                Err(SimulationError::Cancelled)
            ));
        }
    }
}
