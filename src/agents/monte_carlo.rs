/// Monte Carlo move evaluator: estimate per-candidate win probabilities by
/// playing the game out at random many times.
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scoped_threadpool::Pool;
use tracing::debug;

use crate::agents::{Agent, RandomAgent};
use crate::board_game::{Move, Outcome, Square};
use crate::error::{AiError, IndexError};
use crate::game::Game;

/// Win/lose/total counters for one candidate move (or for a whole search).
/// Draws are implicit: `totals - wins - loses`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    pub wins: usize,
    pub loses: usize,
    pub totals: usize,
}

impl Stats {
    pub fn win_ratio(&self) -> f64 {
        if self.totals == 0 {
            return 0.0;
        }
        self.wins as f64 / self.totals as f64
    }

    pub fn lose_ratio(&self) -> f64 {
        if self.totals == 0 {
            return 0.0;
        }
        self.loses as f64 / self.totals as f64
    }

    pub fn draw_ratio(&self) -> f64 {
        if self.totals == 0 {
            return 0.0;
        }
        1.0 - (self.wins + self.loses) as f64 / self.totals as f64
    }

    pub fn draws(&self) -> usize {
        self.totals - self.wins - self.loses
    }

    fn merge(&mut self, other: &Stats) {
        self.wins += other.wins;
        self.loses += other.loses;
        self.totals += other.totals;
    }
}

/// Accumulated playout results for every (board, square) candidate, produced
/// atomically by one `choose` call.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    cells: [[Stats; 9]; 9],
    runs: usize,
}

impl SearchStats {
    /// The counters for one cell. Cells that were never sampled report all
    /// zeros.
    pub fn stats(&self, board_pos: usize, square_pos: usize) -> Result<Stats, IndexError> {
        if board_pos >= 9 {
            return Err(IndexError(board_pos));
        }
        if square_pos >= 9 {
            return Err(IndexError(square_pos));
        }
        Ok(self.cells[board_pos][square_pos])
    }

    /// Counters summed over all candidates.
    pub fn totals(&self) -> Stats {
        let mut all = Stats::default();
        for row in self.cells.iter() {
            for stat in row.iter() {
                all.merge(stat);
            }
        }
        all
    }

    /// Completed playouts.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// The candidate with the best win ratio among those with at least one
    /// playout. Ties go to the lowest (board, square) in ascending scan
    /// order, which keeps selection deterministic for fixed counters.
    pub fn best(&self) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;
        for board_pos in 0..9 {
            for square_pos in 0..9 {
                let stat = self.cells[board_pos][square_pos];
                if stat.totals == 0 {
                    continue;
                }
                let ratio = stat.win_ratio();
                match best {
                    Some((_, best_ratio)) if ratio <= best_ratio => (),
                    _ => best = Some(((board_pos, square_pos), ratio)),
                }
            }
        }
        best.map(|(move_, _)| move_)
    }

    fn merge(&mut self, other: &SearchStats) {
        for (row, other_row) in self.cells.iter_mut().zip(other.cells.iter()) {
            for (stat, other_stat) in row.iter_mut().zip(other_row.iter()) {
                stat.merge(other_stat);
            }
        }
        self.runs += other.runs;
    }
}

/// Evaluates moves by running a fixed budget of uniformly random playouts
/// from the current position and ranking candidates by win ratio.
#[derive(Clone, Debug)]
pub struct MonteCarloAgent {
    /// Number of playouts per `choose` call.
    playout_budget: usize,

    /// Results of the most recent `choose` call.
    stats: SearchStats,
}

impl Agent for MonteCarloAgent {
    fn choose<R: Rng>(&mut self, rng: &mut R, game: &Game) -> Result<Move, AiError> {
        let candidates = game.legal_moves();
        if candidates.is_empty() {
            return Err(AiError::NoLegalMoves);
        }

        let me = game.current_player();
        let budget = self.playout_budget.max(1);
        let workers = num_cpus::get().max(1).min(budget);
        // Split the budget so exactly `budget` playouts run: the first
        // `budget % workers` workers take one extra.
        let base = budget / workers;
        let rem = budget % workers;

        // Each worker owns a private RNG seeded from the caller's RNG and a
        // private stats block; nothing is shared until the single merge
        // below, after the pool scope ends.
        let seeds: Vec<u64> = (0..workers).map(|_| rng.next_u64()).collect();
        let mut locals: Vec<SearchStats> = vec![SearchStats::default(); workers];

        let now = Instant::now();
        let mut pool = Pool::new(workers as u32);
        pool.scoped(|scoped| {
            for (i, local) in locals.iter_mut().enumerate() {
                let seed = seeds[i];
                let share = base + usize::from(i < rem);
                let candidates = &candidates;
                scoped.execute(move || {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    for _ in 0..share {
                        playout(&mut rng, game, candidates, me, local);
                    }
                });
            }
        });

        let mut stats = SearchStats::default();
        for local in locals.iter() {
            stats.merge(local);
        }
        self.stats = stats;

        let elapsed = now.elapsed();
        debug!(
            playouts = self.stats.runs,
            workers,
            ?elapsed,
            rate = self.stats.runs as f64 / elapsed.as_secs_f64().max(f64::MIN_POSITIVE),
            "monte carlo search finished"
        );

        // At least one playout ran, so at least one candidate has samples.
        Ok(self.stats.best().expect("search produced no samples"))
    }
}

impl MonteCarloAgent {
    pub fn new(playout_budget: usize) -> MonteCarloAgent {
        MonteCarloAgent {
            playout_budget,
            stats: SearchStats::default(),
        }
    }

    /// Counters for one cell from the last `choose` call.
    pub fn stats(&self, board_pos: usize, square_pos: usize) -> Result<Stats, IndexError> {
        self.stats.stats(board_pos, square_pos)
    }

    /// Counters summed over all candidates from the last `choose` call.
    pub fn totals(&self) -> Stats {
        self.stats.totals()
    }

    /// Playouts completed by the last `choose` call.
    pub fn runs(&self) -> usize {
        self.stats.runs()
    }
}

/// One complete playout: pick a candidate uniformly, clone the game, apply
/// it, roll out randomly to termination, and record the result relative to
/// the player who made the candidate move.
fn playout<R: Rng>(
    rng: &mut R,
    game: &Game,
    candidates: &[Move],
    me: Square,
    stats: &mut SearchStats,
) {
    let &(board_pos, square_pos) = candidates
        .choose(rng)
        .expect("candidate list is non-empty");

    let mut g = game.clone();
    g.play(board_pos, square_pos)
        .expect("candidate move is legal");

    while g.playable() {
        let (b, s) = RandomAgent::random_move(rng, &g).expect("ongoing game has legal moves");
        g.play(b, s).expect("random rollout move is legal");
    }

    let cell = &mut stats.cells[board_pos][square_pos];
    match g.winner() {
        Outcome::Decided(winner) if winner == me => cell.wins += 1,
        Outcome::Decided(_) => cell.loses += 1,
        _ => (),
    }
    cell.totals += 1;
    stats.runs += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::board_game::Square::{None, O, X};

    /// Active board 4 has a single empty cell and no winner, so exactly one
    /// move is legal.
    fn one_legal_move_game() -> Game {
        let crowded = Board::from([O, O, None, O, X, X, X, O, O]);
        Game::with_boards(
            [
                Board::default(),
                Board::default(),
                Board::default(),
                Board::default(),
                crowded,
                Board::default(),
                Board::default(),
                Board::default(),
                Board::default(),
            ],
            X,
            Some(4),
        )
    }

    #[test]
    fn forced_move_gets_the_whole_budget() {
        let g = one_legal_move_game();
        assert_eq!(g.legal_moves(), vec![(4, 2)]);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut agent = MonteCarloAgent::new(1000);
        let move_ = agent.choose(&mut rng, &g).unwrap();

        assert_eq!(move_, (4, 2));
        assert_eq!(agent.runs(), 1000);
        let stat = agent.stats(4, 2).unwrap();
        assert_eq!(stat.totals, 1000);
        assert_eq!(agent.totals().totals, 1000);
        assert!(stat.wins + stat.loses <= stat.totals);
        // A cell that was never a candidate reports zeros.
        assert_eq!(agent.stats(0, 0), Ok(Stats::default()));
    }

    #[test]
    fn fresh_game_search_returns_a_legal_move() {
        let g = Game::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut agent = MonteCarloAgent::new(2000);

        let move_ = agent.choose(&mut rng, &g).unwrap();
        assert!(g.legal_moves().contains(&move_));
        assert_eq!(agent.runs(), 2000);
        assert_eq!(agent.totals().totals, 2000);
    }

    #[test]
    fn terminal_game_has_no_move() {
        let won = Board::from([X, X, X, None, None, None, None, None, None]);
        let g = Game::with_boards(
            [
                won.clone(),
                won.clone(),
                won,
                Board::default(),
                Board::default(),
                Board::default(),
                Board::default(),
                Board::default(),
                Board::default(),
            ],
            O,
            Option::None,
        );

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut agent = MonteCarloAgent::new(100);
        assert_eq!(agent.choose(&mut rng, &g), Err(AiError::NoLegalMoves));
    }

    #[test]
    fn seeded_searches_are_reproducible() {
        let g = Game::default();

        let mut a = MonteCarloAgent::new(500);
        let mut b = MonteCarloAgent::new(500);
        let move_a = a
            .choose(&mut ChaCha8Rng::seed_from_u64(7), &g)
            .unwrap();
        let move_b = b
            .choose(&mut ChaCha8Rng::seed_from_u64(7), &g)
            .unwrap();

        assert_eq!(move_a, move_b);
        assert_eq!(a.totals(), b.totals());
        assert_eq!(a.stats(move_a.0, move_a.1), b.stats(move_b.0, move_b.1));
    }

    #[test]
    fn best_breaks_ties_by_scan_order() {
        let mut stats = SearchStats::default();
        stats.cells[5][1] = Stats {
            wins: 3,
            loses: 1,
            totals: 6,
        };
        stats.cells[2][7] = Stats {
            wins: 2,
            loses: 2,
            totals: 4,
        };
        stats.cells[2][4] = Stats {
            wins: 1,
            loses: 0,
            totals: 2,
        };
        // All three candidates have a 0.5 win ratio; the lowest (board,
        // square) wins.
        assert_eq!(stats.best(), Some((2, 4)));
    }

    #[test]
    fn best_ignores_unsampled_cells_and_empty_stats() {
        let empty = SearchStats::default();
        assert_eq!(empty.best(), Option::None);

        let mut stats = SearchStats::default();
        stats.cells[8][8] = Stats {
            wins: 0,
            loses: 4,
            totals: 4,
        };
        assert_eq!(stats.best(), Some((8, 8)));
    }

    #[test]
    fn zero_totals_ratios_are_no_data() {
        let s = Stats::default();
        assert_eq!(s.win_ratio(), 0.0);
        assert_eq!(s.lose_ratio(), 0.0);
        assert_eq!(s.draw_ratio(), 0.0);
        assert_eq!(s.draws(), 0);
    }
}
