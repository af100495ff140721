//! Move selection for the opposing agent.
//!
//! `choose_move` applies its rules in priority order:
//!
//! 1. **Blunder**: with the profile's blunder probability, play a uniformly
//!    random valid column and skip everything else.
//! 2. **Immediate win**: the first column (ascending) where the deciding
//!    side's piece completes four.
//! 3. **Immediate block**: the first column where the *opponent's* piece
//!    would complete four. This pass runs before, and separately from, the
//!    search; a pure minimax at the same depth plays differently.
//! 4. **Search**: depth-limited minimax with alpha-beta pruning from every
//!    valid column; strict `>` keeps the lowest column on ties.

use std::time::Instant;

use crate::core::{Board, GameRng, GameRngState, Side};
use crate::error::SearchError;
use crate::rules::{has_win, Evaluator, WindowHeuristic};

use super::config::DifficultyProfile;
use super::stats::{Decision, SearchStats};

/// Terminal score. Dominates every heuristic score.
pub const WIN_SCORE: i32 = 1_000_000;

/// Alpha-beta minimax search context.
///
/// Owns the evaluator, the RNG used for blunders, and the statistics of
/// the last decision. Search is synchronous and never touches shared state.
pub struct MinimaxSearch<V: Evaluator = WindowHeuristic> {
    /// Static evaluation at the depth limit.
    evaluator: V,

    /// Blunder rolls and random column picks.
    rng: GameRng,

    /// Statistics of the last `choose_move`.
    stats: SearchStats,
}

impl MinimaxSearch<WindowHeuristic> {
    /// Create a search with the default heuristic.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_evaluator(WindowHeuristic::default(), GameRng::new(seed))
    }
}

impl<V: Evaluator> MinimaxSearch<V> {
    /// Create a search with a custom evaluator.
    pub fn with_evaluator(evaluator: V, rng: GameRng) -> Self {
        Self {
            evaluator,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Replace the RNG stream.
    pub fn reseed(&mut self, rng: GameRng) {
        self.rng = rng;
    }

    /// Pick a column for `side`.
    ///
    /// Fails only if the board has no valid column; callers are expected to
    /// check for a full board first.
    ///
    /// ```
    /// use runeboard::core::{Board, Side};
    /// use runeboard::search::{Difficulty, MinimaxSearch};
    ///
    /// // Side A threatens to complete the bottom row at column 3.
    /// let board = Board::from_moves(&[(0, Side::A), (1, Side::A), (2, Side::A)]).unwrap();
    ///
    /// let mut search = MinimaxSearch::new(42);
    /// let column = search
    ///     .choose_move(&board, Side::B, &Difficulty::Master.profile())
    ///     .unwrap();
    /// assert_eq!(column, 3);
    /// ```
    pub fn choose_move(
        &mut self,
        board: &Board,
        side: Side,
        profile: &DifficultyProfile,
    ) -> Result<usize, SearchError> {
        let start = Instant::now();
        self.stats.reset();

        let columns = board.valid_columns();
        if columns.is_empty() {
            return Err(SearchError::NoValidColumns);
        }

        let (column, decision) = self.decide(board, side, profile, &columns);

        self.stats.decision = Some(decision);
        self.stats.time_us = start.elapsed().as_micros() as u64;

        log::debug!(
            "{side} chose column {column} by {decision:?} (depth {}, {} nodes, {} cutoffs)",
            profile.search_depth,
            self.stats.nodes,
            self.stats.cutoffs
        );
        log::trace!("search stats: {:?}", self.stats);

        Ok(column)
    }

    fn decide(
        &mut self,
        board: &Board,
        side: Side,
        profile: &DifficultyProfile,
        columns: &[usize],
    ) -> (usize, Decision) {
        // Zero probability never consumes randomness.
        if profile.blunder_probability > 0.0
            && self.rng.gen_bool(profile.blunder_probability.min(1.0))
        {
            if let Some(column) = self.rng.choose(columns) {
                return (column, Decision::Blunder);
            }
        }

        if let Some((column, _)) = board
            .successors(side)
            .find(|(_, child)| has_win(child, side))
        {
            return (column, Decision::ImmediateWin);
        }

        let opponent = side.opponent();
        if let Some((column, _)) = board
            .successors(opponent)
            .find(|(_, child)| has_win(child, opponent))
        {
            return (column, Decision::Block);
        }

        let column = self
            .best_column(board, side, profile.search_depth)
            .map_or(columns[0], |(column, _)| column);
        (column, Decision::Search)
    }

    /// Alpha-beta search from every valid column.
    ///
    /// Each candidate is searched with a fresh `(-inf, +inf)` window to
    /// `depth - 1` further plies. Returns the first column with the highest
    /// score, or `None` on a full board.
    pub fn best_column(&mut self, board: &Board, side: Side, depth: u32) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;

        for (column, child) in board.successors(side) {
            let score = self.minimax(
                &child,
                depth.saturating_sub(1),
                i32::MIN,
                i32::MAX,
                false,
                side,
            );
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
        }

        best
    }

    /// Fail-soft alpha-beta minimax from `deciding`'s point of view.
    ///
    /// `maximizing` is true when `deciding` is to move.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        deciding: Side,
    ) -> i32 {
        self.stats.nodes += 1;

        if let Some(score) = self.leaf_score(board, depth, deciding) {
            self.stats.leaves += 1;
            return score;
        }

        let mover = if maximizing { deciding } else { deciding.opponent() };
        let mut value = if maximizing { i32::MIN } else { i32::MAX };

        for (_, child) in board.successors(mover) {
            let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing, deciding);

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        value
    }

    /// Score of a terminal position or of the depth limit, else `None`.
    fn leaf_score(&self, board: &Board, depth: u32, deciding: Side) -> Option<i32> {
        if has_win(board, deciding) {
            return Some(WIN_SCORE);
        }
        if has_win(board, deciding.opponent()) {
            return Some(-WIN_SCORE);
        }
        if board.is_full() {
            return Some(0);
        }
        if depth == 0 {
            return Some(self.evaluator.score(board, deciding));
        }
        None
    }

    /// Statistics of the last `choose_move`.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The evaluator in use.
    #[must_use]
    pub fn evaluator(&self) -> &V {
        &self.evaluator
    }

    /// Current RNG position, for replaying a seeded game.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }
}
