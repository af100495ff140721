//! Static position evaluation.
//!
//! Used only at the depth limit of the search, where the position is not
//! terminal. The default heuristic rewards central control and open runs,
//! and penalises the opponent's open threes less than it rewards its own,
//! which biases the agent toward attack over defence.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Side, CENTER_COLUMN, CONNECT};

use super::lines::{windows, WindowCounts};

/// Scores a non-terminal board for one side.
pub trait Evaluator: Send + Sync {
    /// Higher is better for `side`.
    fn score(&self, board: &Board, side: Side) -> i32;
}

/// Weights of the window heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Per own piece in the centre column.
    pub center: i32,
    /// Window fully owned (normally terminal, kept for consistency).
    pub four: i32,
    /// Three own pieces and one empty cell.
    pub open_three: i32,
    /// Two own pieces and two empty cells.
    pub open_two: i32,
    /// Three opponent pieces and one empty cell. Negative.
    pub opponent_three: i32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            center: 3,
            four: 100,
            open_three: 5,
            open_two: 2,
            opponent_three: -4,
        }
    }
}

impl HeuristicWeights {
    /// Score one window. Windows holding both sides' pieces score 0.
    #[must_use]
    pub fn window(&self, counts: WindowCounts) -> i32 {
        let mut score = 0;

        if counts.own == CONNECT {
            score += self.four;
        } else if counts.own == CONNECT - 1 && counts.empty == 1 {
            score += self.open_three;
        } else if counts.own == CONNECT - 2 && counts.empty == 2 {
            score += self.open_two;
        }

        if counts.opponent == CONNECT - 1 && counts.empty == 1 {
            score += self.opponent_three;
        }

        score
    }
}

/// Centre control plus a sliding-window scan over every orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowHeuristic {
    weights: HeuristicWeights,
}

impl WindowHeuristic {
    /// Create a heuristic with custom weights.
    #[must_use]
    pub const fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// The weights in use.
    #[must_use]
    pub const fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl Evaluator for WindowHeuristic {
    fn score(&self, board: &Board, side: Side) -> i32 {
        let center = board.count_in_column(CENTER_COLUMN, side) as i32 * self.weights.center;

        let runs: i32 = windows()
            .iter()
            .map(|window| self.weights.window(window.counts(board, side)))
            .sum();

        center + runs
    }
}

/// Score `board` for `side` with the default weights.
#[must_use]
pub fn score(board: &Board, side: Side) -> i32 {
    WindowHeuristic::default().score(board, side)
}
