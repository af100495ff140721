//! Terminal-position detection.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Side};

use super::lines::has_win;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// One side connected four.
    Winner(Side),
    /// Board filled with no winner.
    Draw,
}

impl Outcome {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, Outcome::Winner(s) if *s == side)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(side) => write!(f, "{side} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Outcome of a position, or `None` if play continues.
///
/// Side A is checked first. Boards reached through legal alternation never
/// have two winners, since play stops at the first win.
#[must_use]
pub fn outcome(board: &Board) -> Option<Outcome> {
    if let Some(side) = Side::ALL.into_iter().find(|&side| has_win(board, side)) {
        return Some(Outcome::Winner(side));
    }
    if board.is_full() {
        return Some(Outcome::Draw);
    }
    None
}

/// True if either side has won or no legal moves remain.
#[must_use]
pub fn is_terminal(board: &Board) -> bool {
    outcome(board).is_some()
}
