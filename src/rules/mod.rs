//! Game rules: line detection, terminal outcomes, position evaluation.
//!
//! - `lines`: the shared window table and four-in-a-row detection
//! - `engine`: win/draw outcome of a board
//! - `eval`: the static heuristic used at the search horizon

pub mod engine;
pub mod eval;
pub mod lines;

pub use engine::{is_terminal, outcome, Outcome};
pub use eval::{score, Evaluator, HeuristicWeights, WindowHeuristic};
pub use lines::{has_win, windows, winning_line, Orientation, Window, WindowCounts, WinningLine};
