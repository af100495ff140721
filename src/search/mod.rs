//! Adversarial search for the opposing agent.
//!
//! ## Overview
//!
//! [`MinimaxSearch`] picks a column for one side using, in order, a random
//! blunder roll, an immediate-win scan, an immediate-block scan, and a
//! depth-limited alpha-beta minimax. How deep it looks and how often it
//! blunders comes from a [`DifficultyProfile`].
//!
//! ## Usage
//!
//! ```rust
//! use runeboard::core::{Board, Side};
//! use runeboard::search::{Difficulty, MinimaxSearch};
//!
//! let mut search = MinimaxSearch::new(7);
//! let column = search
//!     .choose_move(&Board::new(), Side::B, &Difficulty::Master.profile())
//!     .unwrap();
//!
//! assert!(column < runeboard::core::COLS);
//! println!("{:?} after {} nodes", search.stats().decision, search.stats().nodes);
//! ```

pub mod config;
pub mod minimax;
pub mod stats;

pub use config::{Difficulty, DifficultyProfile};
pub use minimax::{MinimaxSearch, WIN_SCORE};
pub use stats::{Decision, SearchStats};
