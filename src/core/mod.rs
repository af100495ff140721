//! Core types: sides, the board, RNG.
//!
//! Everything here is a plain value with no knowledge of rules or search.

pub mod board;
pub mod rng;
pub mod side;

pub use board::{Board, Columns, Coord, CENTER_COLUMN, COLS, CONNECT, ROWS};
pub use rng::{GameRng, GameRngState};
pub use side::Side;
