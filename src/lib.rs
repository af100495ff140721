//! # runeboard
//!
//! Rules and agent core for a two-player gravity-drop grid game
//! (four in a row on a 6x7 board).
//!
//! ## Design Principles
//!
//! 1. **Immutable Boards**: Placing a piece returns a new `Board`. Search
//!    branches freely; readers can never observe a half-applied move.
//!
//! 2. **Single Writer**: The `Session` owns the turn state. Everything else
//!    reads `&TurnState`, takes a snapshot, or subscribes to events.
//!
//! 3. **Deterministic Under a Seed**: All randomness flows through
//!    `GameRng`, so a game replays exactly from its seed.
//!
//! ## Architecture
//!
//! - **Deferred Effects**: The agent reply and the GameOver transition are
//!   scheduled on a virtual clock and re-check the live state when they
//!   fire, so late work never corrupts a newer game.
//!
//! - **Persistent History**: Move history uses `im-rs`, so snapshots handed
//!   to observers are O(1) clones.
//!
//! ## Modules
//!
//! - `core`: Sides, board, coordinates, RNG
//! - `rules`: Win detection, outcomes, position evaluation
//! - `search`: Minimax with alpha-beta, difficulty profiles, statistics
//! - `session`: Turn orchestrator, scheduler, events, configuration
//! - `error`: Error types

pub mod core;
pub mod error;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Board, Coord, GameRng, GameRngState, Side, COLS, CONNECT, ROWS};

pub use crate::error::{BoardError, ConfigError, SearchError, StateError};

pub use crate::rules::{has_win, outcome, score, winning_line, Evaluator, Outcome, WinningLine};

pub use crate::search::{Decision, Difficulty, DifficultyProfile, MinimaxSearch, SearchStats};

pub use crate::session::{
    GameId, GameStatus, InputMode, MoveRecord, Session, SessionConfig, SessionEvent, TurnState,
};
