//! Error types.
//!
//! Every failure in this crate is a pure-logic edge case: there is no I/O,
//! parsing of untrusted input aside from configuration keys, or networking.

/// Errors raised by board placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {0} is outside the board")]
    InvalidColumn(usize),

    #[error("column {0} has no open row")]
    ColumnFull(usize),
}

/// Errors raised when restoring a board or turn state from serialized form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("piece at ({row}, {col}) has an empty cell below it")]
    FloatingPiece { row: usize, col: usize },

    #[error("move {0} does not match the board")]
    HistoryMismatch(usize),

    #[error("move {0} was played out of turn")]
    OutOfTurn(usize),

    #[error("history does not reproduce the board")]
    BoardMismatch,

    #[error("side to move does not follow from the history")]
    WrongSideToMove,

    #[error("recorded outcome does not match the board")]
    OutcomeMismatch,

    #[error("winning line does not match the recorded outcome")]
    WinningLineMismatch,
}

/// Errors raised by the search engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// `choose_move` was called on a board with no legal column.
    #[error("no valid columns to search")]
    NoValidColumns,
}

/// Errors raised when building or parsing configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("search depth must be >= 1 (got {0})")]
    InvalidDepth(u32),

    #[error("blunder probability must be in [0, 1] (got {0})")]
    InvalidBlunderProbability(f64),

    #[error("unknown difficulty '{0}' (expected novice, adept or master)")]
    UnknownDifficulty(String),

    #[error("unknown input mode '{0}' (expected pointer or gesture)")]
    UnknownInputMode(String),
}
