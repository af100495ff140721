//! Turn state: the single source of truth for one game.
//!
//! ## TurnState
//!
//! Observable information for every reader:
//! - Board, status, side to move
//! - Winner and winning line once decided
//! - Move history
//! - Id of the game the state belongs to
//!
//! Only the [`Session`](super::Session) mutates a `TurnState`. Readers get
//! clones, which are cheap: the board is a small `Copy` value and the
//! history is a persistent `im::Vector`.
//!
//! A deserialized state is checked before it is accepted: the history must
//! replay onto the board in turn order, and the recorded outcome and line
//! must be the ones the board shows.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Board, Coord, Side};
use crate::error::{BoardError, StateError};
use crate::rules::{outcome, winning_line, Outcome, WinningLine};

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No game in progress.
    #[default]
    Menu,
    /// A game is in progress or decided but not yet shown as over.
    Playing,
    /// The decided game is on display.
    GameOver,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Menu => "menu",
            GameStatus::Playing => "playing",
            GameStatus::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// Identifier of one game within a session.
///
/// Bumped by every start, so deferred work can tell whether the game it
/// was scheduled for is still current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    /// Create a new game ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The following ID.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// One accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Who moved.
    pub side: Side,
    /// Where the piece landed.
    pub coord: Coord,
}

/// Authoritative state of the current game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTurnState")]
pub struct TurnState {
    board: Board,
    status: GameStatus,
    current_side: Side,
    winner: Option<Outcome>,
    winning_line: Option<WinningLine>,

    /// Accepted moves, oldest first.
    history: Vector<MoveRecord>,

    game_id: GameId,
}

impl TurnState {
    /// Idle state shown before any game.
    #[must_use]
    pub fn menu(game_id: GameId) -> Self {
        Self {
            board: Board::new(),
            status: GameStatus::Menu,
            current_side: Side::A,
            winner: None,
            winning_line: None,
            history: Vector::new(),
            game_id,
        }
    }

    /// Fresh game: empty board, Side A to move, status Playing.
    #[must_use]
    pub fn new_game(game_id: GameId) -> Self {
        Self {
            status: GameStatus::Playing,
            ..Self::menu(game_id)
        }
    }

    // === Accessors ===

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move.
    #[must_use]
    pub fn current_side(&self) -> Side {
        self.current_side
    }

    /// Recorded outcome, if the game is decided.
    #[must_use]
    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }

    /// The four winning cells, if a side won.
    #[must_use]
    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    /// Accepted moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Most recent accepted move.
    #[must_use]
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.history.last().copied()
    }

    /// Game this state belongs to.
    #[must_use]
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// True once a winner or draw is recorded.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// True while `side` may move: playing, undecided, and `side` to move.
    #[must_use]
    pub fn is_turn_of(&self, side: Side) -> bool {
        self.status == GameStatus::Playing && self.winner.is_none() && self.current_side == side
    }

    // === Mutation (session only) ===

    /// Drop a piece for the side to move and record it.
    pub(crate) fn apply_move(&mut self, col: usize) -> Result<MoveRecord, BoardError> {
        let row = self.board.drop_row(col)?;
        self.board = self.board.place(col, self.current_side)?;

        let record = MoveRecord {
            side: self.current_side,
            coord: Coord::new(row, col),
        };
        self.history.push_back(record);
        Ok(record)
    }

    /// Hand the move to the other side.
    pub(crate) fn pass_turn(&mut self) {
        self.current_side = self.current_side.opponent();
    }

    /// Record the outcome and, for a win, its line.
    pub(crate) fn decide(&mut self, outcome: Outcome, line: Option<WinningLine>) {
        self.winner = Some(outcome);
        self.winning_line = line;
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }
}

/// Unchecked serialized form of a [`TurnState`].
#[derive(Deserialize)]
struct RawTurnState {
    board: Board,
    status: GameStatus,
    current_side: Side,
    winner: Option<Outcome>,
    winning_line: Option<WinningLine>,
    history: Vector<MoveRecord>,
    game_id: GameId,
}

impl TryFrom<RawTurnState> for TurnState {
    type Error = StateError;

    fn try_from(raw: RawTurnState) -> Result<Self, Self::Error> {
        let mut replay = Board::new();
        for (i, record) in raw.history.iter().enumerate() {
            if record.side != side_after(i) {
                return Err(StateError::OutOfTurn(i));
            }
            if replay.drop_row(record.coord.col) != Ok(record.coord.row) {
                return Err(StateError::HistoryMismatch(i));
            }
            replay = replay
                .place(record.coord.col, record.side)
                .map_err(|_| StateError::HistoryMismatch(i))?;
        }
        if replay != raw.board {
            return Err(StateError::BoardMismatch);
        }

        if raw.winner != outcome(&raw.board) {
            return Err(StateError::OutcomeMismatch);
        }
        let expected_line = match raw.winner {
            Some(Outcome::Winner(side)) => winning_line(&raw.board, side),
            _ => None,
        };
        if raw.winning_line != expected_line {
            return Err(StateError::WinningLineMismatch);
        }

        // A decided game always hands the move back to Side A.
        let expected_side = if raw.winner.is_some() {
            Side::A
        } else {
            side_after(raw.history.len())
        };
        if raw.current_side != expected_side {
            return Err(StateError::WrongSideToMove);
        }

        Ok(Self {
            board: raw.board,
            status: raw.status,
            current_side: raw.current_side,
            winner: raw.winner,
            winning_line: raw.winning_line,
            history: raw.history,
            game_id: raw.game_id,
        })
    }
}

/// Side to move after `moves` alternating moves, Side A first.
fn side_after(moves: usize) -> Side {
    if moves % 2 == 0 {
        Side::A
    } else {
        Side::B
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::menu(GameId::default())
    }
}
