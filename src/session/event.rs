//! Session events.
//!
//! Events describe what changed in the session. Observers subscribed on the
//! [`Session`](super::Session) receive each event together with a view of
//! the turn state right after the change.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Side};
use crate::rules::{Outcome, WinningLine};
use crate::search::Difficulty;

use super::config::InputMode;
use super::scheduler::Effect;
use super::state::GameId;

/// Identifier returned by `subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl SubscriptionId {
    /// Create a new subscription ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Why a submitted move was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// No game in progress.
    NotPlaying,
    /// The game already has a result.
    GameDecided,
    /// The agent is to move.
    NotYourTurn,
    /// Column outside the board.
    InvalidColumn,
    /// Column has no open row.
    ColumnFull,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::NotPlaying => "no game in progress",
            RejectReason::GameDecided => "game already decided",
            RejectReason::NotYourTurn => "not your turn",
            RejectReason::InvalidColumn => "column outside the board",
            RejectReason::ColumnFull => "column is full",
        };
        f.write_str(text)
    }
}

/// Something that happened in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh game began.
    GameStarted { game: GameId },

    /// The session went back to the menu.
    ReturnedToMenu,

    /// A piece landed.
    PiecePlaced { side: Side, coord: Coord },

    /// The agent reply is scheduled for clock reading `due`.
    AgentThinking { due: Duration },

    /// The move passed to `to`.
    TurnPassed { to: Side },

    /// A win or draw was recorded; GameOver follows after the delay.
    GameDecided {
        outcome: Outcome,
        line: Option<WinningLine>,
    },

    /// Status moved to GameOver.
    GameOver { outcome: Outcome },

    /// A submitted move was ignored.
    MoveRejected { column: usize, reason: RejectReason },

    /// The agent's difficulty changed.
    DifficultyChanged { difficulty: Difficulty },

    /// The input mode changed.
    InputModeChanged { mode: InputMode },

    /// A deferred effect fired after its game moved on and was discarded.
    EffectDropped { effect: Effect, game: GameId },
}
