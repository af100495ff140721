//! Deferred effects on a virtual clock.
//!
//! The session never sleeps. Delayed work is pushed here with a due time
//! and fired when the driver advances the clock past it. Tasks fire in
//! due-time order; tasks due at the same instant fire in scheduling order.
//!
//! A task is tagged with the [`GameId`] that scheduled it. Nothing here
//! knows whether a task is still wanted: the session checks
//! [`Effect::is_fresh`] against the live state at fire time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Side;

use super::state::{GameId, GameStatus, TurnState};

/// Unique identifier for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Create a new task ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Work the session defers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// The agent picks and plays its column.
    AgentReply,
    /// A decided game moves to GameOver.
    EnterGameOver,
}

impl Effect {
    /// Whether this effect, scheduled by `game`, still applies to `state`.
    ///
    /// An agent reply needs the game it was scheduled for to be undecided
    /// with Side B to move. A game-over transition needs that game to be
    /// decided and still playing.
    #[must_use]
    pub fn is_fresh(self, state: &TurnState, game: GameId) -> bool {
        if state.game_id() != game || state.status() != GameStatus::Playing {
            return false;
        }
        match self {
            Effect::AgentReply => !state.is_decided() && state.current_side() == Side::B,
            Effect::EnterGameOver => state.is_decided(),
        }
    }
}

/// A task waiting on the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Unique identifier, increasing in scheduling order.
    pub id: TaskId,

    /// Clock reading at which the task fires.
    pub due: Duration,

    /// Game that scheduled the task.
    pub game: GameId,

    /// What to do.
    pub effect: Effect,
}

impl ScheduledTask {
    fn key(&self) -> (Duration, TaskId) {
        (self.due, self.id)
    }
}

impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-queue of tasks keyed by `(due, id)`.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<ScheduledTask>>,
    next_id: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `effect` for `game`, firing at `due`.
    pub fn schedule(&mut self, due: Duration, game: GameId, effect: Effect) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;

        self.queue.push(Reverse(ScheduledTask {
            id,
            due,
            game,
            effect,
        }));
        id
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<ScheduledTask> {
        if self.next_due()? > now {
            return None;
        }
        self.queue.pop().map(|Reverse(task)| task)
    }

    /// Due time of the earliest task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(task)| task.due)
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
