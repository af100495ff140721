//! Turn orchestration for a human-versus-agent game.
//!
//! ## Overview
//!
//! A [`Session`] owns the authoritative [`TurnState`] and is the only thing
//! that changes it:
//!
//! - **Commands**: `start_game`, `return_to_menu`, `submit_move`,
//!   `set_difficulty`, `set_input_mode`
//! - **Deferred effects**: the agent reply and the GameOver transition run
//!   on a virtual clock driven by `advance`, and are dropped if their game
//!   has moved on by the time they fire
//! - **Observers**: callbacks receive each [`SessionEvent`] with the state
//!   right after it
//!
//! Readers only ever see `&TurnState` or an owned snapshot.

pub mod config;
pub mod event;
pub mod orchestrator;
pub mod scheduler;
pub mod state;

pub use config::{InputMode, SessionConfig};
pub use event::{RejectReason, SessionEvent, SubscriptionId};
pub use orchestrator::{Observer, Session};
pub use scheduler::{Effect, ScheduledTask, Scheduler, TaskId};
pub use state::{GameId, GameStatus, MoveRecord, TurnState};
