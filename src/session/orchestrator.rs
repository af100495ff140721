//! The turn orchestrator.
//!
//! ## Flow
//!
//! ```text
//! Menu --start_game--> Playing --(human move)--> agent reply scheduled
//!                        ^                              |
//!                        +------ turn back to A <-------+
//!
//! win or draw --> decided (still Playing) --game_over_delay--> GameOver
//! ```
//!
//! `Session` owns the [`TurnState`] and is the only thing that mutates it.
//! Delayed work (the agent reply, the GameOver transition) goes through a
//! [`Scheduler`] on a virtual clock that the driver moves with
//! [`Session::advance`]. Each deferred effect is checked against the live
//! state when it fires and is discarded if its game has moved on.

use std::time::Duration;

use log::{debug, error, info, warn};

use crate::core::{GameRng, Side};
use crate::error::BoardError;
use crate::rules::{winning_line, Evaluator, Outcome, WindowHeuristic, WinningLine};
use crate::search::{Difficulty, DifficultyProfile, MinimaxSearch, SearchStats};

use super::config::{InputMode, SessionConfig};
use super::event::{RejectReason, SessionEvent, SubscriptionId};
use super::scheduler::{Effect, ScheduledTask, Scheduler};
use super::state::{GameStatus, TurnState};

/// Callback receiving every event with the state right after it.
pub type Observer = Box<dyn FnMut(&SessionEvent, &TurnState)>;

/// Authoritative game session: the human plays Side A, the agent Side B.
///
/// ## Example
///
/// ```rust
/// use runeboard::session::{GameStatus, Session, SessionConfig};
/// use runeboard::core::Side;
///
/// let mut session = Session::new(SessionConfig::instant());
/// session.start_game();
///
/// session.submit_move(3);
/// assert_eq!(session.state().current_side(), Side::B);
///
/// // Zero delays: the reply fires on the next clock tick.
/// session.flush();
/// assert_eq!(session.state().current_side(), Side::A);
/// assert_eq!(session.state().history().len(), 2);
/// assert_eq!(session.state().status(), GameStatus::Playing);
/// ```
pub struct Session<V: Evaluator = WindowHeuristic> {
    config: SessionConfig,
    state: TurnState,
    search: MinimaxSearch<V>,
    scheduler: Scheduler,

    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u32,

    /// Root stream; each game gets a fork for the agent.
    rng: GameRng,

    /// Virtual clock reading.
    now: Duration,
}

impl Session<WindowHeuristic> {
    /// Create a session in the menu with the default heuristic.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_evaluator(config, WindowHeuristic::default())
    }
}

impl Default for Session<WindowHeuristic> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<V: Evaluator> Session<V> {
    /// Create a session in the menu with a custom evaluator.
    pub fn with_evaluator(config: SessionConfig, evaluator: V) -> Self {
        let mut rng = GameRng::new(config.seed);
        let search = MinimaxSearch::with_evaluator(evaluator, rng.fork());

        Self {
            config,
            state: TurnState::default(),
            search,
            scheduler: Scheduler::new(),
            observers: Vec::new(),
            next_subscription: 0,
            rng,
            now: Duration::ZERO,
        }
    }

    // === Commands ===

    /// Start a fresh game from any status.
    ///
    /// Effects still queued for the previous game are dropped when they
    /// fire.
    pub fn start_game(&mut self) {
        let game = self.state.game_id().next();

        self.search.reseed(self.rng.fork());
        self.state = TurnState::new_game(game);

        info!(
            "{game} started ({}, depth {})",
            self.config.difficulty,
            self.config.active_profile().search_depth
        );
        self.emit(SessionEvent::GameStarted { game });
    }

    /// Go back to the menu from any status.
    ///
    /// The board stays visible. Queued effects are dropped when they fire.
    pub fn return_to_menu(&mut self) {
        self.state.set_status(GameStatus::Menu);

        info!("{} returned to menu", self.state.game_id());
        self.emit(SessionEvent::ReturnedToMenu);
    }

    /// Submit the human's column.
    ///
    /// Accepted only while playing, undecided, with Side A to move, and
    /// only for an open column. Anything else leaves the state untouched
    /// and is reported as [`SessionEvent::MoveRejected`].
    pub fn submit_move(&mut self, column: usize) {
        if let Some(reason) = self.admission() {
            self.reject(column, reason);
            return;
        }

        let record = match self.state.apply_move(column) {
            Ok(record) => record,
            Err(BoardError::InvalidColumn(_)) => {
                self.reject(column, RejectReason::InvalidColumn);
                return;
            }
            Err(BoardError::ColumnFull(_)) => {
                self.reject(column, RejectReason::ColumnFull);
                return;
            }
        };

        debug!("{} played {}", record.side, record.coord);
        self.emit(SessionEvent::PiecePlaced {
            side: record.side,
            coord: record.coord,
        });

        if let Some(line) = winning_line(self.state.board(), Side::A) {
            self.record_outcome(Outcome::Winner(Side::A), Some(line));
        } else if self.state.board().is_full() {
            self.record_outcome(Outcome::Draw, None);
        } else {
            self.state.pass_turn();
            self.emit(SessionEvent::TurnPassed { to: Side::B });

            let due = self.now.saturating_add(self.config.think_delay);
            self.scheduler
                .schedule(due, self.state.game_id(), Effect::AgentReply);
            self.emit(SessionEvent::AgentThinking { due });
        }
    }

    /// Change the agent's skill level.
    ///
    /// Read when the agent next replies, so a reply already scheduled uses
    /// the new level. Clears any explicit profile.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config = self.config.clone().with_difficulty(difficulty);
        debug!("difficulty set to {difficulty}");
        self.emit(SessionEvent::DifficultyChanged { difficulty });
    }

    /// Use explicit search parameters instead of a named level.
    pub fn set_profile(&mut self, profile: DifficultyProfile) {
        self.config = self.config.clone().with_profile(profile);
        debug!("profile set to {profile:?}");
    }

    /// Change the stored input mode.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.config = self.config.clone().with_input_mode(mode);
        debug!("input mode set to {mode}");
        self.emit(SessionEvent::InputModeChanged { mode });
    }

    // === Clock ===

    /// Move the clock forward by `dt`, firing every effect that falls due.
    ///
    /// Effects scheduled by a fired effect fire in the same call if they
    /// fall due before the new clock reading. Returns how many fired. The
    /// clock saturates at `Duration::MAX`.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let target = self.now.saturating_add(dt);
        let fired = self.run_until(target);
        self.now = target;
        fired
    }

    /// Fire everything pending, moving the clock to the last due time.
    pub fn flush(&mut self) -> usize {
        self.run_until(Duration::MAX)
    }

    /// Time until the next pending effect falls due.
    #[must_use]
    pub fn time_to_next_effect(&self) -> Option<Duration> {
        self.scheduler
            .next_due()
            .map(|due| due.saturating_sub(self.now))
    }

    /// Current clock reading.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    fn run_until(&mut self, target: Duration) -> usize {
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due(target) {
            self.now = self.now.max(task.due);
            self.fire(task);
            fired += 1;
        }
        fired
    }

    // === Observers ===

    /// Register a callback for every subsequent event.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&SessionEvent, &TurnState) + 'static,
    {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    // === Queries ===

    /// Read access to the live state.
    #[must_use]
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Owned copy of the live state.
    #[must_use]
    pub fn snapshot(&self) -> TurnState {
        self.state.clone()
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Statistics of the agent's last decision.
    #[must_use]
    pub fn search_stats(&self) -> &SearchStats {
        self.search.stats()
    }

    /// Number of deferred effects waiting on the clock.
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.scheduler.len()
    }

    // === Internals ===

    fn admission(&self) -> Option<RejectReason> {
        if self.state.status() != GameStatus::Playing {
            Some(RejectReason::NotPlaying)
        } else if self.state.is_decided() {
            Some(RejectReason::GameDecided)
        } else if self.state.current_side() != Side::A {
            Some(RejectReason::NotYourTurn)
        } else {
            None
        }
    }

    fn reject(&mut self, column: usize, reason: RejectReason) {
        debug!("ignored move in column {column}: {reason}");
        self.emit(SessionEvent::MoveRejected { column, reason });
    }

    fn fire(&mut self, task: ScheduledTask) {
        if !task.effect.is_fresh(&self.state, task.game) {
            warn!(
                "dropped stale {:?} from {} (now {})",
                task.effect,
                task.game,
                self.state.game_id()
            );
            self.emit(SessionEvent::EffectDropped {
                effect: task.effect,
                game: task.game,
            });
            return;
        }

        match task.effect {
            Effect::AgentReply => self.agent_reply(),
            Effect::EnterGameOver => self.enter_game_over(),
        }
    }

    fn agent_reply(&mut self) {
        let profile = self.config.active_profile();
        let column = match self.search.choose_move(self.state.board(), Side::B, &profile) {
            Ok(column) => column,
            Err(err) => {
                error!("agent has no move on a live board: {err}");
                self.record_outcome(Outcome::Draw, None);
                return;
            }
        };

        let record = match self.state.apply_move(column) {
            Ok(record) => record,
            Err(err) => {
                error!("agent chose an unplayable column: {err}");
                return;
            }
        };

        debug!("{} played {}", record.side, record.coord);
        self.emit(SessionEvent::PiecePlaced {
            side: record.side,
            coord: record.coord,
        });

        // The move returns to Side A whether or not the game continues.
        self.state.pass_turn();

        if let Some(line) = winning_line(self.state.board(), Side::B) {
            self.record_outcome(Outcome::Winner(Side::B), Some(line));
        } else if self.state.board().is_full() {
            self.record_outcome(Outcome::Draw, None);
        } else {
            self.emit(SessionEvent::TurnPassed { to: Side::A });
        }
    }

    fn record_outcome(&mut self, outcome: Outcome, line: Option<WinningLine>) {
        self.state.decide(outcome, line);
        info!("{} decided: {outcome}", self.state.game_id());
        self.emit(SessionEvent::GameDecided { outcome, line });

        let due = self.now.saturating_add(self.config.game_over_delay);
        self.scheduler
            .schedule(due, self.state.game_id(), Effect::EnterGameOver);
    }

    fn enter_game_over(&mut self) {
        let Some(outcome) = self.state.winner() else {
            return;
        };
        self.state.set_status(GameStatus::GameOver);
        info!("{} over: {outcome}", self.state.game_id());
        self.emit(SessionEvent::GameOver { outcome });
    }

    fn emit(&mut self, event: SessionEvent) {
        for (_, observer) in &mut self.observers {
            observer(&event, &self.state);
        }
    }
}
