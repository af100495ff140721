//! Session configuration.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::search::{Difficulty, DifficultyProfile};

/// How the human side issues moves.
///
/// Opaque to the rules: the session only stores it so front-ends can read
/// it back from the same source of truth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Mouse or touch pointer.
    #[default]
    Pointer,
    /// Hand tracking.
    Gesture,
}

impl InputMode {
    /// Canonical key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            InputMode::Pointer => "pointer",
            InputMode::Gesture => "gesture",
        }
    }
}

impl FromStr for InputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pointer" | "mouse" => Ok(InputMode::Pointer),
            "gesture" | "hand" => Ok(InputMode::Gesture),
            _ => Err(ConfigError::UnknownInputMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Configuration for a [`Session`](super::Session).
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use runeboard::search::Difficulty;
/// use runeboard::session::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_difficulty(Difficulty::Master)
///     .with_think_delay(Duration::ZERO)
///     .with_seed(7);
///
/// assert_eq!(config.active_profile().search_depth, 6);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Pause between the human move and the agent reply.
    pub think_delay: Duration,

    /// Pause between a decided game and the GameOver status.
    pub game_over_delay: Duration,

    /// Selected skill level.
    pub difficulty: Difficulty,

    /// Explicit profile; overrides `difficulty` when set.
    pub profile: Option<DifficultyProfile>,

    /// Selected input mode.
    pub input_mode: InputMode,

    /// Seed for the agent's randomness.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            think_delay: Duration::from_millis(1200),
            game_over_delay: Duration::from_millis(1500),
            difficulty: Difficulty::default(),
            profile: None,
            input_mode: InputMode::default(),
            seed: 42,
        }
    }
}

impl SessionConfig {
    /// Config with both delays set to zero, for tests and headless play.
    #[must_use]
    pub fn instant() -> Self {
        Self::default()
            .with_think_delay(Duration::ZERO)
            .with_game_over_delay(Duration::ZERO)
    }

    /// Set the think delay.
    #[must_use]
    pub fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay = delay;
        self
    }

    /// Set the game-over delay.
    #[must_use]
    pub fn with_game_over_delay(mut self, delay: Duration) -> Self {
        self.game_over_delay = delay;
        self
    }

    /// Set the difficulty and clear any explicit profile.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self.profile = None;
        self
    }

    /// Set an explicit profile.
    #[must_use]
    pub fn with_profile(mut self, profile: DifficultyProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set the input mode.
    #[must_use]
    pub fn with_input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Profile the agent searches with.
    #[must_use]
    pub fn active_profile(&self) -> DifficultyProfile {
        self.profile.unwrap_or_else(|| self.difficulty.profile())
    }
}
