//! Difficulty profiles for the search engine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Search parameters for one skill level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Plies searched, counting the agent's own candidate move.
    /// Must be at least 1.
    pub search_depth: u32,

    /// Chance in `[0, 1]` that the agent skips the search and plays a
    /// uniformly random legal column.
    pub blunder_probability: f64,
}

impl DifficultyProfile {
    /// Create a validated profile.
    pub fn new(search_depth: u32, blunder_probability: f64) -> Result<Self, ConfigError> {
        let profile = Self {
            search_depth,
            blunder_probability,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check depth and probability bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::InvalidDepth(self.search_depth));
        }
        if !(0.0..=1.0).contains(&self.blunder_probability) {
            return Err(ConfigError::InvalidBlunderProbability(self.blunder_probability));
        }
        Ok(())
    }

    /// Same profile with a different depth.
    pub fn with_depth(self, search_depth: u32) -> Result<Self, ConfigError> {
        Self::new(search_depth, self.blunder_probability)
    }

    /// Same profile with a different blunder probability.
    pub fn with_blunder_probability(self, probability: f64) -> Result<Self, ConfigError> {
        Self::new(self.search_depth, probability)
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

/// Named skill levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Shallow search, frequent blunders.
    Novice,
    /// Medium depth, occasional blunders.
    #[default]
    Adept,
    /// Deepest search, never blunders.
    Master,
}

impl Difficulty {
    /// Every level, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Novice, Difficulty::Adept, Difficulty::Master];

    /// Fixed search parameters for this level.
    #[must_use]
    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Novice => DifficultyProfile {
                search_depth: 2,
                blunder_probability: 0.4,
            },
            Difficulty::Adept => DifficultyProfile {
                search_depth: 4,
                blunder_probability: 0.1,
            },
            Difficulty::Master => DifficultyProfile {
                search_depth: 6,
                blunder_probability: 0.0,
            },
        }
    }

    /// Lower-case key used by configuration and the CLI.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Difficulty::Novice => "novice",
            Difficulty::Adept => "adept",
            Difficulty::Master => "master",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepts the level names and the easy/medium/hard aliases.
impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "novice" | "easy" => Ok(Difficulty::Novice),
            "adept" | "medium" => Ok(Difficulty::Adept),
            "master" | "hard" => Ok(Difficulty::Master),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}
