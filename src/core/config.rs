//! Game configuration.
//!
//! Front ends configure a table at creation time through `GameConfig`.
//! The engine never hardcodes table sizes, health, or deck behaviour.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What happens when a draw finds the deck empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeckPolicy {
    /// Shuffle the discard pile into a fresh deck and keep drawing.
    #[default]
    Reshuffle,
    /// Stop drawing; the hand stays short.
    ShortDraw,
}

/// Configuration rejected by [`GameConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_hp must be positive, got {0}")]
    NonPositiveHp(i32),
    #[error("hand_size must be at least 1")]
    EmptyHand,
    #[error("max_players must be at least 2, got {0}")]
    TooFewSeats(usize),
}

/// Table configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Starting (and maximum) health.
    pub max_hp: i32,

    /// Cards a hand is refilled to at the start of a turn.
    pub hand_size: usize,

    /// Seed for shuffles, random targets and variable damage.
    pub seed: u64,

    pub deck_policy: DeckPolicy,

    /// Seats at the table.
    pub max_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hp: 10,
            hand_size: 5,
            seed: 0,
            deck_policy: DeckPolicy::default(),
            max_players: 8,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_hp(mut self, max_hp: i32) -> Self {
        self.max_hp = max_hp;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_deck_policy(mut self, policy: DeckPolicy) -> Self {
        self.deck_policy = policy;
        self
    }

    #[must_use]
    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hp < 1 {
            return Err(ConfigError::NonPositiveHp(self.max_hp));
        }
        if self.hand_size == 0 {
            return Err(ConfigError::EmptyHand);
        }
        if self.max_players < 2 {
            return Err(ConfigError::TooFewSeats(self.max_players));
        }
        Ok(())
    }
}

/// Weight thresholds for the heuristic decision policy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotThresholds {
    /// Counter if the best counter weighs at least this much.
    pub counter: f64,
    /// Play a disaster if it weighs strictly more than this.
    pub disaster: f64,
    /// Play an ordinary move if it weighs at least this much.
    pub play: f64,
}

impl Default for BotThresholds {
    fn default() -> Self {
        Self {
            counter: 1.0,
            disaster: 2.0,
            play: 2.0,
        }
    }
}
