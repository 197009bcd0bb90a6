//! Core types: players, game zones, RNG, configuration, errors.
//!
//! Nothing in here knows about individual cards. The rules engine and the
//! card catalogue build on these.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{BotThresholds, ConfigError, DeckPolicy, GameConfig};
pub use error::{EngineError, Verdict, Violation};
pub use player::{Dropout, Player, PlayerId};
pub use rng::GameRng;
pub use state::Game;
