//! # rust-brawl
//!
//! Resolution engine and heuristic bot for a multiplayer turn-based combat
//! card game.
//!
//! ## Design Principles
//!
//! 1. **One Authority**: `Engine` alone decides legality and mutates state.
//!    Cards, bots and front ends go through its operations.
//!
//! 2. **Cards Are Behaviour**: every template implements `CardBehavior`.
//!    The engine never branches on which card it holds.
//!
//! 3. **Conservation**: card instances are created once at start and only
//!    move between zones. None are ever lost or duplicated.
//!
//! ## Architecture
//!
//! - **Nested Resolution**: hooks call back into the engine (`contact`,
//!   `open_window`) and those calls nest. Redirection, reflection and
//!   duplication are just further contacts.
//!
//! - **Tagged Conditions**: lingering effects are card instances parked on
//!   a player plus records in per-phase hook queues, keyed by the card's
//!   instance id.
//!
//! - **Outbox Events**: the engine queues structured events (`announce` to
//!   the table, `whisper` to one player) for front ends to render.
//!
//! ## Modules
//!
//! - `core`: ids, players, game zones, RNG, configuration, errors
//! - `cards`: definitions, instances, registry, card contract, catalogue
//! - `conditions`: condition records and hook phases
//! - `events`: event payloads and the outbox
//! - `rules`: the resolution engine
//! - `ai`: move generator, decision policy, bot driver

pub mod ai;
pub mod cards;
pub mod conditions;
pub mod core;
pub mod events;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BotThresholds, ConfigError, DeckPolicy, Dropout, EngineError, Game, GameConfig, GameRng, Player,
    PlayerId, Verdict, Violation,
};

pub use crate::cards::{
    catalogue, Card, CardBehavior, CardDefinition, CardId, CardKind, CardList, CardRegistry,
    CardStats, CardUid, Preview,
};

pub use crate::conditions::{ConditionRecord, HookPhase};

pub use crate::events::{Audience, Dispatch, Event};

pub use crate::rules::{Engine, Exchange, GameResult, PendingContact};

pub use crate::ai::{BotDriver, Candidate, HeuristicBot, MoveGenerator, Policy, Situation};
