//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Stable identifier handed in by whatever front end seats the player
//! (a chat user id, a bot slot). It survives elimination, so events that
//! mention a dropped player stay meaningful.
//!
//! ## Player
//!
//! Mutable record for one seat: health, hand, the staging buffer for the
//! action currently in flight, attached condition cards and the three hook
//! queues those conditions are bound to.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardUid};
use crate::conditions::{ConditionRecord, HookPhase};

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
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

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A seated player.
///
/// `hp` may dip below zero while an exchange is resolving; elimination is
/// only decided by [`Engine::cleanup`](crate::rules::Engine::cleanup).
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,

    /// Cards in hand, in draw order.
    pub hand: Vec<Card>,

    /// Staging buffer for the action currently resolving.
    pub discard: Vec<Card>,

    /// Cards attached as persistent conditions.
    pub condition_cards: Vec<Card>,

    pub before_turn: VecDeque<ConditionRecord>,
    pub before_contact: VecDeque<ConditionRecord>,
    pub after_contact: VecDeque<ConditionRecord>,

    pub miss_turns: u32,
    pub extra_turns: u32,

    /// Turns this player has started.
    pub turns: u32,
}

impl Player {
    /// Create a player at full health with empty zones.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            id,
            name: name.into(),
            hp: max_hp,
            max_hp,
            hand: Vec::new(),
            discard: Vec::new(),
            condition_cards: Vec::new(),
            before_turn: VecDeque::new(),
            before_contact: VecDeque::new(),
            after_contact: VecDeque::new(),
            miss_turns: 0,
            extra_turns: 0,
            turns: 0,
        }
    }

    /// Hook queue for a phase.
    #[must_use]
    pub fn queue(&self, phase: HookPhase) -> &VecDeque<ConditionRecord> {
        match phase {
            HookPhase::BeforeTurn => &self.before_turn,
            HookPhase::BeforeContact => &self.before_contact,
            HookPhase::AfterContact => &self.after_contact,
        }
    }

    /// Mutable hook queue for a phase.
    pub fn queue_mut(&mut self, phase: HookPhase) -> &mut VecDeque<ConditionRecord> {
        match phase {
            HookPhase::BeforeTurn => &mut self.before_turn,
            HookPhase::BeforeContact => &mut self.before_contact,
            HookPhase::AfterContact => &mut self.after_contact,
        }
    }

    /// Find a condition record by the card that backs it.
    #[must_use]
    pub fn condition(&self, phase: HookPhase, uid: CardUid) -> Option<&ConditionRecord> {
        self.queue(phase).iter().find(|r| r.condition_id == uid)
    }

    /// Check whether a condition card is still attached.
    #[must_use]
    pub fn has_condition_card(&self, uid: CardUid) -> bool {
        self.condition_cards.iter().any(|c| c.uid == uid)
    }

    /// Total cards this player is holding across hand, staging and conditions.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.discard.len() + self.condition_cards.len()
    }

    /// Health missing from the maximum (never negative).
    #[must_use]
    pub fn missing_hp(&self) -> i32 {
        (self.max_hp - self.hp).max(0)
    }
}

/// A player removed from turn order, with whatever cards left with them.
#[derive(Clone, Debug)]
pub struct Dropout {
    pub player: Player,

    /// Cards carried out of the game. Eliminated players leave nothing
    /// behind here; players removed explicitly keep their hand.
    pub collected: Vec<Card>,
}
