//! Announce/whisper outbox.
//!
//! The engine never renders text. Every observable happening is an
//! [`Event`] with a fixed payload shape per code, addressed either to the
//! whole table or to one player. Front ends (localization, chat adapters,
//! bots) drain the outbox after each call and render as they see fit.
//!
//! Events serialize with their code in a `code` field:
//!
//! ```
//! use rust_brawl::core::PlayerId;
//! use rust_brawl::events::Event;
//!
//! let json = serde_json::to_string(&Event::Passed { player: PlayerId::new(2) }).unwrap();
//! assert_eq!(json, r#"{"code":"passed","player":2}"#);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardId, CardList};
use crate::core::{PlayerId, Violation};

/// Something that happened at the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Event {
    GameStarted { players: Vec<PlayerId> },
    TurnStarted { player: PlayerId, turn: u32 },
    TurnSkipped { player: PlayerId },
    CardPlayed {
        player: PlayerId,
        cards: CardList,
        target: Option<PlayerId>,
    },
    /// A counter window opened; `target` must counter or pass.
    AttackIncoming {
        attacker: PlayerId,
        target: PlayerId,
        cards: CardList,
    },
    Passed { player: PlayerId },
    Countered {
        player: PlayerId,
        attacker: PlayerId,
        cards: CardList,
    },
    Damaged { player: PlayerId, amount: i32, hp: i32 },
    Healed { player: PlayerId, amount: i32, hp: i32 },
    Redirected { from: PlayerId, to: PlayerId },
    ConditionAttached { player: PlayerId, card: CardId },
    ConditionExpired { player: PlayerId, card: CardId },
    InsurancePaid { player: PlayerId, hp: i32 },
    ExtraTurn { player: PlayerId, remaining: u32 },
    TargetForced { player: PlayerId },
    OrderReversed { player: PlayerId },
    Discarded { player: PlayerId, count: usize },
    PlayerLeft { player: PlayerId },
    Eliminated { player: PlayerId },
    Winner { player: PlayerId },
    NoSurvivors,

    // Whispers
    CardsDrawn { cards: CardList },
    RuleViolation { violation: Violation },
}

/// Who gets to see an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    All,
    Player(PlayerId),
}

/// An event with its addressee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dispatch {
    pub audience: Audience,
    pub event: Event,
}

impl Dispatch {
    /// Is this addressed to (or visible to) `player`?
    #[must_use]
    pub fn visible_to(&self, player: PlayerId) -> bool {
        match self.audience {
            Audience::All => true,
            Audience::Player(id) => id == player,
        }
    }
}

/// Ordered outbox of dispatched events.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    queue: Vec<Dispatch>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcast to the table.
    pub fn announce(&mut self, event: Event) {
        debug!(?event, "announce");
        self.queue.push(Dispatch {
            audience: Audience::All,
            event,
        });
    }

    /// Send privately to one player.
    pub fn whisper(&mut self, player: PlayerId, event: Event) {
        debug!(%player, ?event, "whisper");
        self.queue.push(Dispatch {
            audience: Audience::Player(player),
            event,
        });
    }

    /// Events not yet drained.
    #[must_use]
    pub fn pending(&self) -> &[Dispatch] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Dispatch> + '_ {
        self.queue.drain(..)
    }
}
