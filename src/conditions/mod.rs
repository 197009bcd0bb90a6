//! Condition records.
//!
//! A condition is a card attached to a player whose effect outlives the
//! action that played it. Instead of storing closures, each attachment is a
//! plain record naming the backing card and the phase it listens to. The
//! engine resolves records through the registry when the phase fires, so
//! attached conditions stay inspectable and serializable.
//!
//! ## Phases
//!
//! - `BeforeTurn`: fires when the holder's turn begins; may skip it
//! - `BeforeContact`: fires before a contact lands on the holder; may abort it
//! - `AfterContact`: fires after a contact has landed on the holder

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardUid};

/// Hook phase a condition record is queued under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPhase {
    BeforeTurn,
    BeforeContact,
    AfterContact,
}

impl HookPhase {
    /// Every phase, in the order hooks fire within one turn.
    pub const ALL: [HookPhase; 3] = [
        HookPhase::BeforeTurn,
        HookPhase::BeforeContact,
        HookPhase::AfterContact,
    ];
}

/// One attached condition bound to one hook queue.
///
/// A card attached under several phases gets one record per phase, all
/// sharing `condition_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    /// Instance backing the condition. Lives in the holder's condition cards.
    pub condition_id: CardUid,

    /// Template whose behaviour answers the hook.
    pub card: CardId,

    pub phase: HookPhase,

    /// Turns left before the condition expires. Zero for one-shot conditions.
    pub remaining: u32,
}

impl ConditionRecord {
    #[must_use]
    pub const fn new(
        condition_id: CardUid,
        card: CardId,
        phase: HookPhase,
        remaining: u32,
    ) -> Self {
        Self {
            condition_id,
            card,
            phase,
            remaining,
        }
    }
}
