//! Card instances - the physical copies moving between zones.
//!
//! A game creates every instance once, at start, from the registry's
//! multiset. Instances are never created or destroyed afterwards; they
//! only move between the deck, hands, staging buffers, condition cards,
//! the discard pile and dropouts' collected piles.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardId, CardKind};

/// Identifier of one physical copy within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardUid(pub u32);

impl CardUid {
    #[must_use]
    pub const fn new(uid: u32) -> Self {
        Self(uid)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A card copy in a game.
///
/// Carries its template's kind so composition checks can run without a
/// registry lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub uid: CardUid,
    pub id: CardId,
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub const fn new(uid: CardUid, id: CardId, kind: CardKind) -> Self {
        Self { uid, id, kind }
    }
}

/// Cards taking part in one action. Almost always one or two.
pub type CardSeq = SmallVec<[Card; 2]>;

/// Template ids of an action, as front ends name them.
pub type CardList = SmallVec<[CardId; 2]>;

/// Template ids of a card sequence.
#[must_use]
pub fn ids_of(cards: &[Card]) -> CardList {
    cards.iter().map(|c| c.id).collect()
}
