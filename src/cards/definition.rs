//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a template: its
//! kind, its numeric stats and how many copies go into a fresh deck.
//! Behaviour lives behind [`CardBehavior`](super::CardBehavior) and is
//! paired with the definition in the [`CardRegistry`](super::CardRegistry).

use serde::{Deserialize, Serialize};

/// Unique identifier for a card template.
///
/// This identifies the "type" of card (e.g. "Punch"), not a specific
/// copy in a game. Copies are told apart by [`CardUid`](super::CardUid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The fixed set of card kinds the engine understands.
///
/// The engine only looks at kinds where the rules require it: routing a
/// play to `disaster` vs `play`, deciding whether an action ends the turn,
/// and wrapper eligibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Attack,
    Counter,
    Support,
    Unstoppable,
    Disaster,
}

impl CardKind {
    /// Kinds that open a counter window against a target.
    #[must_use]
    pub const fn is_offensive(self) -> bool {
        matches!(self, CardKind::Attack | CardKind::Unstoppable)
    }

    /// Kinds a wrapper card may carry.
    #[must_use]
    pub const fn is_wrappable(self) -> bool {
        matches!(self, CardKind::Attack | CardKind::Unstoppable | CardKind::Support)
    }
}

/// Numeric stats of a template. Unused stats stay zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    pub damage: i32,
    pub heal: i32,
    pub miss_turns: u32,

    /// Turns a lingering condition stays attached.
    pub duration: u32,
}

impl CardStats {
    /// Does this card leave something attached to its target?
    #[must_use]
    pub const fn lingers(&self) -> bool {
        self.miss_turns > 0 || self.duration > 0
    }
}

/// Static card definition.
///
/// ```
/// use rust_brawl::cards::{CardDefinition, CardId, CardKind};
///
/// let punch = CardDefinition::new(CardId::new(2), "Punch", CardKind::Attack)
///     .with_damage(2)
///     .with_copies(8);
///
/// assert_eq!(punch.stats.damage, 2);
/// assert_eq!(punch.copies, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// Lookup name used by front ends.
    pub name: String,

    pub kind: CardKind,
    pub stats: CardStats,

    /// Copies shuffled into each new deck.
    pub copies: u32,
}

impl CardDefinition {
    /// Create a new card definition with zeroed stats and one copy.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            stats: CardStats::default(),
            copies: 1,
        }
    }

    #[must_use]
    pub fn with_damage(mut self, damage: i32) -> Self {
        self.stats.damage = damage;
        self
    }

    #[must_use]
    pub fn with_heal(mut self, heal: i32) -> Self {
        self.stats.heal = heal;
        self
    }

    #[must_use]
    pub fn with_miss_turns(mut self, turns: u32) -> Self {
        self.stats.miss_turns = turns;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, turns: u32) -> Self {
        self.stats.duration = turns;
        self
    }

    #[must_use]
    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = copies;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_kind_groups() {
        assert!(CardKind::Attack.is_offensive());
        assert!(CardKind::Unstoppable.is_offensive());
        assert!(!CardKind::Support.is_offensive());

        assert!(CardKind::Support.is_wrappable());
        assert!(!CardKind::Counter.is_wrappable());
        assert!(!CardKind::Disaster.is_wrappable());
    }

    #[test]
    fn test_lingering_stats() {
        let freeze =
            CardDefinition::new(CardId::new(1), "Freeze", CardKind::Attack).with_miss_turns(1);
        let punch = CardDefinition::new(CardId::new(2), "Punch", CardKind::Attack).with_damage(2);

        assert!(freeze.stats.lingers());
        assert!(!punch.stats.lingers());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&CardKind::Unstoppable).unwrap();
        assert_eq!(json, "\"unstoppable\"");
    }
}
