//! Card registry for definition and behaviour lookup.
//!
//! The `CardRegistry` pairs each [`CardDefinition`] with the
//! [`CardBehavior`] implementing its hooks. It is immutable once built
//! and shared between games behind an `Arc`.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::contract::CardBehavior;
use super::definition::{CardDefinition, CardId};
use super::instance::{Card, CardUid};
use crate::core::GameRng;

#[derive(Clone, Debug)]
struct Entry {
    definition: CardDefinition,
    behavior: Arc<dyn CardBehavior>,
}

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_brawl::cards::{CardRegistry, CardDefinition, CardId, CardKind};
/// use rust_brawl::cards::catalogue::Strike;
///
/// let mut registry = CardRegistry::new();
/// registry.register(
///     CardDefinition::new(CardId::new(1), "Jab", CardKind::Attack).with_damage(1),
///     Arc::new(Strike),
/// );
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Jab");
/// assert_eq!(registry.find_by_name("jab"), Some(CardId::new(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Entry>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template with its behaviour.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, definition: CardDefinition, behavior: Arc<dyn CardBehavior>) {
        if self.cards.contains_key(&definition.id) {
            panic!("Card with ID {:?} already registered", definition.id);
        }
        self.cards.insert(definition.id, Entry { definition, behavior });
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id).map(|e| &e.definition)
    }

    /// Get a card definition by ID, panicking if not found.
    ///
    /// Card instances only ever come from this registry, so engine code
    /// holding a [`Card`] may use this.
    #[must_use]
    pub fn get_unchecked(&self, id: CardId) -> &CardDefinition {
        &self.cards.get(&id).expect("Card not found in registry").definition
    }

    /// Get a card's behaviour by ID.
    #[must_use]
    pub fn behavior(&self, id: CardId) -> Option<Arc<dyn CardBehavior>> {
        self.cards.get(&id).map(|e| Arc::clone(&e.behavior))
    }

    /// Get a card's behaviour, panicking if not found.
    #[must_use]
    pub fn behavior_unchecked(&self, id: CardId) -> Arc<dyn CardBehavior> {
        Arc::clone(&self.cards.get(&id).expect("Card not found in registry").behavior)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Find a card by name, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CardId> {
        self.cards
            .values()
            .find(|e| e.definition.name.eq_ignore_ascii_case(name))
            .map(|e| e.definition.id)
    }

    /// Get the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        let mut defs: Vec<_> = self.cards.values().map(|e| &e.definition).collect();
        defs.sort_by_key(|d| d.id);
        defs.into_iter()
    }

    /// Size of the multiset one game is dealt from.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.cards.values().map(|e| e.definition.copies as usize).sum()
    }

    /// Create one instance per copy, in id order, numbering uids from 1.
    #[must_use]
    pub fn instantiate(&self) -> Vec<Card> {
        let mut next = 1u32;
        let mut cards = Vec::with_capacity(self.deck_size());
        for def in self.iter() {
            for _ in 0..def.copies {
                cards.push(Card::new(CardUid::new(next), def.id, def.kind));
                next += 1;
            }
        }
        cards
    }

    /// Instantiate and shuffle a fresh deck.
    #[must_use]
    pub fn shuffled_deck(&self, rng: &mut GameRng) -> Vec<Card> {
        let mut deck = self.instantiate();
        rng.shuffle(&mut deck);
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalogue::Strike;
    use crate::cards::CardKind;

    fn jab(id: u32) -> CardDefinition {
        CardDefinition::new(CardId::new(id), format!("Jab {}", id), CardKind::Attack).with_damage(1)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(jab(1), Arc::new(Strike));

        assert!(registry.get(CardId::new(1)).is_some());
        assert!(registry.behavior(CardId::new(1)).is_some());
        assert!(registry.get(CardId::new(99)).is_none());
        assert!(registry.contains(CardId::new(1)));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = CardRegistry::new();
        registry.register(jab(1), Arc::new(Strike));
        registry.register(jab(1), Arc::new(Strike));
    }

    #[test]
    fn test_instantiate_counts_copies() {
        let mut registry = CardRegistry::new();
        registry.register(jab(1).with_copies(3), Arc::new(Strike));
        registry.register(jab(2).with_copies(2), Arc::new(Strike));

        let cards = registry.instantiate();
        assert_eq!(cards.len(), 5);
        assert_eq!(registry.deck_size(), 5);

        let mut uids: Vec<_> = cards.iter().map(|c| c.uid).collect();
        uids.dedup();
        assert_eq!(uids.len(), 5);
    }

    #[test]
    fn test_shuffled_deck_deterministic() {
        let mut registry = CardRegistry::new();
        registry.register(jab(1).with_copies(10), Arc::new(Strike));
        registry.register(jab(2).with_copies(10), Arc::new(Strike));

        let a = registry.shuffled_deck(&mut GameRng::new(8));
        let b = registry.shuffled_deck(&mut GameRng::new(8));
        assert_eq!(a, b);
    }

    #[test]
    fn test_find_by_name() {
        let mut registry = CardRegistry::new();
        registry.register(jab(4), Arc::new(Strike));

        assert_eq!(registry.find_by_name("JAB 4"), Some(CardId::new(4)));
        assert_eq!(registry.find_by_name("hook"), None);
    }
}
