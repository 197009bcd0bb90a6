//! The standard card set.
//!
//! Nineteen templates covering every mechanism the engine supports:
//! plain and random damage, delayed and lingering conditions, an
//! unstoppable attack, negating/reflecting/duplicating counters, lethal
//! protection, a wrapper, healing, extra turns, redirection, target
//! forcing and three disasters.
//!
//! Ids are stable; front ends may persist them.

mod attacks;
mod counters;
mod disasters;
mod supports;

use std::sync::Arc;

pub use attacks::{Dice, Freeze, Poison, Strike};
pub use counters::{Block, Grab, Insurance, Mirror, Spite};
pub use disasters::{Earthquake, Lightning, Whirlwind};
pub use supports::{Deflector, Haste, Potion, Taunt};

use super::{CardDefinition, CardId, CardKind, CardRegistry};

pub const POKE: CardId = CardId::new(1);
pub const PUNCH: CardId = CardId::new(2);
pub const SLASH: CardId = CardId::new(3);
pub const DICE: CardId = CardId::new(4);
pub const FREEZE: CardId = CardId::new(5);
pub const POISON: CardId = CardId::new(6);
pub const SNIPER: CardId = CardId::new(7);

pub const BLOCK: CardId = CardId::new(10);
pub const MIRROR: CardId = CardId::new(11);
pub const SPITE: CardId = CardId::new(12);
pub const INSURANCE: CardId = CardId::new(13);
pub const GRAB: CardId = CardId::new(14);

pub const POTION: CardId = CardId::new(20);
pub const HASTE: CardId = CardId::new(21);
pub const DEFLECTOR: CardId = CardId::new(22);
pub const TAUNT: CardId = CardId::new(23);

pub const EARTHQUAKE: CardId = CardId::new(30);
pub const LIGHTNING: CardId = CardId::new(31);
pub const WHIRLWIND: CardId = CardId::new(32);

/// Build the registry holding the standard set.
#[must_use]
pub fn standard_registry() -> CardRegistry {
    use CardKind::{Attack, Counter, Disaster, Support, Unstoppable};

    let mut registry = CardRegistry::new();
    let mut add = |def: CardDefinition, behavior: Arc<dyn super::CardBehavior>| {
        registry.register(def, behavior)
    };

    add(CardDefinition::new(POKE, "Poke", Attack).with_damage(1).with_copies(6), Arc::new(Strike));
    add(
        CardDefinition::new(PUNCH, "Punch", Attack).with_damage(2).with_copies(8),
        Arc::new(Strike),
    );
    add(
        CardDefinition::new(SLASH, "Slash", Attack).with_damage(3).with_copies(5),
        Arc::new(Strike),
    );
    add(CardDefinition::new(DICE, "Dice", Attack).with_damage(6).with_copies(4), Arc::new(Dice));
    add(
        CardDefinition::new(FREEZE, "Freeze", Attack).with_miss_turns(1).with_copies(4),
        Arc::new(Freeze),
    );
    add(
        CardDefinition::new(POISON, "Poison", Attack)
            .with_damage(1)
            .with_duration(3)
            .with_copies(3),
        Arc::new(Poison),
    );
    add(
        CardDefinition::new(SNIPER, "Sniper", Unstoppable).with_damage(3).with_copies(3),
        Arc::new(Strike),
    );

    add(CardDefinition::new(BLOCK, "Block", Counter).with_copies(5), Arc::new(Block));
    add(CardDefinition::new(MIRROR, "Mirror", Counter).with_copies(3), Arc::new(Mirror));
    add(CardDefinition::new(SPITE, "Spite", Counter).with_copies(2), Arc::new(Spite));
    add(CardDefinition::new(INSURANCE, "Insurance", Counter).with_copies(3), Arc::new(Insurance));
    add(CardDefinition::new(GRAB, "Grab", Counter).with_copies(4), Arc::new(Grab));

    add(
        CardDefinition::new(POTION, "Potion", Support).with_heal(3).with_copies(5),
        Arc::new(Potion),
    );
    add(CardDefinition::new(HASTE, "Haste", Support).with_copies(2), Arc::new(Haste));
    add(CardDefinition::new(DEFLECTOR, "Deflector", Support).with_copies(3), Arc::new(Deflector));
    add(CardDefinition::new(TAUNT, "Taunt", Support).with_copies(2), Arc::new(Taunt));

    add(
        CardDefinition::new(EARTHQUAKE, "Earthquake", Disaster).with_damage(1).with_copies(2),
        Arc::new(Earthquake),
    );
    add(
        CardDefinition::new(LIGHTNING, "Lightning", Disaster).with_damage(3).with_copies(2),
        Arc::new(Lightning),
    );
    add(CardDefinition::new(WHIRLWIND, "Whirlwind", Disaster).with_copies(1), Arc::new(Whirlwind));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = standard_registry();
        assert_eq!(registry.len(), 19);
        assert_eq!(registry.deck_size(), 67);
        assert_eq!(registry.find_by_name("sniper"), Some(SNIPER));
        assert_eq!(registry.get(SNIPER).unwrap().kind, CardKind::Unstoppable);
    }

    #[test]
    fn test_capabilities() {
        let registry = standard_registry();
        assert!(registry.behavior_unchecked(GRAB).is_wrapper());
        assert!(registry.behavior_unchecked(DEFLECTOR).redirects());
        assert!(registry.behavior_unchecked(INSURANCE).shields_lethal());
        assert!(!registry.behavior_unchecked(PUNCH).is_wrapper());
    }
}
