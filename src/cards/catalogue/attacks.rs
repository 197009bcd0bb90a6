//! Attack behaviours.

use crate::ai::{weights, Candidate};
use crate::cards::{Card, CardBehavior, CardUid, Preview};
use crate::conditions::{ConditionRecord, HookPhase};
use crate::core::{PlayerId, Violation};
use crate::rules::Engine;

fn uids(cards: &[Card]) -> Vec<CardUid> {
    cards.iter().map(|c| c.uid).collect()
}

/// Plain damage from the card's stats. Also backs the unstoppable Sniper.
#[derive(Debug)]
pub struct Strike;

impl CardBehavior for Strike {
    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        weights::attack_moves(self, engine, player, card)
    }
}

/// Rolls between 1 and the card's damage stat.
#[derive(Debug)]
pub struct Dice;

impl Dice {
    fn top(engine: &Engine, cards: &[Card]) -> i32 {
        cards.first().map_or(1, |c| engine.stats(c.id).damage.max(1))
    }
}

impl CardBehavior for Dice {
    fn preview(
        &self,
        engine: &Engine,
        _attacker: PlayerId,
        _target: PlayerId,
        cards: &[Card],
    ) -> Preview {
        Preview {
            damage: (1 + Self::top(engine, cards)) / 2,
            ..Preview::default()
        }
    }

    fn contact(
        &self,
        engine: &mut Engine,
        _attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Vec<CardUid> {
        let top = Self::top(engine, cards);
        let roll = engine.rng_mut().gen_inclusive(1, top);
        engine.damage(target, roll);
        uids(cards)
    }

    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        weights::attack_moves(self, engine, player, card)
    }
}

/// Makes the target miss turns. The card stays attached until the last
/// missed turn has passed.
#[derive(Debug)]
pub struct Freeze;

fn is_frozen(engine: &Engine, target: PlayerId) -> bool {
    engine.player(target).map_or(false, |p| p.miss_turns > 0)
}

impl CardBehavior for Freeze {
    fn validate_contact(
        &self,
        engine: &Engine,
        _player: PlayerId,
        target: PlayerId,
        _cards: &[Card],
    ) -> Result<(), Violation> {
        if is_frozen(engine, target) {
            return Err(Violation::InvalidTarget);
        }
        Ok(())
    }

    fn contact(
        &self,
        engine: &mut Engine,
        _attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Vec<CardUid> {
        let Some(&card) = cards.first() else {
            return Vec::new();
        };
        if is_frozen(engine, target) {
            return uids(cards);
        }
        let turns = engine.stats(card.id).miss_turns;
        engine.add_miss_turns(target, turns);
        if engine.attach_condition(target, card, &[HookPhase::BeforeTurn], turns) {
            Vec::new()
        } else {
            uids(cards)
        }
    }

    fn before_turn(&self, engine: &mut Engine, record: &ConditionRecord, holder: PlayerId) -> bool {
        let left = engine.spend_miss_turn(holder);
        engine.tick_condition(holder, record.condition_id, record.phase);
        if left == 0 {
            engine.retire_condition(holder, record.condition_id);
        }
        false
    }

    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        let others = weights::opponents(engine, player);
        let base = 4.0 / others.len().max(1) as f64;
        others
            .into_iter()
            .filter(|&t| !is_frozen(engine, t))
            .map(|t| Candidate::single(card.id, Some(t), weights::deflected(engine, t, base)))
            .collect()
    }
}

/// Damage now and once per turn for a while. Healing washes it out.
#[derive(Debug)]
pub struct Poison;

impl CardBehavior for Poison {
    fn validate_contact(
        &self,
        engine: &Engine,
        _player: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Result<(), Violation> {
        match cards.first() {
            Some(card) if engine.has_condition(target, card.id) => Err(Violation::InvalidTarget),
            _ => Ok(()),
        }
    }

    fn contact(
        &self,
        engine: &mut Engine,
        _attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Vec<CardUid> {
        let Some(&card) = cards.first() else {
            return Vec::new();
        };
        let stats = engine.stats(card.id);
        engine.damage(target, stats.damage);
        if engine.has_condition(target, card.id) {
            return uids(cards);
        }
        let phases = [HookPhase::BeforeTurn, HookPhase::AfterContact];
        if engine.attach_condition(target, card, &phases, stats.duration) {
            Vec::new()
        } else {
            uids(cards)
        }
    }

    fn before_turn(&self, engine: &mut Engine, record: &ConditionRecord, holder: PlayerId) -> bool {
        engine.damage(holder, engine.stats(record.card).damage);
        if engine.tick_condition(holder, record.condition_id, record.phase) == 0 {
            engine.retire_condition(holder, record.condition_id);
        }
        true
    }

    fn after_contact(
        &self,
        engine: &mut Engine,
        record: &ConditionRecord,
        holder: PlayerId,
        _attacker: PlayerId,
        cards: &[Card],
    ) {
        let heals = engine
            .resolved_head(cards)
            .map_or(false, |head| engine.stats(head.id).heal > 0);
        if heals {
            engine.retire_condition(holder, record.condition_id);
        }
    }

    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        weights::opponents(engine, player)
            .into_iter()
            .filter(|&t| !engine.has_condition(t, card.id))
            .map(|t| Candidate::single(card.id, Some(t), weights::deflected(engine, t, 3.25)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::catalogue::{standard_registry, DICE, FREEZE, POISON, POKE, POTION, PUNCH};
    use crate::core::GameConfig;

    fn duel(order: &[crate::cards::CardId]) -> Engine {
        let config = GameConfig::new().with_seed(5);
        let mut engine = Engine::new(Arc::new(standard_registry()), config).unwrap();
        engine.join(PlayerId::new(1), "A").unwrap();
        engine.join(PlayerId::new(2), "B").unwrap();
        engine.start_stacked(order).unwrap();
        engine
    }

    #[test]
    fn test_dice_rolls_in_range() {
        let mut engine = duel(&[DICE, POKE, POKE, POKE, POKE]);
        engine.play(PlayerId::new(1), &[DICE], Some(PlayerId::new(2))).unwrap();
        engine.pass(PlayerId::new(2)).unwrap();

        let hp = engine.player(PlayerId::new(2)).unwrap().hp;
        assert!((4..=9).contains(&hp));
    }

    #[test]
    fn test_freeze_skips_one_turn() {
        let mut engine = duel(&[FREEZE, POKE, POKE, POKE, POKE]);
        let (a, b) = (PlayerId::new(1), PlayerId::new(2));

        engine.play(a, &[FREEZE], Some(b)).unwrap();
        engine.pass(b).unwrap();

        // B's turn is skipped straight back to A; the card surfaces only now.
        assert_eq!(engine.current_player(), Some(a));
        assert!(engine.player(b).unwrap().condition_cards.is_empty());
        assert_eq!(engine.player(b).unwrap().miss_turns, 0);
        assert_eq!(engine.game().discard_pile.len(), 1);
        assert_eq!(engine.game().turn, 2);
    }

    #[test]
    fn test_cannot_freeze_twice() {
        let mut engine = duel(&[FREEZE, POKE, POKE, POKE, POKE]);
        engine.player_mut(PlayerId::new(2)).unwrap().miss_turns = 1;

        let verdict = engine.play(PlayerId::new(1), &[FREEZE], Some(PlayerId::new(2))).unwrap();
        assert_eq!(verdict.violation(), Some(Violation::InvalidTarget));
    }

    #[test]
    fn test_poison_ticks_and_expires() {
        let mut engine = duel(&[POISON, POKE, POKE, POKE, POKE]);
        let (a, b) = (PlayerId::new(1), PlayerId::new(2));

        engine.play(a, &[POISON], Some(b)).unwrap();
        engine.pass(b).unwrap();
        // 1 on contact, 1 on B's first turn.
        assert_eq!(engine.player(b).unwrap().hp, 8);

        for _ in 0..4 {
            let current = engine.current_player().unwrap();
            let card = engine.player(current).unwrap().hand[0].id;
            engine.discard(current, &[card]).unwrap();
        }
        assert_eq!(engine.player(b).unwrap().hp, 6);
        assert!(!engine.has_condition(b, POISON));
        assert_eq!(engine.game().card_count(), engine.total_cards());
    }

    #[test]
    fn test_potion_washes_out_poison() {
        let mut engine = duel(&[
            POISON, POKE, POKE, POKE, POKE, POTION, PUNCH, PUNCH, PUNCH, PUNCH,
        ]);
        let (a, b) = (PlayerId::new(1), PlayerId::new(2));

        engine.play(a, &[POISON], Some(b)).unwrap();
        engine.pass(b).unwrap();
        assert!(engine.has_condition(b, POISON));

        engine.play(b, &[POTION], None).unwrap();
        assert!(!engine.has_condition(b, POISON));
        assert_eq!(engine.player(b).unwrap().hp, 10);
    }
}
