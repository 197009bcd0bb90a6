//! Support behaviours. Supports resolve at once, on the player by default.

use super::POISON;
use crate::ai::{weights, Candidate};
use crate::cards::{Card, CardBehavior, CardUid};
use crate::conditions::{ConditionRecord, HookPhase};
use crate::core::{PlayerId, Violation};
use crate::events::Event;
use crate::rules::Engine;

fn uids(cards: &[Card]) -> Vec<CardUid> {
    cards.iter().map(|c| c.uid).collect()
}

/// Heals by the card's heal stat.
#[derive(Debug)]
pub struct Potion;

impl CardBehavior for Potion {
    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        let Some(me) = engine.player(player) else {
            return Vec::new();
        };
        let mut weight = f64::from(engine.stats(card.id).heal.min(me.missing_hp()));
        if engine.has_condition(player, POISON) {
            weight += 1.0;
        }
        vec![Candidate::single(card.id, None, weights::boomerang(engine, player, weight))]
    }
}

/// One extra turn.
#[derive(Debug)]
pub struct Haste;

impl CardBehavior for Haste {
    fn contact(
        &self,
        engine: &mut Engine,
        _attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Vec<CardUid> {
        engine.grant_extra_turn(target);
        uids(cards)
    }

    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        let hand = engine.player(player).map_or(0, |p| p.hand.len());
        let weight = 0.5 * hand as f64;
        vec![Candidate::single(card.id, None, weights::boomerang(engine, player, weight))]
    }
}

/// Diverts the next contact aimed at its holder to a random other player.
/// Forwarded contacts pass through untouched.
#[derive(Debug)]
pub struct Deflector;

impl CardBehavior for Deflector {
    fn redirects(&self) -> bool {
        true
    }

    fn validate_contact(
        &self,
        engine: &Engine,
        _player: PlayerId,
        target: PlayerId,
        _cards: &[Card],
    ) -> Result<(), Violation> {
        if weights::is_deflecting(engine, target) {
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
        let phases = [HookPhase::BeforeContact];
        match cards.first() {
            Some(&card) if engine.attach_condition(target, card, &phases, 0) => Vec::new(),
            _ => uids(cards),
        }
    }

    fn before_contact(
        &self,
        engine: &mut Engine,
        record: &ConditionRecord,
        holder: PlayerId,
        attacker: PlayerId,
        cards: &[Card],
        discarding: bool,
    ) -> bool {
        if discarding {
            return true;
        }
        let Some(victim) = engine.random_player(&[holder]) else {
            return true;
        };
        engine.retire_condition(holder, record.condition_id);
        engine.announce(Event::Redirected {
            from: holder,
            to: victim,
        });
        engine.contact(attacker, victim, cards, true);
        false
    }

    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        let weight = if weights::is_deflecting(engine, player) {
            0.0
        } else {
            1.5 + 0.5 * weights::opponents(engine, player).len() as f64
        };
        vec![Candidate::single(card.id, None, weight)]
    }
}

/// Forces the next attack onto the player.
#[derive(Debug)]
pub struct Taunt;

impl CardBehavior for Taunt {
    fn contact(
        &self,
        engine: &mut Engine,
        _attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Vec<CardUid> {
        engine.set_target_override(target);
        uids(cards)
    }

    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        let weight = if weights::is_insured(engine, player) { 3.0 } else { 0.5 };
        vec![Candidate::single(card.id, None, weights::boomerang(engine, player, weight))]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::catalogue::{standard_registry, DEFLECTOR, POKE, POTION, PUNCH, SLASH, TAUNT};
    use crate::core::GameConfig;

    const A: PlayerId = PlayerId::new(1);
    const B: PlayerId = PlayerId::new(2);
    const C: PlayerId = PlayerId::new(3);

    fn table(order: &[crate::cards::CardId]) -> Engine {
        let config = GameConfig::new().with_seed(21);
        let mut engine = Engine::new(Arc::new(standard_registry()), config).unwrap();
        for id in [A, B, C] {
            engine.join(id, format!("{}", id)).unwrap();
        }
        engine.start_stacked(order).unwrap();
        engine
    }

    #[test]
    fn test_potion_caps_at_max() {
        let mut engine = table(&[POTION, POKE, POKE, POKE, POKE]);
        engine.player_mut(A).unwrap().hp = 9;
        engine.play(A, &[POTION], None).unwrap();
        assert_eq!(engine.player(A).unwrap().hp, 10);
    }

    #[test]
    fn test_potion_on_someone_else() {
        let mut engine = table(&[POTION, POKE, POKE, POKE, POKE]);
        engine.player_mut(B).unwrap().hp = 4;
        engine.play(A, &[POTION], Some(B)).unwrap();
        assert_eq!(engine.player(B).unwrap().hp, 7);
    }

    #[test]
    fn test_taunt_forces_next_attack() {
        let order = [
            TAUNT, POKE, POKE, POKE, POKE, // A
            PUNCH, SLASH, SLASH, SLASH, SLASH, // B
        ];
        let mut engine = table(&order);
        engine.play(A, &[TAUNT], None).unwrap();
        assert_eq!(engine.game().target, Some(A));

        engine.play(B, &[PUNCH], Some(C)).unwrap();
        let pending = engine.exchange().pending().unwrap();
        assert_eq!(pending.target, A);
        assert_eq!(engine.game().target, None);

        engine.pass(A).unwrap();
        assert_eq!(engine.player(A).unwrap().hp, 8);
        assert_eq!(engine.player(C).unwrap().hp, 10);
    }

    #[test]
    fn test_deflector_ignores_forwarded_contacts() {
        let mut engine = table(&[DEFLECTOR, POKE, POKE, POKE, POKE, PUNCH]);
        engine.play(A, &[DEFLECTOR], None).unwrap();

        let punch = engine.player_mut(B).unwrap().hand.remove(0);
        assert_eq!(punch.id, PUNCH);
        engine.player_mut(B).unwrap().discard.push(punch);
        engine.contact(B, A, &[punch], true);

        assert_eq!(engine.player(A).unwrap().hp, 8);
        assert!(weights::is_deflecting(&engine, A));
        assert_eq!(engine.game().card_count(), engine.total_cards());
    }

    #[test]
    fn test_second_deflector_rejected() {
        let mut engine = table(&[DEFLECTOR, DEFLECTOR, POKE, POKE, POKE]);
        engine.play(A, &[DEFLECTOR], None).unwrap();
        // Back round to A.
        for id in [B, C] {
            let card = engine.player(id).unwrap().hand[0].id;
            engine.discard(id, &[card]).unwrap();
        }
        let verdict = engine.play(A, &[DEFLECTOR], None).unwrap();
        assert_eq!(verdict.violation(), Some(Violation::InvalidTarget));
    }

    #[test]
    fn test_taunt_not_wanted_while_deflecting() {
        let mut engine = table(&[DEFLECTOR, TAUNT, POKE, POKE, POKE]);
        let taunt = engine.player(A).unwrap().hand[1];
        assert_eq!(Taunt.valid_plays(&engine, A, &taunt)[0].weight, 0.5);

        engine.play(A, &[DEFLECTOR], None).unwrap();
        for id in [B, C] {
            let card = engine.player(id).unwrap().hand[0].id;
            engine.discard(id, &[card]).unwrap();
        }
        assert_eq!(engine.current_player(), Some(A));

        // The deflector would hand the override to someone else.
        let weight = Taunt.valid_plays(&engine, A, &taunt)[0].weight;
        assert!(weight < 0.0);
    }
}
