//! Contact resolution and condition hooks.
//!
//! A contact runs in three steps against its target:
//!
//! 1. the target's `before_contact` queue, FIFO; the first hook returning
//!    false aborts the contact and no later hook runs
//! 2. the head card's `contact` hook; the cards it returns are retired
//! 3. the target's `after_contact` queue, FIFO
//!
//! Hooks fire over a snapshot of the queue taken when the phase starts.
//! A record retired by an earlier hook in the same pass is skipped.

use tracing::{debug, trace};

use super::engine::Engine;
use crate::cards::{ids_of, Card};
use crate::conditions::{ConditionRecord, HookPhase};
use crate::core::PlayerId;

impl Engine {
    /// Apply `cards` from `attacker` to `target`.
    ///
    /// `discarding` marks a forwarded application (a redirect, a reflection,
    /// a duplicate). Conditions that divert contacts leave those alone.
    pub fn contact(
        &mut self,
        attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
        discarding: bool,
    ) {
        if cards.is_empty() || !self.game.is_seated(target) {
            return;
        }
        debug!(%attacker, %target, cards = ?ids_of(cards), discarding, "contact");

        if !self.fire_before_contact(target, attacker, cards, discarding) {
            debug!(%target, "contact aborted by condition");
            return;
        }

        let behavior = self.behavior(cards[0].id);
        for uid in behavior.contact(self, attacker, target, cards) {
            if let Some(card) = self.game.unstage(uid) {
                self.game.discard_pile.push(card);
            }
        }

        for record in self.snapshot(target, HookPhase::AfterContact) {
            if !self.is_attached(target, &record) {
                continue;
            }
            trace!(holder = %target, card = %record.card, "after_contact");
            self.behavior(record.card)
                .after_contact(self, &record, target, attacker, cards);
        }
    }

    fn fire_before_contact(
        &mut self,
        holder: PlayerId,
        attacker: PlayerId,
        cards: &[Card],
        discarding: bool,
    ) -> bool {
        for record in self.snapshot(holder, HookPhase::BeforeContact) {
            if !self.is_attached(holder, &record) {
                continue;
            }
            trace!(%holder, card = %record.card, "before_contact");
            let behavior = self.behavior(record.card);
            if !behavior.before_contact(self, &record, holder, attacker, cards, discarding) {
                return false;
            }
        }
        true
    }

    /// Run every `before_turn` hook of `holder`. False if any asks to skip.
    pub(super) fn fire_before_turn(&mut self, holder: PlayerId) -> bool {
        let mut proceed = true;
        for record in self.snapshot(holder, HookPhase::BeforeTurn) {
            if !self.is_attached(holder, &record) {
                continue;
            }
            trace!(%holder, card = %record.card, remaining = record.remaining, "before_turn");
            let behavior = self.behavior(record.card);
            proceed &= behavior.before_turn(self, &record, holder);
        }
        proceed
    }

    pub(super) fn snapshot(&self, holder: PlayerId, phase: HookPhase) -> Vec<ConditionRecord> {
        self.game
            .player(holder)
            .map(|p| p.queue(phase).iter().copied().collect())
            .unwrap_or_default()
    }

    fn is_attached(&self, holder: PlayerId, record: &ConditionRecord) -> bool {
        self.game
            .player(holder)
            .map_or(false, |p| p.condition(record.phase, record.condition_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::cards::catalogue::{standard_registry, DEFLECTOR, POKE, POTION, PUNCH, SLASH};
    use crate::conditions::HookPhase;
    use crate::core::{GameConfig, PlayerId};
    use crate::rules::Engine;

    fn table(players: u64, order: &[crate::cards::CardId]) -> Engine {
        let config = GameConfig::new().with_seed(11);
        let mut engine = Engine::new(Arc::new(standard_registry()), config).unwrap();
        for id in 1..=players {
            engine.join(PlayerId::new(id), format!("P{}", id)).unwrap();
        }
        engine.start_stacked(order).unwrap();
        engine
    }

    #[test]
    fn test_contact_on_absent_target_is_ignored() {
        let mut engine = table(2, &[]);
        let card = engine.player(PlayerId::new(1)).unwrap().hand[0];
        engine.contact(PlayerId::new(1), PlayerId::new(7), &[card], false);
        assert_eq!(engine.player(PlayerId::new(1)).unwrap().hand.len(), 5);
    }

    #[test]
    fn test_support_heals_self_and_retires() {
        let mut engine = table(2, &[POTION, POKE, POKE, POKE, POKE]);
        engine.player_mut(PlayerId::new(1)).unwrap().hp = 5;

        engine.play(PlayerId::new(1), &[POTION], None).unwrap();
        assert_eq!(engine.player(PlayerId::new(1)).unwrap().hp, 8);
        assert_eq!(engine.game().discard_pile.len(), 1);
        assert_eq!(engine.current_player(), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_deflector_forwards_to_someone_else() {
        let order = [
            PUNCH, POKE, POKE, POKE, POKE, // P1
            DEFLECTOR, SLASH, SLASH, SLASH, SLASH, // P2
            POTION, POTION, POTION, POTION, POTION, // P3
        ];
        let mut engine = table(3, &order);
        let (p1, p2, p3) = (PlayerId::new(1), PlayerId::new(2), PlayerId::new(3));

        // Give P2 the turn and let them raise the deflector.
        engine.discard(p1, &[POKE]).unwrap();
        engine.play(p2, &[DEFLECTOR], None).unwrap();
        assert_eq!(engine.player(p2).unwrap().before_contact.len(), 1);

        engine.discard(p3, &[POTION]).unwrap();
        engine.play(p1, &[PUNCH], Some(p2)).unwrap();
        engine.pass(p2).unwrap();

        let p2_state = engine.player(p2).unwrap();
        assert_eq!(p2_state.hp, 10);
        assert!(p2_state.before_contact.is_empty());
        assert!(p2_state.condition_cards.is_empty());

        let hurt = [p1, p3]
            .iter()
            .filter(|id| engine.player(**id).unwrap().hp == 8)
            .count();
        assert_eq!(hurt, 1);
        assert_eq!(engine.game().card_count(), engine.total_cards());
        assert!(engine.snapshot(p2, HookPhase::BeforeContact).is_empty());
    }
}
