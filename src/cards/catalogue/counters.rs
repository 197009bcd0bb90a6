//! Counter behaviours.
//!
//! A counter is played by the target of an open window instead of passing.
//! Doing nothing in `counter` negates the pending attack; its cards are
//! swept from the attacker's staging buffer once the exchange settles.

use crate::ai::{weights, Candidate};
use crate::cards::contract::counter_eligibility;
use crate::cards::{Card, CardBehavior, CardKind, CardUid, Preview};
use crate::conditions::{ConditionRecord, HookPhase};
use crate::core::{PlayerId, Violation};
use crate::events::Event;
use crate::rules::Engine;

/// Negates the incoming attack.
#[derive(Debug)]
pub struct Block;

impl CardBehavior for Block {
    fn valid_counters(
        &self,
        engine: &Engine,
        player: PlayerId,
        attacker: PlayerId,
        pending: &[Card],
        card: &Card,
    ) -> Vec<Candidate> {
        let weight = weights::block(engine, player, attacker, pending);
        vec![Candidate::single(card.id, None, weight)]
    }
}

/// Sends the incoming attack back at the attacker.
#[derive(Debug)]
pub struct Mirror;

impl CardBehavior for Mirror {
    fn counter(
        &self,
        engine: &mut Engine,
        player: PlayerId,
        attacker: PlayerId,
        pending: &[Card],
        _cards: &[Card],
    ) {
        engine.contact(player, attacker, pending, true);
    }

    fn valid_counters(
        &self,
        engine: &Engine,
        player: PlayerId,
        attacker: PlayerId,
        pending: &[Card],
        card: &Card,
    ) -> Vec<Candidate> {
        let incoming = weights::incoming(engine, player, attacker, pending);
        let weight = incoming.threat() + weights::lethal_bonus(engine, attacker, incoming.damage);
        vec![Candidate::single(card.id, None, weight)]
    }
}

/// Takes the hit and makes the attacker take it too.
#[derive(Debug)]
pub struct Spite;

impl CardBehavior for Spite {
    fn validate_counter(
        &self,
        engine: &Engine,
        _player: PlayerId,
        _attacker: PlayerId,
        pending: &[Card],
        cards: &[Card],
    ) -> Result<(), Violation> {
        counter_eligibility(engine, pending, cards)?;

        match engine.resolved_head(pending) {
            Some(head) if engine.stats(head.id).lingers() => Err(Violation::IneligibleCounter),
            _ => Ok(()),
        }
    }

    fn counter(
        &self,
        engine: &mut Engine,
        player: PlayerId,
        attacker: PlayerId,
        pending: &[Card],
        _cards: &[Card],
    ) {
        engine.contact(attacker, player, pending, false);
        engine.contact(player, attacker, pending, true);
    }

    fn valid_counters(
        &self,
        engine: &Engine,
        player: PlayerId,
        attacker: PlayerId,
        pending: &[Card],
        card: &Card,
    ) -> Vec<Candidate> {
        let incoming = weights::incoming(engine, player, attacker, pending);
        let weight = f64::from(incoming.damage)
            + weights::lethal_bonus(engine, attacker, incoming.damage)
            - weights::lethal_bonus(engine, player, incoming.damage);
        vec![Candidate::single(card.id, None, weight)]
    }
}

/// Survives one lethal hit at half health.
///
/// Attached as an after-contact condition, either from the hand on the
/// holder's own turn or as a counter, in which case the incoming attack
/// still lands. Insurance is the one counter allowed against unstoppable
/// attacks.
#[derive(Debug)]
pub struct Insurance;

impl CardBehavior for Insurance {
    fn shields_lethal(&self) -> bool {
        true
    }

    fn validate_play(
        &self,
        engine: &Engine,
        player: PlayerId,
        target: Option<PlayerId>,
        _cards: &[Card],
    ) -> Result<(), Violation> {
        if target.map_or(false, |t| t != player) {
            return Err(Violation::InvalidTarget);
        }
        if weights::is_insured(engine, player) {
            return Err(Violation::NotPlayable);
        }
        Ok(())
    }

    fn validate_counter(
        &self,
        engine: &Engine,
        player: PlayerId,
        _attacker: PlayerId,
        _pending: &[Card],
        cards: &[Card],
    ) -> Result<(), Violation> {
        if cards.len() != 1 || weights::is_insured(engine, player) {
            return Err(Violation::IneligibleCounter);
        }
        Ok(())
    }

    fn play(
        &self,
        engine: &mut Engine,
        player: PlayerId,
        _target: Option<PlayerId>,
        cards: &[Card],
    ) {
        engine.contact(player, player, cards, false);
    }

    fn contact(
        &self,
        engine: &mut Engine,
        _attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Vec<CardUid> {
        match cards.first() {
            Some(&card) if engine.attach_condition(target, card, &[HookPhase::AfterContact], 0) => {
                Vec::new()
            }
            _ => cards.iter().map(|c| c.uid).collect(),
        }
    }

    fn counter(
        &self,
        engine: &mut Engine,
        player: PlayerId,
        attacker: PlayerId,
        pending: &[Card],
        cards: &[Card],
    ) {
        if let Some(&card) = cards.first() {
            engine.attach_condition(player, card, &[HookPhase::AfterContact], 0);
        }
        engine.contact(attacker, player, pending, false);
    }

    fn after_contact(
        &self,
        engine: &mut Engine,
        record: &ConditionRecord,
        holder: PlayerId,
        _attacker: PlayerId,
        _cards: &[Card],
    ) {
        let Some(max_hp) = engine.player(holder).filter(|p| p.hp < 1).map(|p| p.max_hp) else {
            return;
        };
        let hp = max_hp / 2;
        engine.set_hp(holder, hp);
        engine.retire_condition(holder, record.condition_id);
        engine.announce(Event::InsurancePaid { player: holder, hp });
    }

    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        let Some(me) = engine.player(player) else {
            return Vec::new();
        };
        let weight = if weights::is_insured(engine, player) {
            0.0
        } else if me.hp <= me.max_hp / 2 {
            2.5
        } else {
            1.0
        };
        vec![Candidate::single(card.id, None, weights::boomerang(engine, player, weight))]
    }

    fn valid_counters(
        &self,
        engine: &Engine,
        player: PlayerId,
        attacker: PlayerId,
        pending: &[Card],
        card: &Card,
    ) -> Vec<Candidate> {
        let incoming = weights::incoming(engine, player, attacker, pending);
        let weight = match engine.player(player) {
            Some(me) if me.hp - incoming.damage < 1 => f64::from(me.max_hp),
            _ => 0.0,
        };
        vec![Candidate::single(card.id, None, weight)]
    }
}

/// Wrapper. On the holder's turn it carries one attack or support card and
/// resolves exactly like it. As a counter it carries an attack, negates the
/// incoming one and opens a new window against the attacker.
#[derive(Debug)]
pub struct Grab;

impl Grab {
    fn inner(cards: &[Card]) -> Option<&[Card]> {
        cards.get(1..).filter(|rest| !rest.is_empty())
    }
}

impl CardBehavior for Grab {
    fn filter<'a>(&self, tail: &'a [Card]) -> &'a [Card] {
        match tail.first() {
            Some(card) if card.kind.is_wrappable() => &tail[..1],
            _ => &tail[..0],
        }
    }

    fn is_wrapper(&self) -> bool {
        true
    }

    fn validate_play(
        &self,
        engine: &Engine,
        player: PlayerId,
        target: Option<PlayerId>,
        cards: &[Card],
    ) -> Result<(), Violation> {
        let inner = Self::inner(cards).ok_or(Violation::NotPlayable)?;
        engine.behavior(inner[0].id).validate_play(engine, player, target, inner)
    }

    fn validate_contact(
        &self,
        engine: &Engine,
        player: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Result<(), Violation> {
        match Self::inner(cards) {
            Some(inner) => engine
                .behavior(inner[0].id)
                .validate_contact(engine, player, target, inner),
            None => Ok(()),
        }
    }

    fn validate_counter(
        &self,
        engine: &Engine,
        player: PlayerId,
        attacker: PlayerId,
        pending: &[Card],
        cards: &[Card],
    ) -> Result<(), Violation> {
        let Some(inner) = Self::inner(cards) else {
            return Err(Violation::IneligibleCounter);
        };
        if !inner[0].kind.is_offensive() {
            return Err(Violation::IneligibleCounter);
        }
        if engine.resolved_head(pending).map(|c| c.kind) == Some(CardKind::Unstoppable) {
            return Err(Violation::IneligibleCounter);
        }
        engine
            .behavior(inner[0].id)
            .validate_contact(engine, player, attacker, inner)
            .map_err(|_| Violation::IneligibleCounter)
    }

    fn counter(
        &self,
        engine: &mut Engine,
        player: PlayerId,
        attacker: PlayerId,
        _pending: &[Card],
        cards: &[Card],
    ) {
        engine.open_window(player, attacker, cards);
    }

    fn preview(
        &self,
        engine: &Engine,
        attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Preview {
        match Self::inner(cards) {
            Some(inner) => engine.behavior(inner[0].id).preview(engine, attacker, target, inner),
            None => Preview::default(),
        }
    }

    fn contact(
        &self,
        engine: &mut Engine,
        attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Vec<CardUid> {
        let Some(inner) = Self::inner(cards) else {
            return cards.iter().map(|c| c.uid).collect();
        };
        let behavior = engine.behavior(inner[0].id);
        let mut retired = behavior.contact(engine, attacker, target, inner);
        retired.push(cards[0].uid);
        retired
    }

    fn valid_plays(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        weights::wrapped_plays(engine, player, card)
    }

    fn valid_counters(
        &self,
        engine: &Engine,
        player: PlayerId,
        attacker: PlayerId,
        pending: &[Card],
        card: &Card,
    ) -> Vec<Candidate> {
        weights::wrapped_counters(engine, player, attacker, pending, card)
    }
}
