//! Shared weighting helpers for the card hooks' move lists.
//!
//! Weights are comparable across cards: roughly "hit points of advantage".
//! Situational terms stack on a card's base value:
//!
//! - a lethality bonus worth the target's `max_hp` when the move would drop
//!   it below 1 hp and nothing shields it
//! - a penalty for attacking a player whose condition redirects contacts
//! - a sign flip for self-targeted benefits that would be redirected away
//! - scaling by missing health, hand size or player count where a card
//!   calls for it

use smallvec::smallvec;

use super::Candidate;
use crate::cards::{Card, CardBehavior, CardId, CardKind, Preview};
use crate::core::PlayerId;
use crate::rules::Engine;

/// Share of its weight an attack keeps when aimed at a redirecting player.
const DEFLECTED_SHARE: f64 = 0.25;

/// Seated players other than `player`, in turn order.
#[must_use]
pub fn opponents(engine: &Engine, player: PlayerId) -> Vec<PlayerId> {
    engine.game().others(player).map(|p| p.id).collect()
}

/// Does `player` carry a condition that undoes lethal damage?
#[must_use]
pub fn is_insured(engine: &Engine, player: PlayerId) -> bool {
    engine.has_condition_where(player, |b| b.shields_lethal())
}

/// Does `player` carry a condition that diverts contacts?
#[must_use]
pub fn is_deflecting(engine: &Engine, player: PlayerId) -> bool {
    engine.has_condition_where(player, |b| b.redirects())
}

/// `max_hp` if `damage` would take `target` below 1 hp, else zero.
#[must_use]
pub fn lethal_bonus(engine: &Engine, target: PlayerId, damage: i32) -> f64 {
    match engine.player(target) {
        Some(p) if damage > 0 && p.hp - damage < 1 && !is_insured(engine, target) => {
            f64::from(p.max_hp)
        }
        _ => 0.0,
    }
}

/// Attacks on a redirecting player mostly land somewhere else.
#[must_use]
pub fn deflected(engine: &Engine, target: PlayerId, weight: f64) -> f64 {
    if is_deflecting(engine, target) {
        weight * DEFLECTED_SHARE
    } else {
        weight
    }
}

/// A benefit aimed at a redirecting `holder` goes to somebody else.
#[must_use]
pub fn boomerang(engine: &Engine, holder: PlayerId, weight: f64) -> f64 {
    if is_deflecting(engine, holder) {
        -weight
    } else {
        weight
    }
}

/// What the pending cards would do to `defender` if it passed.
#[must_use]
pub fn incoming(
    engine: &Engine,
    defender: PlayerId,
    attacker: PlayerId,
    pending: &[Card],
) -> Preview {
    match pending.first() {
        Some(head) => engine.behavior(head.id).preview(engine, attacker, defender, pending),
        None => Preview::default(),
    }
}

/// Value of simply negating the pending attack.
#[must_use]
pub fn block(engine: &Engine, player: PlayerId, attacker: PlayerId, pending: &[Card]) -> f64 {
    let incoming = incoming(engine, player, attacker, pending);
    incoming.threat() - 0.5 + lethal_bonus(engine, player, incoming.damage)
}

/// One candidate per opponent for a card whose effect `behavior` previews.
pub fn attack_moves(
    behavior: &dyn CardBehavior,
    engine: &Engine,
    player: PlayerId,
    card: &Card,
) -> Vec<Candidate> {
    opponents(engine, player)
        .into_iter()
        .map(|t| {
            let weight = attack_weight(behavior, engine, player, t, card);
            Candidate::single(card.id, Some(t), weight)
        })
        .collect()
}

fn attack_weight(
    behavior: &dyn CardBehavior,
    engine: &Engine,
    player: PlayerId,
    target: PlayerId,
    card: &Card,
) -> f64 {
    let preview = behavior.preview(engine, player, target, std::slice::from_ref(card));
    let missing = engine.player(target).map_or(0, |p| p.missing_hp());

    let mut weight = preview.threat()
        + lethal_bonus(engine, target, preview.damage)
        + 0.1 * f64::from(missing);
    if card.kind == CardKind::Unstoppable {
        weight += 0.5;
    }
    deflected(engine, target, weight)
}

/// Distinct hand cards other than the wrapper itself that it may carry.
fn carriable(
    engine: &Engine,
    player: PlayerId,
    wrapper: &Card,
    admit: impl Fn(CardKind) -> bool,
) -> Vec<Card> {
    let Some(me) = engine.player(player) else {
        return Vec::new();
    };
    let mut seen: Vec<CardId> = Vec::new();
    let mut out = Vec::new();
    for card in &me.hand {
        if card.uid == wrapper.uid || seen.contains(&card.id) || !admit(card.kind) {
            continue;
        }
        seen.push(card.id);
        // Never recurse into another wrapper's weighting.
        if engine.behavior(card.id).is_wrapper() {
            continue;
        }
        out.push(*card);
    }
    out
}

/// Wrapper moves on the holder's turn: whatever the carried card would be
/// worth alone, slightly discounted for spending two cards.
pub fn wrapped_plays(engine: &Engine, player: PlayerId, wrapper: &Card) -> Vec<Candidate> {
    carriable(engine, player, wrapper, CardKind::is_wrappable)
        .into_iter()
        .flat_map(|inner| {
            engine
                .behavior(inner.id)
                .valid_plays(engine, player, &inner)
                .into_iter()
                .filter(|c| c.cards.len() == 1)
                .map(move |c| {
                    Candidate::new(smallvec![wrapper.id, inner.id], c.target, c.weight - 0.5)
                })
        })
        .collect()
}

/// Wrapper counters: the incoming attack is negated and the carried attack
/// is sent back at the attacker.
pub fn wrapped_counters(
    engine: &Engine,
    player: PlayerId,
    attacker: PlayerId,
    pending: &[Card],
    wrapper: &Card,
) -> Vec<Candidate> {
    let negated = block(engine, player, attacker, pending);
    carriable(engine, player, wrapper, CardKind::is_offensive)
        .into_iter()
        .map(|inner| {
            let preview = engine
                .behavior(inner.id)
                .preview(engine, player, attacker, std::slice::from_ref(&inner));
            let weight =
                negated + preview.threat() + lethal_bonus(engine, attacker, preview.damage);
            Candidate::new(smallvec![wrapper.id, inner.id], Some(attacker), weight)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::catalogue::{
        standard_registry, DEFLECTOR, GRAB, INSURANCE, POKE, POTION, PUNCH, SLASH,
    };
    use crate::core::GameConfig;

    const A: PlayerId = PlayerId::new(1);
    const B: PlayerId = PlayerId::new(2);

    fn duel(order: &[CardId]) -> Engine {
        let config = GameConfig::new().with_seed(3);
        let mut engine = Engine::new(Arc::new(standard_registry()), config).unwrap();
        engine.join(A, "A").unwrap();
        engine.join(B, "B").unwrap();
        engine.start_stacked(order).unwrap();
        engine
    }

    fn card(engine: &Engine, player: PlayerId, id: CardId) -> Card {
        *engine.player(player).unwrap().hand.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn test_lethal_bonus() {
        let mut engine = duel(&[PUNCH, POKE, POKE, POKE, POKE]);
        assert_eq!(lethal_bonus(&engine, B, 2), 0.0);

        engine.player_mut(B).unwrap().hp = 2;
        assert_eq!(lethal_bonus(&engine, B, 2), 10.0);
        assert_eq!(lethal_bonus(&engine, B, 0), 0.0);
    }

    #[test]
    fn test_insurance_cancels_lethal_bonus() {
        let mut engine = duel(&[
            PUNCH, POKE, POKE, POKE, POKE, INSURANCE, SLASH, SLASH, SLASH, SLASH,
        ]);
        engine.discard(A, &[POKE]).unwrap();
        engine.play(B, &[INSURANCE], None).unwrap();
        engine.player_mut(B).unwrap().hp = 1;

        assert!(is_insured(&engine, B));
        assert_eq!(lethal_bonus(&engine, B, 5), 0.0);
    }

    #[test]
    fn test_attack_weights_scale_with_damage() {
        let engine = duel(&[PUNCH, POKE, POKE, POKE, POKE]);
        let punch = card(&engine, A, PUNCH);
        let poke = card(&engine, A, POKE);

        let punch_moves = engine.behavior(PUNCH).valid_plays(&engine, A, &punch);
        let poke_moves = engine.behavior(POKE).valid_plays(&engine, A, &poke);
        assert_eq!(punch_moves.len(), 1);
        assert_eq!(punch_moves[0].target, Some(B));
        assert_eq!(punch_moves[0].weight, 2.0);
        assert_eq!(poke_moves[0].weight, 1.0);
    }

    #[test]
    fn test_deflecting_target_penalised() {
        let mut engine = duel(&[
            PUNCH, POKE, POKE, POKE, POKE, DEFLECTOR, SLASH, SLASH, SLASH, SLASH,
        ]);
        engine.discard(A, &[POKE]).unwrap();
        engine.play(B, &[DEFLECTOR], None).unwrap();

        assert!(is_deflecting(&engine, B));
        assert_eq!(deflected(&engine, B, 4.0), 1.0);
        assert_eq!(boomerang(&engine, B, 3.0), -3.0);
        assert_eq!(boomerang(&engine, A, 3.0), 3.0);
    }

    #[test]
    fn test_wrapper_weights_follow_carried_card() {
        let engine = duel(&[GRAB, PUNCH, POTION, POKE, POKE]);
        let grab = card(&engine, A, GRAB);

        let moves = wrapped_plays(&engine, A, &grab);
        // Punch at B, Poke at B, Potion on self (worth nothing at full health).
        assert_eq!(moves.len(), 3);
        let punch = moves.iter().find(|m| m.cards.as_slice() == [GRAB, PUNCH]).unwrap();
        assert_eq!(punch.weight, 1.5);
        assert_eq!(punch.target, Some(B));
    }

    #[test]
    fn test_wrapper_ignores_other_wrappers() {
        let engine = duel(&[GRAB, GRAB, POKE, POKE, POKE]);
        let grab = card(&engine, A, GRAB);

        let moves = wrapped_plays(&engine, A, &grab);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].cards.as_slice(), &[GRAB, POKE]);
    }
}
