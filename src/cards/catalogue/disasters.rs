//! Disaster behaviours. Disasters pick their own victims and do not end
//! the turn.

use crate::ai::{weights, Candidate};
use crate::cards::{Card, CardBehavior};
use crate::core::PlayerId;
use crate::rules::Engine;

/// Damages every seated player, the caster included.
#[derive(Debug)]
pub struct Earthquake;

impl CardBehavior for Earthquake {
    fn disaster(&self, engine: &mut Engine, _player: PlayerId, cards: &[Card]) {
        let Some(card) = cards.first() else {
            return;
        };
        let damage = engine.stats(card.id).damage;
        let seated: Vec<PlayerId> = engine.game().players.iter().map(|p| p.id).collect();
        for id in seated {
            engine.damage(id, damage);
        }
    }

    fn valid_disasters(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        let damage = engine.stats(card.id).damage;
        let gain: f64 = weights::opponents(engine, player)
            .into_iter()
            .map(|t| f64::from(damage) + weights::lethal_bonus(engine, t, damage))
            .sum();
        let cost = f64::from(damage) + weights::lethal_bonus(engine, player, damage);
        vec![Candidate::single(card.id, None, gain - cost)]
    }
}

/// Strikes one random opponent through an ordinary contact.
#[derive(Debug)]
pub struct Lightning;

impl CardBehavior for Lightning {
    fn disaster(&self, engine: &mut Engine, player: PlayerId, cards: &[Card]) {
        if let Some(victim) = engine.random_player(&[player]) {
            engine.contact(player, victim, cards, false);
        }
    }

    fn valid_disasters(&self, engine: &Engine, player: PlayerId, card: &Card) -> Vec<Candidate> {
        let damage = engine.stats(card.id).damage;
        let others = weights::opponents(engine, player);
        if others.is_empty() {
            return Vec::new();
        }
        let total: f64 = others
            .iter()
            .map(|&t| {
                let hit = f64::from(damage) + weights::lethal_bonus(engine, t, damage);
                if weights::is_deflecting(engine, t) {
                    -f64::from(damage)
                } else {
                    hit
                }
            })
            .sum();
        vec![Candidate::single(card.id, None, total / others.len() as f64)]
    }
}

/// Reverses the order of play behind the current player.
#[derive(Debug)]
pub struct Whirlwind;

impl CardBehavior for Whirlwind {
    fn disaster(&self, engine: &mut Engine, player: PlayerId, _cards: &[Card]) {
        engine.reverse_order(player);
    }

    fn valid_disasters(&self, engine: &Engine, _player: PlayerId, card: &Card) -> Vec<Candidate> {
        let weight = if engine.game().players.len() >= 3 { 1.0 } else { 0.0 };
        vec![Candidate::single(card.id, None, weight)]
    }
}
