//! Weighted move generation.
//!
//! The generator asks every distinct card in a hand for the moves it
//! exposes in the current situation, drops anything the engine would
//! reject, and ranks the rest by weight. Equal weights keep enumeration
//! order (hand order, then the card's own order), so ties are stable.

use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::cards::{CardId, CardList};
use crate::core::PlayerId;
use crate::rules::Engine;

/// One legal move with its heuristic weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub cards: CardList,
    pub target: Option<PlayerId>,
    pub weight: f64,
}

impl Candidate {
    #[must_use]
    pub fn new(cards: CardList, target: Option<PlayerId>, weight: f64) -> Self {
        Self { cards, target, weight }
    }

    /// A one-card move.
    #[must_use]
    pub fn single(card: CardId, target: Option<PlayerId>, weight: f64) -> Self {
        Self::new(smallvec![card], target, weight)
    }
}

/// What the player is being asked to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Situation {
    /// Answer the open counter window.
    Counter,
    /// Optional disaster before the ordinary move.
    Disaster,
    /// Ordinary move on the player's own turn.
    Turn,
}

/// Ranks the legal moves of one player against one engine state.
pub struct MoveGenerator<'a> {
    engine: &'a Engine,
}

impl<'a> MoveGenerator<'a> {
    #[must_use]
    pub fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Every legal move for `player`, heaviest first.
    #[must_use]
    pub fn candidates(&self, player: PlayerId, situation: Situation) -> Vec<Candidate> {
        let engine = self.engine;
        let Some(me) = engine.player(player) else {
            return Vec::new();
        };

        let mut seen: Vec<CardId> = Vec::new();
        let mut moves = Vec::new();
        for card in &me.hand {
            if seen.contains(&card.id) {
                continue;
            }
            seen.push(card.id);

            let behavior = engine.behavior(card.id);
            let exposed = match situation {
                Situation::Counter => match engine.exchange().pending() {
                    Some(p) if p.target == player => {
                        behavior.valid_counters(engine, player, p.attacker, &p.cards, card)
                    }
                    _ => Vec::new(),
                },
                Situation::Disaster => behavior.valid_disasters(engine, player, card),
                Situation::Turn => behavior.valid_plays(engine, player, card),
            };
            moves.extend(exposed.into_iter().filter(|c| self.is_legal(player, situation, c)));
        }

        // Vec::sort_by is stable.
        moves.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        moves
    }

    /// The heaviest legal move, if any.
    #[must_use]
    pub fn best(&self, player: PlayerId, situation: Situation) -> Option<Candidate> {
        self.candidates(player, situation).into_iter().next()
    }

    fn is_legal(&self, player: PlayerId, situation: Situation, candidate: &Candidate) -> bool {
        let legal = match situation {
            Situation::Counter => self.engine.check_counter(player, &candidate.cards).is_ok(),
            Situation::Disaster | Situation::Turn => self
                .engine
                .check_play(player, &candidate.cards, candidate.target)
                .is_ok(),
        };
        legal && !candidate.weight.is_nan()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::catalogue::{
        standard_registry, BLOCK, EARTHQUAKE, FREEZE, MIRROR, POKE, PUNCH, SLASH, SNIPER,
    };
    use crate::core::GameConfig;

    const A: PlayerId = PlayerId::new(1);
    const B: PlayerId = PlayerId::new(2);

    fn duel(order: &[CardId]) -> Engine {
        let config = GameConfig::new().with_seed(17);
        let mut engine = Engine::new(Arc::new(standard_registry()), config).unwrap();
        engine.join(A, "A").unwrap();
        engine.join(B, "B").unwrap();
        engine.start_stacked(order).unwrap();
        engine
    }

    #[test]
    fn test_turn_moves_ranked() {
        let engine = duel(&[POKE, SLASH, PUNCH, POKE, EARTHQUAKE]);
        let moves = MoveGenerator::new(&engine).candidates(A, Situation::Turn);

        let order: Vec<CardId> = moves.iter().map(|m| m.cards[0]).collect();
        assert_eq!(order, vec![SLASH, PUNCH, POKE]);
        assert!(moves.iter().all(|m| m.target == Some(B)));
    }

    #[test]
    fn test_disasters_listed_separately() {
        let engine = duel(&[POKE, SLASH, PUNCH, POKE, EARTHQUAKE]);
        let generator = MoveGenerator::new(&engine);

        let disasters = generator.candidates(A, Situation::Disaster);
        assert_eq!(disasters.len(), 1);
        assert_eq!(disasters[0].cards.as_slice(), &[EARTHQUAKE]);
        // One point to B, one to A.
        assert_eq!(disasters[0].weight, 0.0);
    }

    #[test]
    fn test_illegal_moves_dropped() {
        let mut engine = duel(&[FREEZE, POKE, POKE, POKE, POKE]);
        engine.player_mut(B).unwrap().miss_turns = 1;

        let moves = MoveGenerator::new(&engine).candidates(A, Situation::Turn);
        assert!(moves.iter().all(|m| m.cards[0] != FREEZE));
    }

    #[test]
    fn test_counter_moves() {
        let mut engine = duel(&[PUNCH, POKE, POKE, POKE, POKE, BLOCK, MIRROR, SLASH, SLASH, SLASH]);
        assert!(MoveGenerator::new(&engine).candidates(B, Situation::Counter).is_empty());

        engine.play(A, &[PUNCH], Some(B)).unwrap();
        let moves = MoveGenerator::new(&engine).candidates(B, Situation::Counter);
        let order: Vec<CardId> = moves.iter().map(|m| m.cards[0]).collect();
        // Mirror: 2 threat. Block: 2 - 0.5.
        assert_eq!(order, vec![MIRROR, BLOCK]);
        assert!(MoveGenerator::new(&engine).candidates(A, Situation::Counter).is_empty());
    }

    #[test]
    fn test_unstoppable_leaves_no_counters() {
        let mut engine = duel(&[
            SNIPER, POKE, POKE, POKE, POKE, BLOCK, MIRROR, SLASH, SLASH, SLASH,
        ]);
        engine.play(A, &[SNIPER], Some(B)).unwrap();

        let best = MoveGenerator::new(&engine).best(B, Situation::Counter);
        assert_eq!(best, None);
    }

    #[test]
    fn test_ties_keep_hand_order() {
        let engine = duel(&[PUNCH, POKE, POKE, POKE, PUNCH]);
        let moves = MoveGenerator::new(&engine).candidates(A, Situation::Turn);
        // Duplicate ids are enumerated once.
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].cards[0], PUNCH);
    }
}
