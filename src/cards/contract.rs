//! The card contract.
//!
//! Every template implements [`CardBehavior`]. The engine dispatches only
//! through these hooks; it never asks which card it is holding. Every hook
//! has a default, so a plain card implements nothing at all and gets:
//!
//! - standalone composition (`filter` admits no tail)
//! - kind-driven legality and routing (`validate_play`, `play`)
//! - stat-driven effects (`preview`, `contact`)
//! - no condition hooks and no AI moves
//!
//! Hooks that mutate receive `&mut Engine` and may call back into the
//! engine (`contact`, `open_window`, `attach_condition`, ...). Those calls
//! nest; nothing is queued.

use crate::ai::Candidate;
use crate::cards::{Card, CardKind, CardUid};
use crate::conditions::ConditionRecord;
use crate::core::{PlayerId, Violation};
use crate::rules::Engine;

/// What a contact would do to its target, computed without touching state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preview {
    pub damage: i32,
    pub heal: i32,
    pub miss_turns: u32,
}

impl Preview {
    /// Rough badness of receiving this effect.
    #[must_use]
    pub fn threat(&self) -> f64 {
        f64::from(self.damage) + 2.0 * f64::from(self.miss_turns)
    }
}

/// The standard counter rule: a counter card, answering anything but an
/// unstoppable attack.
pub fn counter_eligibility(
    engine: &Engine,
    pending: &[Card],
    cards: &[Card],
) -> Result<(), Violation> {
    if cards.first().map(|c| c.kind) != Some(CardKind::Counter) {
        return Err(Violation::IneligibleCounter);
    }
    match engine.resolved_head(pending) {
        Some(head) if head.kind == CardKind::Unstoppable => Err(Violation::IneligibleCounter),
        _ => Ok(()),
    }
}

/// Capability interface implemented once per card variant.
pub trait CardBehavior: std::fmt::Debug + Send + Sync {
    /// Admissible prefix of the cards trailing this one.
    fn filter<'a>(&self, tail: &'a [Card]) -> &'a [Card] {
        &tail[..0]
    }

    /// Wrappers hand resolution to the card they carry.
    fn is_wrapper(&self) -> bool {
        false
    }

    /// Conditions of this card divert contacts aimed at their holder.
    fn redirects(&self) -> bool {
        false
    }

    /// Conditions of this card undo lethal damage.
    fn shields_lethal(&self) -> bool {
        false
    }

    fn validate_play(
        &self,
        engine: &Engine,
        player: PlayerId,
        target: Option<PlayerId>,
        cards: &[Card],
    ) -> Result<(), Violation> {
        let Some(head) = engine.resolved_head(cards) else {
            return Err(Violation::EmptyRequest);
        };
        let seated = |t: PlayerId| engine.game().is_seated(t);
        match head.kind {
            CardKind::Attack | CardKind::Unstoppable => match target {
                Some(t) if t != player && seated(t) => Ok(()),
                _ => Err(Violation::InvalidTarget),
            },
            CardKind::Support => match target {
                None => Ok(()),
                Some(t) if seated(t) => Ok(()),
                Some(_) => Err(Violation::InvalidTarget),
            },
            CardKind::Disaster if target.is_none() => Ok(()),
            CardKind::Disaster => Err(Violation::InvalidTarget),
            CardKind::Counter => Err(Violation::NotPlayable),
        }
    }

    fn validate_contact(
        &self,
        _engine: &Engine,
        _player: PlayerId,
        _target: PlayerId,
        _cards: &[Card],
    ) -> Result<(), Violation> {
        Ok(())
    }

    fn validate_counter(
        &self,
        engine: &Engine,
        _player: PlayerId,
        _attacker: PlayerId,
        pending: &[Card],
        cards: &[Card],
    ) -> Result<(), Violation> {
        counter_eligibility(engine, pending, cards)
    }

    /// Top-level handler for non-counter, non-disaster plays.
    ///
    /// Offensive cards open a counter window; supports resolve at once.
    fn play(
        &self,
        engine: &mut Engine,
        player: PlayerId,
        target: Option<PlayerId>,
        cards: &[Card],
    ) {
        let Some(head) = engine.resolved_head(cards) else {
            return;
        };
        match head.kind {
            CardKind::Attack | CardKind::Unstoppable => {
                if let Some(target) = target {
                    engine.open_window(player, target, cards);
                }
            }
            CardKind::Support => engine.contact(player, target.unwrap_or(player), cards, false),
            CardKind::Counter | CardKind::Disaster => {}
        }
    }

    /// Top-level handler for disaster cards. The card picks its own victims.
    fn disaster(&self, _engine: &mut Engine, _player: PlayerId, _cards: &[Card]) {}

    /// Top-level handler for counters. Doing nothing negates the pending attack.
    fn counter(
        &self,
        _engine: &mut Engine,
        _player: PlayerId,
        _attacker: PlayerId,
        _pending: &[Card],
        _cards: &[Card],
    ) {
    }

    /// Pure effect preview, shared by `contact` and the move generator.
    fn preview(
        &self,
        engine: &Engine,
        _attacker: PlayerId,
        _target: PlayerId,
        cards: &[Card],
    ) -> Preview {
        let Some(head) = cards.first() else {
            return Preview::default();
        };
        let stats = engine.stats(head.id);
        Preview {
            damage: stats.damage,
            heal: stats.heal,
            miss_turns: stats.miss_turns,
        }
    }

    /// Apply the effect to `target`. Returns the cards to retire right away.
    fn contact(
        &self,
        engine: &mut Engine,
        attacker: PlayerId,
        target: PlayerId,
        cards: &[Card],
    ) -> Vec<CardUid> {
        let preview = self.preview(engine, attacker, target, cards);
        if preview.damage > 0 {
            engine.damage(target, preview.damage);
        }
        if preview.heal > 0 {
            engine.heal(target, preview.heal);
        }
        cards.iter().map(|c| c.uid).collect()
    }

    /// Returning false aborts the pending contact.
    fn before_contact(
        &self,
        _engine: &mut Engine,
        _record: &ConditionRecord,
        _holder: PlayerId,
        _attacker: PlayerId,
        _cards: &[Card],
        _discarding: bool,
    ) -> bool {
        true
    }

    fn after_contact(
        &self,
        _engine: &mut Engine,
        _record: &ConditionRecord,
        _holder: PlayerId,
        _attacker: PlayerId,
        _cards: &[Card],
    ) {
    }

    /// Returning false skips the holder's turn.
    fn before_turn(
        &self,
        _engine: &mut Engine,
        _record: &ConditionRecord,
        _holder: PlayerId,
    ) -> bool {
        true
    }

    fn valid_plays(&self, _engine: &Engine, _player: PlayerId, _card: &Card) -> Vec<Candidate> {
        Vec::new()
    }

    fn valid_counters(
        &self,
        _engine: &Engine,
        _player: PlayerId,
        _attacker: PlayerId,
        _pending: &[Card],
        _card: &Card,
    ) -> Vec<Candidate> {
        Vec::new()
    }

    fn valid_disasters(&self, _engine: &Engine, _player: PlayerId, _card: &Card) -> Vec<Candidate> {
        Vec::new()
    }
}
