//! Exchange sub-automaton: counter windows, passing, countering.
//!
//! ```text
//! AwaitingPlay --play(attack)--> AwaitingCounterOrPass
//! AwaitingPlay --play(support/disaster)--> Resolving --> AwaitingPlay
//! AwaitingCounterOrPass --pass--> Resolving --> AwaitingPlay
//! AwaitingCounterOrPass --counter--> Resolving --> AwaitingPlay
//!                                             \-> AwaitingCounterOrPass
//! ```
//!
//! `Resolving` only exists while an operation is running. Whatever leaves
//! the engine in `Resolving` when the top-level hook returns gets finished
//! by [`Engine::finish_action`].

use smallvec::SmallVec;
use tracing::debug;

use super::engine::Engine;
use crate::cards::{ids_of, Card, CardId, CardSeq};
use crate::core::{EngineError, PlayerId, Verdict, Violation};
use crate::events::Event;

/// An attack waiting for its target to counter or pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingContact {
    pub attacker: PlayerId,
    pub target: PlayerId,
    pub cards: CardSeq,
}

/// Where the current exchange stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Exchange {
    #[default]
    AwaitingPlay,
    AwaitingCounterOrPass(PendingContact),
    Resolving,
}

impl Exchange {
    /// The open counter window, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingContact> {
        match self {
            Exchange::AwaitingCounterOrPass(pending) => Some(pending),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_resolving(&self) -> bool {
        matches!(self, Exchange::Resolving)
    }
}

impl Engine {
    /// Open a counter window for `target` against `cards`.
    ///
    /// A pending target override takes the place of `target` when the cards
    /// may legally reach the forced player. Otherwise it stays pending.
    pub fn open_window(&mut self, attacker: PlayerId, target: PlayerId, cards: &[Card]) {
        let target = self.take_target_override(attacker, cards).unwrap_or(target);
        self.exchange = Exchange::AwaitingCounterOrPass(PendingContact {
            attacker,
            target,
            cards: SmallVec::from_slice(cards),
        });
        self.events.announce(Event::AttackIncoming {
            attacker,
            target,
            cards: ids_of(cards),
        });
    }

    /// Consume the target override, unless it points at `attacker` or
    /// `cards` could not be played at the forced player.
    fn take_target_override(&mut self, attacker: PlayerId, cards: &[Card]) -> Option<PlayerId> {
        let forced = self
            .game
            .target
            .filter(|&t| t != attacker && self.game.is_seated(t))?;
        let head = cards.first()?;
        let verdict = self
            .behavior(head.id)
            .validate_contact(self, attacker, forced, cards);
        if let Err(violation) = verdict {
            debug!(%attacker, %forced, ?violation, "target override kept");
            return None;
        }
        self.game.target = None;
        debug!(%attacker, %forced, "target override consumed");
        self.events.announce(Event::TargetForced { player: forced });
        Some(forced)
    }

    /// Accept the pending attack unanswered.
    pub fn pass(&mut self, player: PlayerId) -> Result<Verdict, EngineError> {
        self.ensure_known(player, &[], None)?;
        if let Err(violation) = self.check_pass(player) {
            return Ok(self.reject(player, violation));
        }
        let Some(pending) = self.take_pending() else {
            return Ok(self.reject(player, Violation::NoPendingAttack));
        };

        self.events.announce(Event::Passed { player });
        self.contact(pending.attacker, pending.target, &pending.cards, false);
        if self.exchange.is_resolving() {
            self.finish_action(true);
        }
        Ok(Verdict::Accepted)
    }

    fn check_pass(&self, player: PlayerId) -> Result<(), Violation> {
        if self.game.stopped {
            return Err(Violation::GameStopped);
        }
        let pending = self.exchange.pending().ok_or(Violation::NoPendingAttack)?;
        if pending.target != player {
            return Err(Violation::NotTheTarget);
        }
        Ok(())
    }

    /// Answer the pending attack with counter cards. Reached through `play`.
    pub(super) fn counter(
        &mut self,
        player: PlayerId,
        request: &[CardId],
    ) -> Result<Verdict, EngineError> {
        let cards = match self.check_counter(player, request) {
            Ok(cards) => cards,
            Err(violation) => return Ok(self.reject(player, violation)),
        };
        let Some(pending) = self.take_pending() else {
            return Ok(self.reject(player, Violation::NoPendingAttack));
        };

        self.stage(player, &cards);
        self.events.announce(Event::Countered {
            player,
            attacker: pending.attacker,
            cards: ids_of(&cards),
        });

        let behavior = self.behavior(cards[0].id);
        behavior.counter(self, player, pending.attacker, &pending.cards, &cards);
        if self.exchange.is_resolving() {
            self.finish_action(true);
        }
        Ok(Verdict::Accepted)
    }

    /// Full legality check for a counter, without touching state.
    pub fn check_counter(
        &self,
        player: PlayerId,
        request: &[CardId],
    ) -> Result<CardSeq, Violation> {
        if self.game.stopped {
            return Err(Violation::GameStopped);
        }
        let pending = self.exchange.pending().ok_or(Violation::NoPendingAttack)?;
        if pending.target != player {
            return Err(Violation::NotTheTarget);
        }
        let cards = self.select_from_hand(player, request)?;
        self.check_composition(&cards)?;
        self.behavior(cards[0].id)
            .validate_counter(self, player, pending.attacker, &pending.cards, &cards)?;
        Ok(cards)
    }

    /// Close the open window, leaving the engine `Resolving`.
    fn take_pending(&mut self) -> Option<PendingContact> {
        match std::mem::replace(&mut self.exchange, Exchange::Resolving) {
            Exchange::AwaitingCounterOrPass(pending) => Some(pending),
            other => {
                self.exchange = other;
                None
            }
        }
    }

    /// Settle a finished action: retire staging, check eliminations, then
    /// advance the turn if the action consumed it.
    pub(super) fn finish_action(&mut self, ends_turn: bool) {
        self.exchange = Exchange::AwaitingPlay;
        let swept = self.game.sweep_staging();
        if swept > 0 {
            debug!(swept, "staging swept");
        }
        self.cleanup();
        if self.game.stopped {
            return;
        }

        let owner = self.turn_owner.take();
        if owner.is_some() && owner != self.current_player() {
            // The acting player is gone; the new head starts fresh.
            self.begin_turn();
        } else if ends_turn {
            self.increment_turn();
        }
    }
}
