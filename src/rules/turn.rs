//! Turn advancement and dealing.
//!
//! `game.turn` counts turn advances: it stays 0 through the opening turn
//! and goes up by one every time a turn begins afterwards, skipped turns
//! included. It never goes down.

use tracing::{debug, trace};

use super::engine::Engine;
use super::exchange::Exchange;
use crate::cards::{ids_of, CardList};
use crate::core::PlayerId;
use crate::events::Event;

impl Engine {
    /// Hand the turn on.
    ///
    /// A head with unspent extra turns keeps the turn and spends one;
    /// otherwise the order rotates by one seat.
    pub fn increment_turn(&mut self) {
        if self.game.stopped {
            return;
        }
        let Some(head) = self.game.players.first_mut() else {
            return;
        };
        if head.extra_turns > 0 {
            head.extra_turns -= 1;
            let (player, remaining) = (head.id, head.extra_turns);
            self.events.announce(Event::ExtraTurn { player, remaining });
        } else {
            self.game.players.rotate_left(1);
        }
        self.begin_turn();
    }

    /// Open the head's turn: `before_turn` hooks, cleanup, refill.
    pub(super) fn begin_turn(&mut self) {
        if self.game.stopped {
            return;
        }
        self.exchange = Exchange::AwaitingPlay;
        self.game.turn += 1;

        let Some(head) = self.game.players.first_mut() else {
            return;
        };
        head.turns += 1;
        let head = head.id;
        trace!(player = %head, turn = self.game.turn, "turn begins");

        let proceed = self.fire_before_turn(head);
        self.cleanup();
        if self.game.stopped {
            return;
        }
        if self.current_player() != Some(head) {
            // Hooks took the head out of the game.
            self.begin_turn();
            return;
        }
        if !proceed {
            debug!(player = %head, "turn skipped");
            self.events.announce(Event::TurnSkipped { player: head });
            self.increment_turn();
            return;
        }

        let missing = self
            .game
            .player(head)
            .map_or(0, |p| self.config.hand_size.saturating_sub(p.hand.len()));
        self.deal(head, missing);
        self.events.announce(Event::TurnStarted {
            player: head,
            turn: self.game.turn,
        });
    }

    /// Draw up to `n` cards from the deck into `player`'s hand.
    ///
    /// Returns how many were drawn; fewer than `n` only when the deck and,
    /// under the reshuffle policy, the discard pile run out.
    pub fn deal(&mut self, player: PlayerId, n: usize) -> usize {
        if n == 0 || !self.game.is_seated(player) {
            return 0;
        }
        let policy = self.config.deck_policy;
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            match self.game.draw(policy, &mut self.rng) {
                Some(card) => drawn.push(card),
                None => break,
            }
        }

        let count = drawn.len();
        if count < n {
            debug!(%player, wanted = n, got = count, "short draw");
        }
        if count > 0 {
            let cards: CardList = ids_of(&drawn);
            if let Some(seat) = self.game.player_mut(player) {
                seat.hand.extend(drawn);
            }
            self.events.whisper(player, Event::CardsDrawn { cards });
        }
        count
    }
}
