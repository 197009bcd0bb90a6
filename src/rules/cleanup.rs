//! Elimination, win detection and explicit removal.

use tracing::{debug, info};

use super::engine::Engine;
use super::exchange::Exchange;
use crate::conditions::HookPhase;
use crate::core::{Dropout, EngineError, Player, PlayerId};
use crate::events::Event;

impl Engine {
    /// Eliminate everybody below 1 hp, then check for a winner.
    ///
    /// Idempotent: a second call with nothing changed in between does
    /// nothing and announces nothing. Returns how many players fell.
    pub fn cleanup(&mut self) -> usize {
        let fallen: Vec<PlayerId> = self
            .game
            .players
            .iter()
            .filter(|p| p.hp < 1)
            .map(|p| p.id)
            .collect();
        for &id in &fallen {
            if let Some(pos) = self.game.position(id) {
                let mut player = self.game.players.remove(pos);
                self.flush_table_cards(&mut player);
                self.game.discard_pile.append(&mut player.hand);
                info!(player = %id, "eliminated");
                self.game.dropouts.push(Dropout {
                    player,
                    collected: Vec::new(),
                });
                self.events.announce(Event::Eliminated { player: id });
            }
        }

        if self.game.started && !self.game.stopped {
            match self.game.players.as_slice() {
                [survivor] => {
                    let player = survivor.id;
                    info!(%player, "game won");
                    self.stop();
                    self.events.announce(Event::Winner { player });
                }
                [] => {
                    info!("no survivors");
                    self.stop();
                    self.events.announce(Event::NoSurvivors);
                }
                _ => {}
            }
        }
        fallen.len()
    }

    fn stop(&mut self) {
        self.game.stopped = true;
        self.exchange = Exchange::AwaitingPlay;
        self.turn_owner = None;
    }

    /// Take a player out of the game outside elimination.
    ///
    /// Their hand leaves with them as the dropout's collected pile. Staged
    /// and attached cards go to the discard pile. A counter window involving
    /// them is cancelled, which ends the attacker's turn.
    ///
    /// Removing a player who already left or was eliminated does nothing.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), EngineError> {
        let Some(pos) = self.game.position(id) else {
            if self.game.dropout(id).is_some() {
                debug!(player = %id, "already out");
                return Ok(());
            }
            return Err(EngineError::UnknownPlayer(id));
        };
        if !self.game.started {
            self.game.players.remove(pos);
            return Ok(());
        }

        let cancelled = self
            .exchange
            .pending()
            .map_or(false, |p| p.attacker == id || p.target == id);
        if cancelled {
            self.exchange = Exchange::AwaitingPlay;
            self.game.sweep_staging();
        }

        let mut player = self.game.players.remove(pos);
        self.flush_table_cards(&mut player);
        let collected = std::mem::take(&mut player.hand);
        info!(player = %id, kept = collected.len(), "player left");
        self.game.dropouts.push(Dropout { player, collected });
        self.events.announce(Event::PlayerLeft { player: id });

        self.cleanup();
        if self.game.stopped {
            return Ok(());
        }
        if pos == 0 {
            self.turn_owner = None;
            self.begin_turn();
        } else if cancelled {
            self.turn_owner = None;
            self.increment_turn();
        }
        Ok(())
    }

    /// Move a departing player's staged and attached cards to the discard
    /// pile and forget their conditions.
    fn flush_table_cards(&mut self, player: &mut Player) {
        self.game.discard_pile.append(&mut player.discard);
        self.game.discard_pile.append(&mut player.condition_cards);
        for phase in HookPhase::ALL {
            player.queue_mut(phase).clear();
        }
        if self.game.target == Some(player.id) {
            self.game.target = None;
        }
    }
}
