//! Runs bots against an engine.
//!
//! `BotDriver` owns one [`Policy`] per bot seat. `pump` drains the engine
//! outbox, hands each prompt (`AttackIncoming`, `TurnStarted`) to the bot it
//! addresses and repeats until nothing is left to answer. Seats without a
//! policy are left alone, so bots and humans can share a table.
//!
//! Drained events are dropped once routed unless recording is switched on
//! with [`BotDriver::with_recording`].

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::policy::{HeuristicBot, Policy};
use crate::core::{EngineError, PlayerId};
use crate::events::{Dispatch, Event};
use crate::rules::Engine;

/// Bot seats and, when recording, the events they have consumed.
#[derive(Default)]
pub struct BotDriver {
    bots: FxHashMap<PlayerId, Box<dyn Policy>>,
    backlog: VecDeque<Dispatch>,
    record: bool,
    seen: Vec<Dispatch>,
}

impl BotDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every drained event for [`BotDriver::take_seen`].
    #[must_use]
    pub fn with_recording(mut self) -> Self {
        self.record = true;
        self
    }

    /// Put a heuristic bot in `seat`.
    pub fn add_bot(&mut self, seat: PlayerId) {
        self.add_policy(seat, Box::new(HeuristicBot::new()));
    }

    pub fn add_policy(&mut self, seat: PlayerId, policy: Box<dyn Policy>) {
        self.bots.insert(seat, policy);
    }

    #[must_use]
    pub fn is_bot(&self, seat: PlayerId) -> bool {
        self.bots.contains_key(&seat)
    }

    /// Events drained from the engine since the last call. Always empty
    /// unless recording.
    pub fn take_seen(&mut self) -> Vec<Dispatch> {
        std::mem::take(&mut self.seen)
    }

    /// Answer prompts until the outbox is empty, the game stops or `budget`
    /// bot decisions have been made. Returns the number of decisions.
    ///
    /// Events not yet looked at when the budget runs out are kept for the
    /// next call.
    pub fn pump(&mut self, engine: &mut Engine, budget: usize) -> Result<usize, EngineError> {
        let mut steps = 0;
        while steps < budget && !engine.is_stopped() {
            self.backlog.extend(engine.drain_events());
            let Some(dispatch) = self.backlog.pop_front() else {
                break;
            };
            if self.route(engine, &dispatch.event)? {
                steps += 1;
            }
            if self.record {
                self.seen.push(dispatch);
            }
        }
        if engine.is_stopped() {
            let rest = self.backlog.drain(..).chain(engine.drain_events());
            if self.record {
                self.seen.extend(rest);
            } else {
                rest.for_each(drop);
            }
        }
        debug!(steps, stopped = engine.is_stopped(), "bots idle");
        Ok(steps)
    }

    /// Hand one event to the bot it prompts. Prompts the table has moved
    /// past are skipped.
    fn route(&mut self, engine: &mut Engine, event: &Event) -> Result<bool, EngineError> {
        match *event {
            Event::AttackIncoming { target, .. } => {
                let live = engine.exchange().pending().map(|p| p.target) == Some(target);
                match self.bots.get_mut(&target) {
                    Some(bot) if live => {
                        trace!(player = %target, "prompting counter");
                        bot.on_attack(engine, target)?;
                        Ok(true)
                    }
                    _ => Ok(false),
                }
            }
            Event::TurnStarted { player, .. } => {
                let live =
                engine.current_player() == Some(player) && engine.exchange().pending().is_none();
                match self.bots.get_mut(&player) {
                    Some(bot) if live => {
                        trace!(%player, "prompting turn");
                        bot.on_turn(engine, player)?;
                        Ok(true)
                    }
                    _ => Ok(false),
                }
            }
            _ => Ok(false),
        }
    }
}

impl std::fmt::Debug for BotDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut seats: Vec<_> = self.bots.keys().copied().collect();
        seats.sort_unstable();
        f.debug_struct("BotDriver")
            .field("seats", &seats)
            .field("record", &self.record)
            .finish()
    }
}
