//! Decision policies.
//!
//! A policy reacts to the two prompts the engine raises for a player (an
//! attack aimed at it, and the start of its turn) and answers only through
//! the public operations `play`, `pass` and `discard`.

use tracing::debug;

use super::moves::{MoveGenerator, Situation};
use crate::cards::CardId;
use crate::core::{BotThresholds, EngineError, PlayerId};
use crate::rules::Engine;

/// Reactive decision-maker for one seat.
pub trait Policy: Send {
    /// An attack on `me` is waiting for a counter or a pass.
    fn on_attack(&mut self, engine: &mut Engine, me: PlayerId) -> Result<(), EngineError>;

    /// It is `me`'s turn.
    fn on_turn(&mut self, engine: &mut Engine, me: PlayerId) -> Result<(), EngineError>;
}

/// Threshold bot over the weighted move generator.
///
/// - attacked: counter with the best move if it weighs at least
///   `thresholds.counter`, else pass
/// - own turn: play disasters while the best one weighs more than
///   `thresholds.disaster`, then the best ordinary move if it weighs at
///   least `thresholds.play`, else discard the whole hand
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicBot {
    pub thresholds: BotThresholds,
}

impl HeuristicBot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: BotThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

impl Policy for HeuristicBot {
    fn on_attack(&mut self, engine: &mut Engine, me: PlayerId) -> Result<(), EngineError> {
        let best = MoveGenerator::new(engine).best(me, Situation::Counter);
        match best {
            Some(m) if m.weight >= self.thresholds.counter => {
                debug!(player = %me, cards = ?m.cards, weight = m.weight, "bot counters");
                engine.play(me, &m.cards, m.target)?;
            }
            _ => {
                debug!(player = %me, "bot passes");
                engine.pass(me)?;
            }
        }
        Ok(())
    }

    fn on_turn(&mut self, engine: &mut Engine, me: PlayerId) -> Result<(), EngineError> {
        // Disasters keep the turn, so look again after each one.
        loop {
            if engine.is_stopped() || engine.current_player() != Some(me) {
                return Ok(());
            }
            let best = MoveGenerator::new(engine).best(me, Situation::Disaster);
            match best {
                Some(m) if m.weight > self.thresholds.disaster => {
                    debug!(player = %me, cards = ?m.cards, weight = m.weight, "bot plays disaster");
                    if !engine.play(me, &m.cards, m.target)?.is_accepted() {
                        break;
                    }
                }
                _ => break,
            }
        }
        if engine.is_stopped()
            || engine.current_player() != Some(me)
            || engine.exchange().pending().is_some()
        {
            return Ok(());
        }

        let best = MoveGenerator::new(engine).best(me, Situation::Turn);
        match best {
            Some(m) if m.weight >= self.thresholds.play => {
                debug!(
                    player = %me,
                    cards = ?m.cards,
                    target = ?m.target,
                    weight = m.weight,
                    "bot plays"
                );
                engine.play(me, &m.cards, m.target)?;
            }
            _ => {
                let hand: Vec<CardId> = engine
                    .player(me)
                    .map(|p| p.hand.iter().map(|c| c.id).collect())
                    .unwrap_or_default();
                debug!(player = %me, cards = hand.len(), "bot discards hand");
                engine.discard(me, &hand)?;
            }
        }
        Ok(())
    }
}
