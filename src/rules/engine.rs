//! The resolution engine.
//!
//! `Engine` is the single authority over legality and mutation. Front ends
//! and bots call `play`, `pass` and `discard`; card hooks call back into the
//! helpers below (`contact`, `open_window`, `attach_condition`, `damage`,
//! ...). Every public operation checks legality in full before touching
//! anything, so a rejected request is a complete no-op.
//!
//! The operation set is spread over this module's siblings:
//! - `exchange`: counter windows, `pass`, countering
//! - `contact`: effect application and condition hooks
//! - `turn`: turn advancement and dealing
//! - `cleanup`: elimination, win detection, explicit removal

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, info};

use super::exchange::Exchange;
use crate::cards::{
    ids_of, Card, CardBehavior, CardId, CardKind, CardRegistry, CardSeq, CardStats, CardUid,
};
use crate::conditions::{ConditionRecord, HookPhase};
use crate::core::{EngineError, Game, GameConfig, GameRng, Player, PlayerId, Verdict, Violation};
use crate::events::{Dispatch, Event, EventLog};

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single survivor.
    Winner(PlayerId),
    /// Everybody fell at once.
    NoSurvivors,
}

/// One game table.
#[derive(Debug)]
pub struct Engine {
    pub(super) registry: Arc<CardRegistry>,
    pub(super) config: GameConfig,
    pub(super) game: Game,
    pub(super) exchange: Exchange,
    pub(super) rng: GameRng,
    pub(super) events: EventLog,

    /// Cards dealt into the game at start.
    pub(super) total_cards: usize,

    /// Player whose turn the running action belongs to.
    pub(super) turn_owner: Option<PlayerId>,
}

impl Engine {
    /// Create an empty table.
    pub fn new(registry: Arc<CardRegistry>, config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            rng: GameRng::new(config.seed),
            registry,
            config,
            game: Game::new(),
            exchange: Exchange::default(),
            events: EventLog::new(),
            total_cards: 0,
            turn_owner: None,
        })
    }

    /// Seat a player. Join order is turn order.
    pub fn join(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), EngineError> {
        if self.game.started {
            return Err(EngineError::AlreadyStarted);
        }
        if self.game.is_seated(id) {
            return Err(EngineError::DuplicatePlayer(id));
        }
        if self.game.players.len() >= self.config.max_players {
            return Err(EngineError::TableFull(self.config.max_players));
        }
        self.game.players.push(Player::new(id, name, self.config.max_hp));
        Ok(())
    }

    /// Shuffle a fresh deck, deal and open the first turn.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.ensure_startable()?;
        let deck = self.registry.shuffled_deck(&mut self.rng);
        self.launch(deck);
        Ok(())
    }

    /// Start with `order` on top of the deck, first element drawn first.
    ///
    /// Each player draws a full hand in join order, so with five-card hands
    /// `order[0..5]` goes to the first player, `order[5..10]` to the second.
    /// The rest of the deck is shuffled underneath.
    pub fn start_stacked(&mut self, order: &[CardId]) -> Result<(), EngineError> {
        self.ensure_startable()?;
        let mut pool = self.registry.instantiate();
        let mut top = Vec::with_capacity(order.len());
        for &id in order {
            if !self.registry.contains(id) {
                return Err(EngineError::UnknownCard(id));
            }
            let pos = pool
                .iter()
                .position(|c| c.id == id)
                .ok_or(EngineError::NotEnoughCopies(id))?;
            top.push(pool.remove(pos));
        }
        self.rng.shuffle(&mut pool);
        pool.extend(top.into_iter().rev());
        self.launch(pool);
        Ok(())
    }

    fn ensure_startable(&self) -> Result<(), EngineError> {
        if self.game.started {
            return Err(EngineError::AlreadyStarted);
        }
        if self.game.players.len() < 2 {
            return Err(EngineError::NotEnoughPlayers(self.game.players.len()));
        }
        Ok(())
    }

    fn launch(&mut self, deck: Vec<Card>) {
        self.total_cards = deck.len();
        self.game.deck = deck;
        self.game.started = true;

        let seats: Vec<PlayerId> = self.game.players.iter().map(|p| p.id).collect();
        info!(
            players = seats.len(),
            cards = self.total_cards,
            seed = self.rng.seed(),
            "game started"
        );
        self.events.announce(Event::GameStarted { players: seats.clone() });
        for &id in &seats {
            self.deal(id, self.config.hand_size);
        }

        if let Some(head) = self.game.players.first_mut() {
            head.turns += 1;
            let player = head.id;
            self.events.announce(Event::TurnStarted {
                player,
                turn: self.game.turn,
            });
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.game.player(id)
    }

    /// Direct access for scenario setup. Bypasses every rule.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.game.player_mut(id)
    }

    #[must_use]
    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.game.current().map(|p| p.id)
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.game.stopped
    }

    /// How the game ended, once it has.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.game.stopped {
            return None;
        }
        Some(match self.game.players.first() {
            Some(p) => GameResult::Winner(p.id),
            None => GameResult::NoSurvivors,
        })
    }

    /// Events not yet handed out.
    #[must_use]
    pub fn pending_events(&self) -> &[Dispatch] {
        self.events.pending()
    }

    /// Hand out every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<Dispatch> {
        self.events.drain().collect()
    }

    #[must_use]
    pub fn stats(&self, id: CardId) -> CardStats {
        self.registry.get_unchecked(id).stats
    }

    #[must_use]
    pub fn behavior(&self, id: CardId) -> Arc<dyn CardBehavior> {
        self.registry.behavior_unchecked(id)
    }

    /// The card that decides how a sequence resolves: the first card that
    /// is not a wrapper, or the last card.
    #[must_use]
    pub fn resolved_head(&self, cards: &[Card]) -> Option<Card> {
        let mut rest = cards;
        while let Some((head, tail)) = rest.split_first() {
            if tail.is_empty() || !self.behavior(head.id).is_wrapper() {
                return Some(*head);
            }
            rest = tail;
        }
        None
    }

    // ------------------------------------------------------------------
    // Player operations
    // ------------------------------------------------------------------

    /// Play cards on the caller's turn, or counter while a window is open.
    pub fn play(
        &mut self,
        player: PlayerId,
        request: &[CardId],
        target: Option<PlayerId>,
    ) -> Result<Verdict, EngineError> {
        self.ensure_known(player, request, target)?;
        if self.exchange.pending().is_some() {
            return self.counter(player, request);
        }
        match self.check_play(player, request, target) {
            Ok(cards) => {
                self.commit_play(player, cards, target);
                Ok(Verdict::Accepted)
            }
            Err(violation) => Ok(self.reject(player, violation)),
        }
    }

    /// Full legality check for a play, without touching state.
    pub fn check_play(
        &self,
        player: PlayerId,
        request: &[CardId],
        target: Option<PlayerId>,
    ) -> Result<CardSeq, Violation> {
        self.check_own_turn(player)?;
        let cards = self.select_from_hand(player, request)?;
        self.check_composition(&cards)?;

        let behavior = self.behavior(cards[0].id);
        behavior.validate_play(self, player, target, &cards)?;
        if cards[0].kind != CardKind::Disaster {
            behavior.validate_contact(self, player, target.unwrap_or(player), &cards)?;
        }
        Ok(cards)
    }

    fn commit_play(&mut self, player: PlayerId, cards: CardSeq, target: Option<PlayerId>) {
        self.stage(player, &cards);
        self.turn_owner = Some(player);
        self.exchange = Exchange::Resolving;
        self.events.announce(Event::CardPlayed {
            player,
            cards: ids_of(&cards),
            target,
        });

        let head = cards[0];
        let behavior = self.behavior(head.id);
        if head.kind == CardKind::Disaster {
            behavior.disaster(self, player, &cards);
        } else {
            behavior.play(self, player, target, &cards);
        }
        if self.exchange.is_resolving() {
            self.finish_action(head.kind != CardKind::Disaster);
        }
    }

    /// Throw cards away and end the turn.
    ///
    /// An empty request is only accepted from an empty hand.
    pub fn discard(
        &mut self,
        player: PlayerId,
        request: &[CardId],
    ) -> Result<Verdict, EngineError> {
        self.ensure_known(player, request, None)?;
        let cards = match self.check_discard(player, request) {
            Ok(cards) => cards,
            Err(violation) => return Ok(self.reject(player, violation)),
        };

        if let Some(seat) = self.game.player_mut(player) {
            seat.hand.retain(|c| !cards.iter().any(|d| d.uid == c.uid));
        }
        self.game.discard_pile.extend(cards.iter().copied());
        self.events.announce(Event::Discarded {
            player,
            count: cards.len(),
        });
        self.turn_owner = None;
        self.increment_turn();
        Ok(Verdict::Accepted)
    }

    fn check_discard(&self, player: PlayerId, request: &[CardId]) -> Result<CardSeq, Violation> {
        self.check_own_turn(player)?;
        if request.is_empty() {
            let empty_hand = self.game.player(player).map_or(true, |p| p.hand.is_empty());
            return if empty_hand {
                Ok(CardSeq::new())
            } else {
                Err(Violation::EmptyRequest)
            };
        }
        self.select_from_hand(player, request)
    }

    fn check_own_turn(&self, player: PlayerId) -> Result<(), Violation> {
        if self.game.stopped {
            return Err(Violation::GameStopped);
        }
        if !matches!(self.exchange, Exchange::AwaitingPlay) {
            return Err(Violation::WindowOpen);
        }
        if self.current_player() != Some(player) {
            return Err(Violation::NotYourTurn);
        }
        Ok(())
    }

    /// Pick the first unused hand instance for each requested id.
    pub(super) fn select_from_hand(
        &self,
        player: PlayerId,
        request: &[CardId],
    ) -> Result<CardSeq, Violation> {
        if request.is_empty() {
            return Err(Violation::EmptyRequest);
        }
        let hand = &self.game.player(player).ok_or(Violation::NotYourTurn)?.hand;
        let mut taken: SmallVec<[usize; 4]> = SmallVec::new();
        let mut cards = CardSeq::new();
        for &id in request {
            let pos = (0..hand.len())
                .find(|i| hand[*i].id == id && !taken.contains(i))
                .ok_or(Violation::CardsNotInHand)?;
            taken.push(pos);
            cards.push(hand[pos]);
        }
        Ok(cards)
    }

    /// Apply each head card's `filter` to its tail, recursively.
    pub fn check_composition(&self, cards: &[Card]) -> Result<(), Violation> {
        let Some((head, tail)) = cards.split_first() else {
            return Err(Violation::EmptyRequest);
        };
        if tail.is_empty() {
            return Ok(());
        }
        if self.behavior(head.id).filter(tail).len() != tail.len() {
            return Err(Violation::IllegalCombination);
        }
        self.check_composition(tail)
    }

    pub(super) fn ensure_known(
        &self,
        player: PlayerId,
        request: &[CardId],
        target: Option<PlayerId>,
    ) -> Result<(), EngineError> {
        if !self.game.started {
            return Err(EngineError::NotStarted);
        }
        self.ensure_player(player)?;
        if let Some(target) = target {
            self.ensure_player(target)?;
        }
        match request.iter().find(|id| !self.registry.contains(**id)) {
            Some(id) => Err(EngineError::UnknownCard(*id)),
            None => Ok(()),
        }
    }

    fn ensure_player(&self, id: PlayerId) -> Result<(), EngineError> {
        if self.game.is_seated(id) || self.game.dropout(id).is_some() {
            Ok(())
        } else {
            Err(EngineError::UnknownPlayer(id))
        }
    }

    pub(super) fn reject(&mut self, player: PlayerId, violation: Violation) -> Verdict {
        debug!(%player, %violation, "rule violation");
        self.events.whisper(player, Event::RuleViolation { violation });
        Verdict::Rejected(violation)
    }

    /// Move cards from a hand into that player's staging buffer.
    pub(super) fn stage(&mut self, player: PlayerId, cards: &[Card]) {
        if let Some(seat) = self.game.player_mut(player) {
            for card in cards {
                if let Some(pos) = seat.hand.iter().position(|c| c.uid == card.uid) {
                    let card = seat.hand.remove(pos);
                    seat.discard.push(card);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Hook helpers
    // ------------------------------------------------------------------

    /// Broadcast an event on behalf of a card.
    pub fn announce(&mut self, event: Event) {
        self.events.announce(event);
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    pub fn damage(&mut self, target: PlayerId, amount: i32) {
        let Some(player) = self.game.player_mut(target) else {
            return;
        };
        player.hp -= amount;
        let hp = player.hp;
        self.events.announce(Event::Damaged {
            player: target,
            amount,
            hp,
        });
    }

    /// Heal up to the maximum. Announces the amount actually restored.
    pub fn heal(&mut self, target: PlayerId, amount: i32) {
        let Some(player) = self.game.player_mut(target) else {
            return;
        };
        let before = player.hp;
        player.hp = (player.hp + amount).min(player.max_hp).max(before);
        let (restored, hp) = (player.hp - before, player.hp);
        self.events.announce(Event::Healed {
            player: target,
            amount: restored,
            hp,
        });
    }

    /// Overwrite health outright.
    pub fn set_hp(&mut self, target: PlayerId, hp: i32) {
        if let Some(player) = self.game.player_mut(target) {
            player.hp = hp;
        }
    }

    pub fn add_miss_turns(&mut self, target: PlayerId, turns: u32) {
        if let Some(player) = self.game.player_mut(target) {
            player.miss_turns += turns;
        }
    }

    /// Use up one missed turn. Returns how many are left.
    pub fn spend_miss_turn(&mut self, target: PlayerId) -> u32 {
        match self.game.player_mut(target) {
            Some(player) => {
                player.miss_turns = player.miss_turns.saturating_sub(1);
                player.miss_turns
            }
            None => 0,
        }
    }

    pub fn grant_extra_turn(&mut self, player: PlayerId) {
        if let Some(seat) = self.game.player_mut(player) {
            seat.extra_turns += 1;
        }
    }

    /// Force the next attack onto `player`.
    pub fn set_target_override(&mut self, player: PlayerId) {
        self.game.target = Some(player);
    }

    /// Reverse turn order behind the current player.
    pub fn reverse_order(&mut self, by: PlayerId) {
        if self.game.players.len() > 2 {
            self.game.players[1..].reverse();
        }
        self.events.announce(Event::OrderReversed { player: by });
    }

    /// A random seated player not in `excluding`.
    pub fn random_player(&mut self, excluding: &[PlayerId]) -> Option<PlayerId> {
        let pool: Vec<PlayerId> = self
            .game
            .players
            .iter()
            .map(|p| p.id)
            .filter(|id| !excluding.contains(id))
            .collect();
        self.rng.choose(&pool).copied()
    }

    /// Move a staged card onto `holder` as a condition, queued under each
    /// phase in `phases`. Returns false if the card was not staged.
    pub fn attach_condition(
        &mut self,
        holder: PlayerId,
        card: Card,
        phases: &[HookPhase],
        remaining: u32,
    ) -> bool {
        if !self.game.is_seated(holder) {
            return false;
        }
        let Some(card) = self.game.unstage(card.uid) else {
            return false;
        };
        let Some(seat) = self.game.player_mut(holder) else {
            self.game.discard_pile.push(card);
            return false;
        };
        seat.condition_cards.push(card);
        for &phase in phases {
            seat.queue_mut(phase)
                .push_back(ConditionRecord::new(card.uid, card.id, phase, remaining));
        }
        debug!(%holder, card = %card.id, ?phases, remaining, "condition attached");
        self.events.announce(Event::ConditionAttached {
            player: holder,
            card: card.id,
        });
        true
    }

    /// Drop every record of a condition and retire its card.
    pub fn retire_condition(&mut self, holder: PlayerId, uid: CardUid) -> bool {
        let Some(seat) = self.game.player_mut(holder) else {
            return false;
        };
        for phase in HookPhase::ALL {
            seat.queue_mut(phase).retain(|r| r.condition_id != uid);
        }
        let Some(pos) = seat.condition_cards.iter().position(|c| c.uid == uid) else {
            return false;
        };
        let card = seat.condition_cards.remove(pos);
        self.game.discard_pile.push(card);
        debug!(%holder, card = %card.id, "condition retired");
        self.events.announce(Event::ConditionExpired {
            player: holder,
            card: card.id,
        });
        true
    }

    /// Count one turn off a condition's record. Returns turns left.
    pub fn tick_condition(&mut self, holder: PlayerId, uid: CardUid, phase: HookPhase) -> u32 {
        let Some(seat) = self.game.player_mut(holder) else {
            return 0;
        };
        match seat.queue_mut(phase).iter_mut().find(|r| r.condition_id == uid) {
            Some(record) => {
                record.remaining = record.remaining.saturating_sub(1);
                record.remaining
            }
            None => 0,
        }
    }

    /// Does `holder` carry a condition backed by template `id`?
    #[must_use]
    pub fn has_condition(&self, holder: PlayerId, id: CardId) -> bool {
        self.game
            .player(holder)
            .map_or(false, |p| p.condition_cards.iter().any(|c| c.id == id))
    }

    /// Does `holder` carry a condition whose behaviour matches `pred`?
    pub fn has_condition_where(
        &self,
        holder: PlayerId,
        pred: impl Fn(&dyn CardBehavior) -> bool,
    ) -> bool {
        self.game.player(holder).map_or(false, |p| {
            p.condition_cards
                .iter()
                .any(|c| pred(self.behavior(c.id).as_ref()))
        })
    }
}
