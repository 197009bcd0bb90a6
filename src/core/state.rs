//! Game state: turn order and card zones.
//!
//! ## Zones
//!
//! Every card instance of a game lives in exactly one of:
//! - the deck (top = end of vec)
//! - the discard pile (retired cards)
//! - a player's hand, staging buffer, or condition cards
//! - a dropout's collected pile
//!
//! [`Game::card_count`] sums all of them; the engine keeps it equal to the
//! size of the multiset dealt at start.

use super::config::DeckPolicy;
use super::player::{Dropout, Player, PlayerId};
use super::rng::GameRng;
use crate::cards::{Card, CardUid};

/// Mutable state of one game.
#[derive(Clone, Debug, Default)]
pub struct Game {
    /// Seated players in turn order. The head is the current player.
    pub players: Vec<Player>,

    /// Override for the next contact's target.
    pub target: Option<PlayerId>,

    pub discard_pile: Vec<Card>,
    pub deck: Vec<Card>,
    pub dropouts: Vec<Dropout>,

    pub stopped: bool,
    pub started: bool,

    /// Cumulative turn counter.
    pub turn: u32,
}

impl Game {
    /// Create an empty game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current player (head of turn order).
    #[must_use]
    pub fn current(&self) -> Option<&Player> {
        self.players.first()
    }

    /// Position of a seated player in turn order.
    #[must_use]
    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Look up a seated player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a seated player mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Look up a dropout by id.
    #[must_use]
    pub fn dropout(&self, id: PlayerId) -> Option<&Dropout> {
        self.dropouts.iter().find(|d| d.player.id == id)
    }

    /// Check whether a player is still seated.
    #[must_use]
    pub fn is_seated(&self, id: PlayerId) -> bool {
        self.position(id).is_some()
    }

    /// Seated players other than `id`, in turn order.
    pub fn others(&self, id: PlayerId) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.id != id)
    }

    /// Total card instances across every zone.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.discard_pile.len()
            + self.players.iter().map(Player::card_count).sum::<usize>()
            + self.dropouts.iter().map(|d| d.collected.len()).sum::<usize>()
    }

    /// Remove a card from whichever staging buffer holds it.
    pub fn unstage(&mut self, uid: CardUid) -> Option<Card> {
        for player in &mut self.players {
            if let Some(pos) = player.discard.iter().position(|c| c.uid == uid) {
                return Some(player.discard.remove(pos));
            }
        }
        None
    }

    /// Move every staged card of every player to the discard pile.
    ///
    /// Returns how many cards were swept.
    pub fn sweep_staging(&mut self) -> usize {
        let mut swept = 0;
        for player in &mut self.players {
            swept += player.discard.len();
            self.discard_pile.append(&mut player.discard);
        }
        swept
    }

    /// Draw the top card of the deck.
    ///
    /// With [`DeckPolicy::Reshuffle`] an empty deck is rebuilt from the
    /// discard pile first.
    pub fn draw(&mut self, policy: DeckPolicy, rng: &mut GameRng) -> Option<Card> {
        if self.deck.is_empty()
            && policy == DeckPolicy::Reshuffle
            && !self.discard_pile.is_empty()
        {
            self.deck.append(&mut self.discard_pile);
            rng.shuffle(&mut self.deck);
        }
        self.deck.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardKind};

    fn card(uid: u32) -> Card {
        Card::new(CardUid::new(uid), CardId::new(1), CardKind::Attack)
    }

    fn two_player_game() -> Game {
        let mut game = Game::new();
        game.players.push(Player::new(PlayerId::new(1), "A", 10));
        game.players.push(Player::new(PlayerId::new(2), "B", 10));
        game
    }

    #[test]
    fn test_lookup() {
        let game = two_player_game();
        assert_eq!(game.current().map(|p| p.id), Some(PlayerId::new(1)));
        assert_eq!(game.position(PlayerId::new(2)), Some(1));
        assert!(game.player(PlayerId::new(3)).is_none());
        assert_eq!(game.others(PlayerId::new(1)).count(), 1);
    }

    #[test]
    fn test_card_count_includes_all_zones() {
        let mut game = two_player_game();
        game.deck.push(card(1));
        game.discard_pile.push(card(2));
        game.players[0].hand.push(card(3));
        game.players[1].discard.push(card(4));
        game.dropouts.push(Dropout {
            player: Player::new(PlayerId::new(9), "gone", 10),
            collected: vec![card(5)],
        });

        assert_eq!(game.card_count(), 5);
    }

    #[test]
    fn test_unstage_and_sweep() {
        let mut game = two_player_game();
        game.players[0].discard.push(card(1));
        game.players[1].discard.push(card(2));

        assert_eq!(game.unstage(CardUid::new(2)).map(|c| c.uid), Some(CardUid::new(2)));
        assert!(game.unstage(CardUid::new(2)).is_none());

        assert_eq!(game.sweep_staging(), 1);
        assert_eq!(game.discard_pile.len(), 1);
        assert!(game.players[0].discard.is_empty());
    }

    #[test]
    fn test_draw_reshuffles_discard() {
        let mut game = two_player_game();
        let mut rng = GameRng::new(1);
        game.discard_pile.push(card(1));

        let drawn = game.draw(DeckPolicy::Reshuffle, &mut rng);
        assert_eq!(drawn.map(|c| c.uid), Some(CardUid::new(1)));
        assert!(game.discard_pile.is_empty());
    }

    #[test]
    fn test_draw_short_policy() {
        let mut game = two_player_game();
        let mut rng = GameRng::new(1);
        game.discard_pile.push(card(1));

        assert!(game.draw(DeckPolicy::ShortDraw, &mut rng).is_none());
        assert_eq!(game.discard_pile.len(), 1);
    }
}
