//! Resolution engine.
//!
//! [`Engine`] owns one game: turn order, the exchange automaton, every card
//! zone and the event outbox. Card behaviours plug in through
//! [`CardBehavior`](crate::cards::CardBehavior); the engine never branches
//! on which card it is resolving.

mod cleanup;
mod contact;
pub mod engine;
pub mod exchange;
mod turn;

pub use engine::{Engine, GameResult};
pub use exchange::{Exchange, PendingContact};
