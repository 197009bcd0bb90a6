//! Errors and rule verdicts.
//!
//! Two severities:
//!
//! - [`EngineError`]: the caller misused the API (unknown ids, no game
//!   running). Returned as `Err` before anything is touched.
//! - [`Violation`]: a player tried something the rules forbid. Not an error
//!   at the API level: the operation returns `Ok(Verdict::Rejected(..))`,
//!   changes nothing, and the offender is whispered the code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::ConfigError;
use super::player::PlayerId;
use crate::cards::CardId;

/// Integration errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("card {0} is not registered")]
    UnknownCard(CardId),
    #[error("not enough copies of {0} to stack the deck")]
    NotEnoughCopies(CardId),
    #[error("player {0} already joined")]
    DuplicatePlayer(PlayerId),
    #[error("the table is full ({0} seats)")]
    TableFull(usize),
    #[error("game has not started")]
    NotStarted,
    #[error("game already started")]
    AlreadyStarted,
    #[error("need at least 2 players, have {0}")]
    NotEnoughPlayers(usize),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Rule violations, whispered to the offending player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Violation {
    #[error("the game is over")]
    GameStopped,
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("an attack is waiting for an answer")]
    WindowOpen,
    #[error("there is no attack to answer")]
    NoPendingAttack,
    #[error("the pending attack is not aimed at you")]
    NotTheTarget,
    #[error("no cards given")]
    EmptyRequest,
    #[error("those cards are not in your hand")]
    CardsNotInHand,
    #[error("those cards cannot be played together")]
    IllegalCombination,
    #[error("invalid target")]
    InvalidTarget,
    #[error("that card cannot be played now")]
    NotPlayable,
    #[error("that card cannot answer this attack")]
    IneligibleCounter,
}

/// Outcome of a rule-checked operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Violation),
}

impl Verdict {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// The violation, if the operation was rejected.
    #[must_use]
    pub fn violation(self) -> Option<Violation> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(v) => Some(v),
        }
    }
}
