//! Computer opponents.
//!
//! - `moves`: the weighted move generator
//! - `weights`: weighting helpers shared by the card hooks
//! - `policy`: decision policies (`HeuristicBot`)
//! - `driver`: feeds engine prompts to policies

pub mod driver;
pub mod moves;
pub mod policy;
pub mod weights;

pub use driver::BotDriver;
pub use moves::{Candidate, MoveGenerator, Situation};
pub use policy::{HeuristicBot, Policy};
