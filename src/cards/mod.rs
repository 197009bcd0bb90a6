//! Card system: definitions, instances, registry, and the card contract.
//!
//! ## Key Types
//!
//! - `CardId`: identifier for a card template
//! - `CardKind`: the fixed set of kinds the rules understand
//! - `CardDefinition`: static card data (kind, stats, copies)
//! - `Card`: one physical copy in a game
//! - `CardBehavior`: the hook interface every template implements
//! - `CardRegistry`: template lookup, paired with behaviours
//!
//! The `catalogue` submodule holds the standard card set.

pub mod catalogue;
pub mod contract;
pub mod definition;
pub mod instance;
pub mod registry;

pub use contract::{CardBehavior, Preview};
pub use definition::{CardDefinition, CardId, CardKind, CardStats};
pub use instance::{ids_of, Card, CardList, CardSeq, CardUid};
pub use registry::CardRegistry;
