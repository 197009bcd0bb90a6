//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use rust_brawl::catalogue::standard_registry;
use rust_brawl::{BotDriver, CardId, Engine, GameConfig, PlayerId};

static TRACING: Once = Once::new();

/// Install a test subscriber once per binary. `RUST_LOG` picks the level.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn seats(n: u64) -> Vec<PlayerId> {
    (1..=n).map(PlayerId::new).collect()
}

/// A table of `n` players, not yet started.
pub fn table(n: u64, seed: u64) -> Engine {
    init_tracing();
    let mut engine = Engine::new(Arc::new(standard_registry()), GameConfig::new().with_seed(seed))
        .expect("default config is valid");
    for id in seats(n) {
        engine.join(id, format!("P{}", id.raw())).expect("seat available");
    }
    engine
}

/// A started table whose deck begins with `order`.
pub fn stacked(n: u64, order: &[CardId]) -> Engine {
    let mut engine = table(n, 1);
    engine.start_stacked(order).expect("order fits the catalogue");
    engine
}

/// A started all-bot table.
pub fn bot_game(n: u64, seed: u64) -> (Engine, BotDriver) {
    let mut engine = table(n, seed);
    let mut driver = BotDriver::new();
    for id in seats(n) {
        driver.add_bot(id);
    }
    engine.start().expect("enough players");
    (engine, driver)
}
