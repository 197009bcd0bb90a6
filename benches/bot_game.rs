//! Full bot-vs-bot games.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_brawl::catalogue::standard_registry;
use rust_brawl::{BotDriver, CardRegistry, Engine, GameConfig, PlayerId};

fn play_out(registry: &Arc<CardRegistry>, players: u64, seed: u64) -> usize {
    let mut engine = Engine::new(Arc::clone(registry), GameConfig::new().with_seed(seed)).unwrap();
    let mut driver = BotDriver::new();
    for id in (1..=players).map(PlayerId::new) {
        engine.join(id, "bot").unwrap();
        driver.add_bot(id);
    }
    engine.start().unwrap();
    driver.pump(&mut engine, 10_000).unwrap()
}

fn bench_bot_games(c: &mut Criterion) {
    let registry = Arc::new(standard_registry());
    let mut group = c.benchmark_group("bot_game");
    for players in [2u64, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(players), &players, |b, &players| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(play_out(&registry, players, seed))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bot_games);
criterion_main!(benches);
