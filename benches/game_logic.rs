use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stacker_core::{EngineConfig, GameMode, Geometry, NoPowerUps, StackEngine};

fn bench_advance_continuous(c: &mut Criterion) {
    let mut engine = StackEngine::new(
        Geometry::Continuous,
        GameMode::Infinite,
        EngineConfig::default(),
        NoPowerUps,
    );
    engine.start();

    c.bench_function("advance_16ms_continuous", |b| {
        b.iter(|| {
            let _ = engine.advance(black_box(0.016));
        })
    });
}

fn bench_advance_grid(c: &mut Criterion) {
    let mut engine = StackEngine::new(
        Geometry::Grid,
        GameMode::Infinite,
        EngineConfig::default(),
        NoPowerUps,
    );
    engine.start();

    c.bench_function("advance_16ms_grid", |b| {
        b.iter(|| {
            let _ = engine.advance(black_box(0.016));
        })
    });
}

fn bench_drop_cycle(c: &mut Criterion) {
    c.bench_function("drop_cycle_infinite", |b| {
        b.iter(|| {
            let mut engine = StackEngine::new(
                Geometry::Continuous,
                GameMode::Infinite,
                EngineConfig::default(),
                NoPowerUps,
            );
            engine.start();
            for _ in 0..20 {
                let _ = engine.advance(0.016);
                let _ = engine.drop();
                engine.take_events();
            }
            black_box(engine.score())
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = StackEngine::new(
        Geometry::Grid,
        GameMode::Infinite,
        EngineConfig::default(),
        NoPowerUps,
    );
    engine.start();
    for _ in 0..10 {
        let _ = engine.drop();
    }

    c.bench_function("snapshot_grid", |b| b.iter(|| black_box(engine.snapshot())));
}

criterion_group!(
    benches,
    bench_advance_continuous,
    bench_advance_grid,
    bench_drop_cycle,
    bench_snapshot
);
criterion_main!(benches);
