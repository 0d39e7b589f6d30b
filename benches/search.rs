//! Search benchmarks.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure:
//! - Full-board threat search at tactical depths
//! - Rapid-policy playouts
//! - Short MCTS runs with varying iteration counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gomoku::eval::{LevelRange, ThreatLevel};
use gomoku::search::{Playout, Policy, ThreatSearcher};
use gomoku::{MctsEngine, SearchConfig, State, Stone};

/// A 15x15 middle-game position with threats for both sides
fn midgame() -> State {
    let rows = [
        "...............",
        "...............",
        "...............",
        "...............",
        ".....x.........",
        "......o.x......",
        ".....xoo.......",
        "......oxo......",
        ".....o.x.......",
        "....x..........",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
    ];
    State::from_rows(&rows, Stone::Black).unwrap()
}

fn bench_threat_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("threat_search");
    let state = midgame();
    let levels = LevelRange::new(ThreatLevel::Three, ThreatLevel::Five);

    for depth in [1u32, 2, 4, 6] {
        group.bench_with_input(BenchmarkId::new("find_threats", depth), &depth, |b, &depth| {
            let mut searcher = ThreatSearcher::new();
            b.iter(|| {
                black_box(searcher.find_threats(
                    black_box(state.board()),
                    Stone::Black,
                    levels,
                    depth,
                ))
            })
        });
    }
    group.finish();
}

fn bench_playout(c: &mut Criterion) {
    let config = SearchConfig::default().with_seed(11);
    let state = midgame();

    c.bench_function("playout_10_moves", |b| {
        let mut policy = Policy::new(&config);
        let playout = Playout::new(10);
        b.iter(|| black_box(playout.simulate(&mut policy, black_box(&state))))
    });
}

fn bench_mcts(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_run");
    group.sample_size(10);
    let state = midgame();

    for iterations in [50u32, 200] {
        group.bench_with_input(
            BenchmarkId::new("midgame", iterations),
            &iterations,
            |b, &iterations| {
                let config = SearchConfig::default()
                    .with_iterations(iterations)
                    .with_seed(5);
                b.iter(|| {
                    let mut engine = MctsEngine::new(config.clone()).unwrap();
                    black_box(engine.run(black_box(&state)).unwrap())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_threat_search, bench_playout, bench_mcts);
criterion_main!(benches);
