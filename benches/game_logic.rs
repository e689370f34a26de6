use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tui_match3::core::{cascade, merge, playability, BoardLayout, Game, GameConfig, Grid, PieceFactory};

fn full_grid(seed: u32) -> Grid {
    let mut grid = Grid::new(8, 8);
    let mut factory = PieceFactory::new(seed, 5);
    for row in 0..8 {
        for col in 0..8 {
            grid.set(row, col, Some(factory.create(-1))).unwrap();
        }
    }
    grid
}

fn bench_merge_pass(c: &mut Criterion) {
    let grid = full_grid(42);
    c.bench_function("merge_pass_8x8", |b| {
        b.iter(|| {
            let mut scratch = grid.clone();
            black_box(merge::resolve(&mut scratch, 10))
        })
    });
}

fn bench_cascade(c: &mut Criterion) {
    let mut holed = full_grid(42);
    // Knock out a band so compaction has work to do.
    for col in 0..8 {
        for row in 3..6 {
            let _ = holed.take(row, col).unwrap();
        }
    }

    c.bench_function("compact_and_refill_8x8", |b| {
        b.iter(|| {
            let mut scratch = holed.clone();
            let mut factory = PieceFactory::new(7, 5);
            let moves = cascade::compact(&mut scratch);
            let spawned = cascade::spawn_fill(&mut scratch, &mut factory);
            black_box((moves, spawned))
        })
    });
}

fn bench_playability(c: &mut Criterion) {
    let grid = full_grid(42);
    c.bench_function("playability_oracle_8x8", |b| {
        b.iter(|| black_box(playability::has_available_play(&grid)))
    });
}

fn bench_full_settle(c: &mut Criterion) {
    c.bench_function("settle_random_8x8", |b| {
        let mut seed = 1u32;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let layout = BoardLayout::random(8, 8).unwrap();
            let mut game = Game::new(
                layout,
                GameConfig {
                    palette: 5,
                    merge_score: 10,
                    seed,
                },
            )
            .unwrap();
            black_box(game.settle())
        })
    });
}

criterion_group!(
    benches,
    bench_merge_pass,
    bench_cascade,
    bench_playability,
    bench_full_settle
);
criterion_main!(benches);
