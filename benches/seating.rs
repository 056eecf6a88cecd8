//! Benchmark harness using Criterion for seating operations.
//!
//! Measures:
//! - Randomize
//! - Rotate to start (ranked and fresh)
//! - Move (adjacent and end-to-end)
//! - Mixed gesture workload through the engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use turn_order::{Command, OrderMaintainer, Participant, SeatingEngine};

const TABLE_SIZES: [usize; 4] = [4, 8, 32, 256];

fn table(k: usize) -> OrderMaintainer {
    let mut m = OrderMaintainer::with_capacity(k);
    for i in 0..k {
        m.add(Participant::guest(format!("Player {}", i)));
    }
    m
}

/// Benchmark: Randomize a full table
fn bench_randomize(c: &mut Criterion) {
    let mut group = c.benchmark_group("randomize");

    for &k in TABLE_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            let mut m = table(k);
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            b.iter(|| {
                black_box(m.randomize_with(&mut rng));
            })
        });
    }

    group.finish();
}

/// Benchmark: Rotate an established order
fn bench_rotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate_ranked");

    for &k in TABLE_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            let mut m = table(k);
            m.rotate_to_start(0).unwrap();
            b.iter(|| {
                black_box(m.rotate_to_start(k / 2).unwrap());
            })
        });
    }

    group.finish();

    let mut group = c.benchmark_group("rotate_fresh");

    for &k in TABLE_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            let mut m = table(k);
            b.iter(|| {
                m.clear_ranks();
                black_box(m.rotate_to_start(k - 1).unwrap());
            })
        });
    }

    group.finish();
}

/// Benchmark: Drag the first seat to the last and back
fn bench_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_end_to_end");

    for &k in TABLE_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            let mut m = table(k);
            m.rotate_to_start(0).unwrap();
            b.iter(|| {
                black_box(m.move_seat(0, k - 1).unwrap());
                black_box(m.move_seat(k - 1, 0).unwrap());
            })
        });
    }

    group.finish();

    c.bench_function("move_adjacent_32", |b| {
        let mut m = table(32);
        m.rotate_to_start(0).unwrap();
        b.iter(|| black_box(m.move_seat(15, 16).unwrap()))
    });
}

/// Benchmark: Random gestures through the command engine
fn bench_mixed_workload(c: &mut Criterion) {
    c.bench_function("mixed_gestures_8", |b| {
        let mut engine = SeatingEngine::with_rng(ChaCha8Rng::seed_from_u64(7));
        for i in 0..8 {
            engine.process_command(Command::Add(Participant::guest(format!("Player {}", i))));
        }
        let mut rng = ChaCha8Rng::seed_from_u64(12345);

        b.iter(|| {
            let cmd = match rng.gen_range(0..10) {
                0 => Command::Randomize,
                1..=2 => Command::RotateToStart { index: rng.gen_range(0..8) },
                _ => Command::Move {
                    from: rng.gen_range(0..8),
                    to: rng.gen_range(0..8),
                },
            };
            black_box(engine.process_command(cmd))
        })
    });
}

criterion_group!(benches, bench_randomize, bench_rotate, bench_move, bench_mixed_workload);
criterion_main!(benches);
