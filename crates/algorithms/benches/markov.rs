//! Benchmarks for the Markovian parameter

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stoseg_algorithms::statistics::{directional_profile, lag_offsets, markov_parameter, Direction, OutOfRangePolicy};
use stoseg_core::Grid;

fn create_field(size: usize) -> Grid<f64> {
    let mut field = Grid::new(size, size);

    // Smooth ramp plus a short-period pattern, kept inside 0..=250
    for row in 0..size {
        for col in 0..size {
            let base = ((row + col) % 200) as f64;
            let variation = ((row * 7 + col * 13) % 100) as f64 / 2.0;
            field.set(row, col, base + variation).unwrap();
        }
    }
    field
}

fn bench_markov_parameter(c: &mut Criterion) {
    let mut group = c.benchmark_group("markov_parameter");

    for size in [256, 512, 1024, 2048].iter() {
        let field = create_field(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| markov_parameter(black_box(&field), 1, 1).unwrap())
        });
    }

    group.finish();
}

fn bench_profile(c: &mut Criterion) {
    let field = create_field(512);
    let offsets = lag_offsets(16, Direction::Rows);

    c.bench_function("directional_profile_512_x16", |b| {
        b.iter(|| directional_profile(black_box(&field), &offsets, OutOfRangePolicy::Reject).unwrap())
    });
}

criterion_group!(benches, bench_markov_parameter, bench_profile);
criterion_main!(benches);
