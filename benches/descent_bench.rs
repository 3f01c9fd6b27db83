//! Benchmarks for the descent core
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use descent_viz::landscape::LandscapeCurve;
use descent_viz::utils::run_seeds;
use descent_viz::{MomentumDescent, MomentumParams, Optimizer, RuggedBowl, Run, RunConfig, SeedStrategy};

fn step_throughput(c: &mut Criterion) {
    c.bench_function("momentum_step_x1000", |b| {
        b.iter(|| {
            let mut engine = MomentumDescent::from_state(MomentumParams::default(), 10.0, 0.0).unwrap();
            for _ in 0..1000 {
                black_box(engine.step());
            }
        })
    });

    c.bench_function("run_1000_frames", |b| {
        b.iter(|| {
            let run = Run::new(RunConfig::default(), SeedStrategy::Seeded(1)).unwrap();
            black_box(run.collect_trajectory())
        })
    });
}

fn curve_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("landscape_curve");
    for points in [1000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, &n| {
            b.iter(|| LandscapeCurve::sample(&RuggedBowl, 50.0, black_box(n)).unwrap())
        });
    }
    group.finish();
}

fn batch_runs(c: &mut Criterion) {
    let seeds: Vec<u64> = (0..32).collect();
    c.bench_function("batch_32_runs", |b| {
        b.iter(|| run_seeds(&RunConfig::default(), black_box(&seeds)).unwrap())
    });
}

criterion_group!(benches, step_throughput, curve_sampling, batch_runs);
criterion_main!(benches);
