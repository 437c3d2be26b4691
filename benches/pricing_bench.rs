use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use options_pricer::models::{binomial, black_scholes, monte_carlo};
use options_pricer::prelude::*;
use std::hint::black_box;

// Pricing benchmarks
// Goals:
// - Black-Scholes cheap enough for a 20x20 heatmap per render
// - Monte Carlo at default settings within interactive latency

fn bench_black_scholes(c: &mut Criterion) {
    let req = PricingRequest::default();
    c.bench_function("black_scholes_pair", |b| {
        b.iter(|| black_scholes::price_pair(black_box(&req)).expect("pricing should succeed"))
    });

    let spots = linspace(80.0, 120.0, 20);
    let strikes = linspace(80.0, 120.0, 20);
    c.bench_function("black_scholes_grid_20x20", |b| {
        b.iter(|| price_grid(black_box(&req), &spots, &strikes).expect("grid should succeed"))
    });
}

fn bench_monte_carlo_paths(c: &mut Criterion) {
    let req = PricingRequest::default();
    let mut group = c.benchmark_group("monte_carlo_paths");
    group.sample_size(10);

    for paths in [1_000, 10_000, 50_000].iter() {
        let config = MonteCarloConfig::default().with_paths(*paths).with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(paths), paths, |b, _| {
            b.iter(|| {
                monte_carlo::price(black_box(&req), OptionType::Call, &config)
                    .expect("pricing should succeed")
            })
        });
    }

    group.finish();
}

fn bench_binomial_steps(c: &mut Criterion) {
    let req = PricingRequest::default();
    let mut group = c.benchmark_group("binomial_steps");

    for steps in [100, 500, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(steps), steps, |b, &n| {
            b.iter(|| {
                binomial::price(black_box(&req), OptionType::Call, n).expect("pricing should succeed")
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_black_scholes,
    bench_monte_carlo_paths,
    bench_binomial_steps
);
criterion_main!(benches);
