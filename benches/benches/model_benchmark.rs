//! Benchmarks for spacing validation, model construction and draw evaluation.
//!
//! Run with: `cargo bench --package macrometrics-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use macrometrics_bench::{FixtureConfig, numeric_index, quarterly_index, var_fixture};
use macrometrics_estimated::SampleIndex;
use macrometrics_types::{Frequency, SpacingConfig, check_regular_spacing};
use ndarray::Array1;
use std::hint::black_box;

fn spacing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("spacing");

    for len in [1_000, 100_000] {
        group.throughput(Throughput::Elements(len as u64));

        let numeric = numeric_index(len);
        group.bench_with_input(BenchmarkId::new("numeric", len), &numeric, |b, index| {
            let config = SpacingConfig::default();
            b.iter(|| check_regular_spacing(black_box(index.iter().copied()), &config).unwrap());
        });

        let quarters = quarterly_index(len).unwrap();
        group.bench_with_input(BenchmarkId::new("quarterly", len), &quarters, |b, index| {
            let config = SpacingConfig::in_unit(Frequency::Quarter);
            b.iter(|| check_regular_spacing(black_box(index.iter().copied()), &config).unwrap());
        });
    }

    group.finish();
}

fn model_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("var");
    group.sample_size(20);

    for config in [
        FixtureConfig::default(),
        FixtureConfig {
            n: 8,
            p: 4,
            observations: 400,
            ..FixtureConfig::default()
        },
    ] {
        group.bench_with_input(BenchmarkId::new("construct", config.label()), &config, |b, config| {
            b.iter(|| var_fixture(black_box(config)).unwrap());
        });

        let model = var_fixture(&config).unwrap();
        let lags = model.lag_history(model.p()).unwrap();
        let eps = Array1::zeros(model.n());
        group.throughput(Throughput::Elements(model.num_samples() as u64));
        group.bench_function(BenchmarkId::new("step_all_draws", config.label()), |b| {
            b.iter(|| {
                for chain in 0..config.chains {
                    for draw in 0..config.draws {
                        let index = SampleIndex::new(draw, chain);
                        black_box(model.step(index, lags.view(), eps.view()).unwrap());
                    }
                }
            });
        });

        group.bench_function(BenchmarkId::new("residuals", config.label()), |b| {
            b.iter(|| model.residuals(black_box(SampleIndex::default())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, spacing_benchmark, model_benchmark);
criterion_main!(benches);
