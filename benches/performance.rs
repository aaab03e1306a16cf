//! Performance benchmarks for the statistics engine and report formatting

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use network_speed_tester::{
    models::{PhaseReport, TierResult},
    output::ReportFormatter,
    stats::{jitter, median, quantile, SampleSummary},
    types::{PayloadTier, TestKind},
};
use std::hint::black_box;

/// Deterministic, unordered speed samples
fn create_samples(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 50.0 + ((i * 7919) % 1000) as f64 / 10.0)
        .collect()
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for size in [20usize, 100, 1_000, 10_000] {
        let samples = create_samples(size);

        group.bench_with_input(BenchmarkId::new("median", size), &samples, |b, samples| {
            b.iter(|| median(black_box(samples)))
        });
        group.bench_with_input(BenchmarkId::new("quantile_p90", size), &samples, |b, samples| {
            b.iter(|| quantile(black_box(samples), black_box(0.9)))
        });
        group.bench_with_input(BenchmarkId::new("jitter", size), &samples, |b, samples| {
            b.iter(|| jitter(black_box(samples)))
        });
        group.bench_with_input(BenchmarkId::new("summary", size), &samples, |b, samples| {
            b.iter(|| SampleSummary::from_samples(black_box(samples)))
        });
    }

    group.finish();
}

fn bench_report_formatting(c: &mut Criterion) {
    let mut report = PhaseReport::new(TestKind::Download);
    for tier in network_speed_tester::defaults::DOWNLOAD_TIERS {
        let samples = create_samples(tier.iterations as usize);
        report.push(TierResult::new(tier, samples));
    }
    let tier = TierResult::new(&PayloadTier::new("1MB", 1_001_000, 8), create_samples(8));

    let mut group = c.benchmark_group("report");
    for enable_color in [false, true] {
        let formatter = ReportFormatter::new(enable_color);
        group.bench_function(BenchmarkId::new("tier_line", enable_color), |b| {
            b.iter(|| formatter.tier_line(black_box(&tier)))
        });
        group.bench_function(BenchmarkId::new("overall_line", enable_color), |b| {
            b.iter(|| formatter.overall_line(black_box(&report)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_statistics, bench_report_formatting);
criterion_main!(benches);
