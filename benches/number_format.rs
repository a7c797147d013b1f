//! Benchmarks for count formatting.
//!
//! Every repository row formats three counts, so this runs once per visible
//! count on each refresh.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ghview::utils::format_count;

fn bench_small_counts(c: &mut Criterion) {
    c.bench_function("format_count_below_thousand", |b| {
        b.iter(|| format_count(black_box(999)))
    });
}

fn bench_scaled_counts(c: &mut Criterion) {
    c.bench_function("format_count_millions", |b| {
        b.iter(|| format_count(black_box(2_147_483)))
    });
}

fn bench_repository_page(c: &mut Criterion) {
    let counts: Vec<u64> = (0..100u64).map(|i| i * i * 1_337).collect();

    c.bench_function("format_count_page_of_100", |b| {
        b.iter(|| {
            black_box(&counts)
                .iter()
                .map(|count| format_count(*count))
                .collect::<Vec<_>>()
        })
    });
}

criterion_group!(
    benches,
    bench_small_counts,
    bench_scaled_counts,
    bench_repository_page
);
criterion_main!(benches);
