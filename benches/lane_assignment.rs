//! Lane assignment and bucket counting benchmark
//!
//! The free-lane search is a linear scan over the lane table. This measures
//! how it scales with the number of concurrently open requests.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench lane_assignment
//! ```

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reqplot::config::{ConverterConfig, Variant};
use reqplot::lanes::assign_lanes;
use reqplot::summary::RequestRecord;
use reqplot::throughput::bucket_counts;
use reqplot::timeline::Timeline;

/// Requests issued every 2ms, each lasting `concurrency * 2ms`
fn synthetic_records(count: usize, concurrency: usize) -> Vec<RequestRecord> {
    let timestamp = |ms: usize| {
        format!(
            "2024-01-01T{:02}:{:02}:{:02}.{:03}Z",
            ms / 3_600_000,
            ms / 60_000 % 60,
            ms / 1000 % 60,
            ms % 1000
        )
    };

    (0..count)
        .map(|i| {
            let start = i * 2;
            RequestRecord {
                start: timestamp(start),
                end: timestamp(start + concurrency * 2),
                status: Some(if i % 50 == 0 { 429 } else { 204 }),
            }
        })
        .collect()
}

fn bench_assign_lanes_concurrency(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_lanes");
    group.measurement_time(Duration::from_secs(5));
    group.throughput(Throughput::Elements(10_000));

    for concurrency in [1usize, 16, 256].iter() {
        let timeline = Timeline::normalize(&synthetic_records(10_000, *concurrency)).unwrap();
        let config = ConverterConfig::for_variant(Variant::IntervalsStatus);

        group.bench_with_input(
            BenchmarkId::from_parameter(concurrency),
            &timeline,
            |b, timeline| {
                b.iter(|| black_box(assign_lanes(black_box(timeline), &config)));
            },
        );
    }
    group.finish();
}

fn bench_bucket_counts(c: &mut Criterion) {
    let timeline = Timeline::normalize(&synthetic_records(10_000, 16)).unwrap();
    let config = ConverterConfig::for_variant(Variant::Throughput);

    c.bench_function("bucket_counts_10k", |b| {
        b.iter(|| black_box(bucket_counts(black_box(&timeline), &config)));
    });
}

fn bench_normalize(c: &mut Criterion) {
    let records = synthetic_records(10_000, 16);

    c.bench_function("normalize_10k", |b| {
        b.iter(|| black_box(Timeline::normalize(black_box(&records)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_assign_lanes_concurrency,
    bench_bucket_counts,
    bench_normalize
);
criterion_main!(benches);
