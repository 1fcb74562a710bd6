//! Benchmarks for streaming ingest and finalization.

#[path = "../src/test_support.rs"]
mod test_support;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use test_support::generate_dataset;
use unimail_rs::Unimail;

fn bench_streaming_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming_ingest");

    for &count in &[1_000u32, 10_000] {
        let dataset = generate_dataset(count, 0.3, 42);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &dataset, |b, dataset| {
            b.iter_batched(
                Unimail::new,
                |mut engine| {
                    for record in dataset {
                        engine.ingest(&record.user, &record.emails).unwrap();
                    }
                    black_box(engine.cluster_count())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_golden_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("golden_records");

    for &share in &[0.1f64, 0.5] {
        let dataset = generate_dataset(5_000, share, 42);
        let mut engine = Unimail::new();
        for record in &dataset {
            engine.ingest(&record.user, &record.emails).unwrap();
        }

        group.throughput(Throughput::Elements(dataset.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("share_{share}")),
            &engine,
            |b, engine| {
                b.iter_batched(
                    || engine.clone(),
                    |mut engine| black_box(engine.golden_records().unwrap()),
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_streaming_ingest, bench_golden_records);
criterion_main!(benches);
