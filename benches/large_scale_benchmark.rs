use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use gallopsort::prelude::*;
use rand::Rng;
use std::hint::black_box;
use std::time::Duration;

/// A wide table row; moving it is much more expensive than moving its position.
#[derive(Clone)]
struct Row {
    key: u64,
    _payload: [u64; 15],
}

fn bench_1m_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("1M Rows");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(60)); // Increase time for large sort setup overhead

    let mut rng = rand::rng();
    let count = 1_000_000;

    let rows: Vec<Row> = (0..count)
        .map(|_| Row {
            key: rng.random(),
            _payload: [0; 15],
        })
        .collect();

    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("gallopsort (rows)", |b| {
        b.iter_batched(
            || rows.clone(),
            |mut data| {
                sort_by(black_box(&mut data), |a, b| a.key.cmp(&b.key));
            },
            BatchSize::LargeInput,
        )
    });

    group.bench_function("gallopsort (argsort)", |b| {
        b.iter(|| argsort_by(black_box(&rows), |a, b| a.key.cmp(&b.key)))
    });

    // Std Sort (Stable)
    group.bench_function("slice::sort_by (stable)", |b| {
        b.iter_batched(
            || rows.clone(),
            |mut data| data.sort_by(|a, b| a.key.cmp(&b.key)),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_1m_rows);
criterion_main!(benches);
