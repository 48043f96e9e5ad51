use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use gallopsort::prelude::*;
use rand::Rng;
use std::hint::black_box;

fn patterns(count: usize) -> Vec<(&'static str, Vec<u64>)> {
    let mut rng = rand::rng();

    let random: Vec<u64> = (0..count).map(|_| rng.random()).collect();
    let sorted: Vec<u64> = (0..count as u64).collect();
    let reversed: Vec<u64> = (0..count as u64).rev().collect();
    // Ascending stretches of 500, the shape of a table appended to in batches.
    let saw: Vec<u64> = (0..count as u64).map(|i| i % 500).collect();
    let few_unique: Vec<u64> = (0..count).map(|_| rng.random_range(0..8)).collect();

    vec![
        ("random", random),
        ("sorted", sorted),
        ("reversed", reversed),
        ("saw", saw),
        ("few_unique", few_unique),
    ]
}

fn bench_patterns(c: &mut Criterion) {
    let count = 10_000;

    for (name, input) in patterns(count) {
        let mut group = c.benchmark_group(format!("u64 {}", name));
        group.sample_size(20);

        group.bench_function("gallopsort", |b| {
            b.iter_batched(
                || input.clone(),
                |mut data| {
                    sort(black_box(&mut data));
                },
                BatchSize::SmallInput,
            )
        });

        // Std Sort (Stable)
        group.bench_function("slice::sort (stable)", |b| {
            b.iter_batched(
                || input.clone(),
                |mut data| data.sort(),
                BatchSize::SmallInput,
            )
        });

        // Std Sort Unstable
        group.bench_function("slice::sort_unstable", |b| {
            b.iter_batched(
                || input.clone(),
                |mut data| data.sort_unstable(),
                BatchSize::SmallInput,
            )
        });

        group.finish();
    }
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("String Sort");
    group.sample_size(10);

    let mut rng = rand::rng();
    let count = 10_000;

    let random_strings: Vec<String> = (0..count)
        .map(|_| {
            let len = rng.random_range(5..20);
            (0..len).map(|_| rng.random::<char>()).collect()
        })
        .collect();

    group.bench_function("gallopsort", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| {
                sort(black_box(&mut data));
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("gallopsort (indices)", |b| {
        b.iter_batched(
            || (0..random_strings.len()).collect::<Vec<usize>>(),
            |mut indices| {
                sort_indices(
                    black_box(&mut indices),
                    |i| &random_strings[i],
                    |a, b| a.cmp(b),
                );
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| data.sort(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_patterns, bench_strings);
criterion_main!(benches);
