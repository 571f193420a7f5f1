//! Benchmarks for the sorted-set engine.
//!
//! Covers the hot paths: construction from unsorted input, binary-search
//! membership, navigation queries, zero-copy range views, and batch-wise
//! reduction.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordset::prelude::*;

/// Deterministic pseudo-random input so runs are comparable.
fn scrambled_input(size: usize) -> Vec<u64> {
    let mut state = 0x9e37_79b9_7f4a_7c15_u64;
    (0..size)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        })
        .collect()
}

fn bench_construction(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("construction");

    for size in [100, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("from_elements", size),
            &size,
            |bencher, &size| {
                let input = scrambled_input(size);
                bencher.iter(|| SortedArraySet::from_elements(black_box(input.clone())));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("from_sorted_vec", size),
            &size,
            |bencher, &size| {
                let sorted: Vec<u64> = SortedArraySet::from_elements(scrambled_input(size))
                    .iter()
                    .copied()
                    .collect();
                bencher.iter(|| SortedArraySet::from_sorted_vec(black_box(sorted.clone())));
            },
        );
    }

    group.finish();
}

fn bench_lookups(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("lookups");
    let set = SortedArraySet::from_elements(scrambled_input(10_000));
    let probes = scrambled_input(1_000);

    group.bench_function("contains", |bencher| {
        bencher.iter(|| {
            probes
                .iter()
                .filter(|probe| set.contains(black_box(*probe)))
                .count()
        });
    });

    group.bench_function("floor_ceiling", |bencher| {
        bencher.iter(|| {
            probes
                .iter()
                .filter_map(|probe| set.floor(black_box(probe)).or_else(|| set.ceiling(probe)))
                .count()
        });
    });

    group.finish();
}

fn bench_range_views(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("range_views");
    let set: SortedArraySet<u64> = (0..10_000).collect();

    group.bench_function("sub_set", |bencher| {
        bencher.iter(|| {
            set.sub_set(black_box(&2_500), true, black_box(&7_500), false)
                .unwrap()
        });
    });

    group.bench_function("descending_set", |bencher| {
        bencher.iter(|| black_box(&set).descending_set());
    });

    group.finish();
}

fn bench_batches(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("batches");
    let set: SortedArraySet<u64> = (0..100_000).collect();

    for batch_size in [512, 4_096] {
        group.bench_with_input(
            BenchmarkId::new("count_reduction", batch_size),
            &batch_size,
            |bencher, &batch_size| {
                bencher.iter(|| {
                    set.batches(batch_size)
                        .unwrap()
                        .map(|batch| batch.count(|element| **element % 3 == 0))
                        .sum::<usize>()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_lookups,
    bench_range_views,
    bench_batches
);
criterion_main!(benches);
