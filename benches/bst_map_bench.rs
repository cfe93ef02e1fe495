//! Benchmark for BstMap vs standard BTreeMap.
//!
//! Compares insertion, lookup before and after an explicit balance, and
//! full ordered traversal against Rust's standard BTreeMap.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use arbor_map::tree::BstMap;
use std::collections::BTreeMap;

/// Pseudo-random key sequence, deterministic across runs.
fn shuffled_keys(size: i32) -> Vec<i32> {
    let mut keys: Vec<i32> = (0..size).collect();
    let mut state = 0x9e37_79b9_u64;
    for index in (1..keys.len()).rev() {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        #[allow(clippy::cast_possible_truncation)]
        let other = (state >> 33) as usize % (index + 1);
        keys.swap(index, other);
    }
    keys
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        let keys = shuffled_keys(size);

        // BstMap insert
        group.bench_with_input(BenchmarkId::new("BstMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BstMap::new();
                for &key in keys {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });

        // Standard BTreeMap insert
        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut map = BTreeMap::new();
                    for &key in keys {
                        map.insert(black_box(key), black_box(key * 2));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let keys = shuffled_keys(size);
        let skewed: BstMap<i32, i32> = (0..size).map(|key| (key, key * 2)).collect();
        let mut balanced = skewed.clone();
        balanced.balance();
        let standard: BTreeMap<i32, i32> = (0..size).map(|key| (key, key * 2)).collect();

        // Worst-case shape: keys were inserted in sorted order
        group.bench_with_input(
            BenchmarkId::new("BstMap/skewed", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in keys {
                        if let Some(&value) = skewed.get(&black_box(*key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        // Same content after an explicit balance()
        group.bench_with_input(
            BenchmarkId::new("BstMap/balanced", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in keys {
                        if let Some(&value) = balanced.get(&black_box(*key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        // Standard BTreeMap get
        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in keys {
                        if let Some(&value) = standard.get(&black_box(*key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// balance Benchmark
// =============================================================================

fn benchmark_balance(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("balance");

    for size in [100, 1000, 10000] {
        let skewed: BstMap<i32, i32> = (0..size).map(|key| (key, key)).collect();

        group.bench_with_input(
            BenchmarkId::new("BstMap", size),
            &skewed,
            |bencher, skewed| {
                bencher.iter(|| {
                    let mut map = skewed.clone();
                    map.balance();
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// iteration Benchmark
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iteration");

    for size in [100, 1000, 10000] {
        let keys = shuffled_keys(size);
        let map: BstMap<i32, i32> = keys.iter().map(|&key| (key, key)).collect();
        let standard: BTreeMap<i32, i32> = keys.iter().map(|&key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("BstMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = map.iter().map(|(_, &value)| i64::from(value)).sum();
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = standard.iter().map(|(_, &value)| i64::from(value)).sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_get,
    benchmark_balance,
    benchmark_iteration
);
criterion_main!(benches);
