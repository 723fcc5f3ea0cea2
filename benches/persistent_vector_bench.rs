//! Benchmark for PersistentVector vs standard Vec.
//!
//! Compares the persistent trie against Rust's standard Vec for the
//! operations a vector version supports.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lambars_vector::persistent::PersistentVector;
use std::hint::black_box;

// =============================================================================
// push_back Benchmark (Single Append Around Height Thresholds)
// =============================================================================

/// Lengths just below and at each capacity boundary. Appending to a full trie
/// adds a root level, every other append copies the rightmost spine.
const THRESHOLD_LENGTHS: [usize; 6] = [31, 32, 1023, 1024, 32_767, 32_768];

fn benchmark_push_back(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("push_back");

    for length in THRESHOLD_LENGTHS {
        let base: PersistentVector<usize> = (0..length).collect();

        group.bench_with_input(
            BenchmarkId::new("single_append", length),
            &base,
            |bencher, base| {
                bencher.iter(|| black_box(base.push_back(black_box(length))));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("try_push_back", length),
            &base,
            |bencher, base| {
                bencher.iter(|| black_box(base.try_push_back(black_box(length))));
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark (Random Access)
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000, 100_000] {
        let persistent_vector: PersistentVector<i32> = (0..size).collect();
        let standard_vector: Vec<i32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentVector", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0_i64;
                    for index in 0..size as usize {
                        if let Ok(&value) = persistent_vector.get(black_box(index)) {
                            sum += i64::from(value);
                        }
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0_i64;
                for index in 0..size as usize {
                    if let Some(&value) = standard_vector.get(black_box(index)) {
                        sum += i64::from(value);
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// update Benchmark
// =============================================================================

fn benchmark_update(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("update");

    for size in [100, 1000, 10000, 100_000] {
        let persistent_vector: PersistentVector<i32> = (0..size).collect();
        let standard_vector: Vec<i32> = (0..size).collect();

        // Path copy only, the original stays intact
        group.bench_with_input(
            BenchmarkId::new("PersistentVector", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let index = (size / 2) as usize;
                    let updated = persistent_vector.update(black_box(index), black_box(999));
                    black_box(updated)
                });
            },
        );

        // Full copy gives Vec the same guarantee
        group.bench_with_input(
            BenchmarkId::new("Vec_clone", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut cloned = standard_vector.clone();
                    let index = (size / 2) as usize;
                    cloned[black_box(index)] = black_box(999);
                    black_box(cloned)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// pop_back Benchmark
// =============================================================================

fn benchmark_pop_back(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pop_back");

    for size in [1000, 10000] {
        let persistent_vector: PersistentVector<i32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentVector_drain", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let mut vector = persistent_vector.clone();
                    while let Ok(shorter) = vector.pop_back() {
                        vector = shorter;
                    }
                    black_box(vector)
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

    for size in [1_000, 100_000, 1_000_000] {
        let persistent_vector: PersistentVector<i64> = (0..size).collect();
        let standard_vector: Vec<i64> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentVector", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let sum: i64 = persistent_vector.iter().sum();
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = standard_vector.iter().sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Construction Benchmark
// =============================================================================

fn benchmark_construction(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("construction");

    // 1025 and 32769 each force one more level than the length before them
    for size in [1024_usize, 1025, 32_768, 32_769] {
        group.bench_with_input(BenchmarkId::new("collect", size), &size, |bencher, &size| {
            bencher.iter(|| black_box((0..size).collect::<PersistentVector<usize>>()));
        });

        group.bench_with_input(
            BenchmarkId::new("push_back_many", size),
            &size,
            |bencher, &size| {
                let seed = PersistentVector::singleton(0_usize);
                bencher.iter(|| black_box(seed.push_back_many(1..size)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("Vec_collect_then_from_sequence", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let staged: Vec<usize> = (0..size).collect();
                    black_box(PersistentVector::from_sequence(staged))
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_push_back,
    benchmark_get,
    benchmark_update,
    benchmark_pop_back,
    benchmark_iteration,
    benchmark_construction
);

criterion_main!(benches);
