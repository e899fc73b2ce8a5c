/*!
 * Shared Memory Benchmarks
 *
 * Compare contention on one hot key against writes spread across many keys
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use smp_sim::SharedMemory;
use std::thread;

const OPS_PER_THREAD: usize = 1_000;

fn bench_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_thread");
    let memory = SharedMemory::new();
    memory.write("x", 0);

    group.bench_function("read", |b| b.iter(|| black_box(memory.read(black_box("x")))));
    group.bench_function("write", |b| b.iter(|| memory.write(black_box("x"), black_box(42))));
    group.bench_function("update", |b| {
        b.iter(|| black_box(memory.update(black_box("x"), |v| v.wrapping_add(1))))
    });

    group.finish();
}

fn bench_hot_key_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("hot_key_updates");

    for threads in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let memory = SharedMemory::new();
            memory.write("hot", 0);

            b.iter(|| {
                thread::scope(|scope| {
                    for _ in 0..threads {
                        let memory = &memory;
                        scope.spawn(move || {
                            for _ in 0..OPS_PER_THREAD {
                                memory.update("hot", |v| v.wrapping_add(1));
                            }
                        });
                    }
                });
            });
        });
    }

    group.finish();
}

fn bench_spread_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("spread_writes");

    for threads in [1usize, 2, 4, 8] {
        let keys: Vec<Vec<String>> = (0..threads)
            .map(|t| (0..64).map(|k| format!("t{}_k{}", t, k)).collect())
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(threads), &keys, |b, keys| {
            let memory = SharedMemory::new();

            b.iter(|| {
                thread::scope(|scope| {
                    for own in keys {
                        let memory = &memory;
                        scope.spawn(move || {
                            for i in 0..OPS_PER_THREAD {
                                memory.write(own[i % own.len()].as_str(), i as i64);
                            }
                        });
                    }
                });
            });
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for size in [16usize, 256, 4096] {
        let memory = SharedMemory::new();
        for i in 0..size {
            memory.write(format!("k{}", i), i as i64);
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &memory, |b, memory| {
            b.iter(|| black_box(memory.snapshot()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_thread,
    bench_hot_key_updates,
    bench_spread_writes,
    bench_snapshot
);
criterion_main!(benches);
