use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use jobpool::ThreadPool;
use rand::prelude::*;

const JOBS: u64 = 1_000;

fn pool_size() -> usize {
    num_cpus::get().clamp(1, jobpool::MAX_POOL_SIZE)
}

/// Burns a deterministic number of cycles.
fn spin(iterations: u64) -> u64 {
    let mut acc = 0u64;
    for i in 0..iterations {
        acc = acc.wrapping_add(i.wrapping_mul(31));
    }
    acc
}

fn dispatch_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_1k_trivial");
    group.sample_size(20);

    group.bench_function("jobpool", |b| {
        b.iter_batched(
            || ThreadPool::new(pool_size()).unwrap(),
            |pool| {
                let counter = Arc::new(AtomicU64::new(0));
                for _ in 0..JOBS {
                    let c = Arc::clone(&counter);
                    pool.dispatch(move || {
                        c.fetch_add(1, Ordering::Relaxed);
                    });
                }
                pool.shutdown();
                assert_eq!(counter.load(Ordering::Relaxed), JOBS);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("rayon", |b| {
        b.iter_batched(
            || {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(pool_size())
                    .build()
                    .unwrap()
            },
            |pool| {
                let counter = AtomicU64::new(0);
                pool.scope(|s| {
                    for _ in 0..JOBS {
                        s.spawn(|_| {
                            counter.fetch_add(1, Ordering::Relaxed);
                        });
                    }
                });
                assert_eq!(counter.load(Ordering::Relaxed), JOBS);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("thread_per_job", |b| {
        b.iter(|| {
            let counter = Arc::new(AtomicU64::new(0));
            let handles: Vec<_> = (0..JOBS)
                .map(|_| {
                    let c = Arc::clone(&counter);
                    std::thread::spawn(move || {
                        c.fetch_add(1, Ordering::Relaxed);
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
            assert_eq!(counter.load(Ordering::Relaxed), JOBS);
        });
    });

    group.finish();
}

fn mixed_work_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_cpu_work");
    group.sample_size(20);

    // Same workload mix for every contender and every run.
    let mut rng = StdRng::seed_from_u64(47);
    let sizes: Vec<u64> = (0..256).map(|_| rng.gen_range(1_000..50_000)).collect();

    group.bench_function("jobpool", |b| {
        b.iter_batched(
            || ThreadPool::new(pool_size()).unwrap(),
            |pool| {
                for &n in &sizes {
                    pool.dispatch(move || {
                        black_box(spin(n));
                    });
                }
                pool.shutdown();
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("rayon", |b| {
        b.iter_batched(
            || {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(pool_size())
                    .build()
                    .unwrap()
            },
            |pool| {
                pool.scope(|s| {
                    for &n in &sizes {
                        s.spawn(move |_| {
                            black_box(spin(n));
                        });
                    }
                });
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, dispatch_bench, mixed_work_bench);
criterion_main!(benches);
