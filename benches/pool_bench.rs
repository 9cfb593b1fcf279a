use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use crossbeam_utils::sync::WaitGroup;
use rand::prelude::*;
use taskpool::{PoolConfig, ThreadPool};

/// Submit a batch of small CPU-bound tasks and wait for all of them.
fn throughput_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_wait_100");

    for threads in [1u32, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(threads),
            &threads,
            |b, &threads| {
                b.iter_batched(
                    || {
                        let mut rng = rand::thread_rng();
                        let pool = ThreadPool::with_config(PoolConfig {
                            threads,
                            queue_capacity: 1024,
                            ..PoolConfig::default()
                        })
                        .unwrap();
                        let spins: Vec<u64> =
                            (0..100).map(|_| rng.gen_range(100..1000)).collect();
                        (pool, spins)
                    },
                    |(pool, spins)| {
                        let wg = WaitGroup::new();
                        for n in spins {
                            let wg = wg.clone();
                            pool.spawn(move || {
                                let mut acc = 0u64;
                                for i in 0..n {
                                    acc = acc.wrapping_add(i);
                                }
                                std::hint::black_box(acc);
                                drop(wg);
                            })
                            .unwrap();
                        }
                        wg.wait();
                        // Dropped (and joined) outside the measurement.
                        pool
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Cost of spinning up and tearing down the worker set.
fn lifecycle_bench(c: &mut Criterion) {
    c.bench_function("create_shutdown_4_workers", |b| {
        b.iter(|| {
            let mut pool = ThreadPool::new(4).unwrap();
            pool.shutdown().unwrap();
        });
    });
}

criterion_group!(benches, throughput_bench, lifecycle_bench);
criterion_main!(benches);
