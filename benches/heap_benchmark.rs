/*!
 * Scheduling Benchmarks
 *
 * Heap throughput per algorithm and full engine cycles under load
 */

use cpu_sched_sim::{
    Algorithm, EngineBuilder, ProcessDescriptor, ProcessHeap, ProcessRecord, SimulationConfig,
    VirtualClock,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

fn records(n: u32) -> Vec<ProcessRecord> {
    (1..=n)
        .map(|id| {
            let instructions = (id * 7919) % 1_000 + 1;
            let descriptor = ProcessDescriptor::cpu_bound(format!("p{}", id), instructions)
                .with_priority(id % 16);
            ProcessRecord::new(id, descriptor, u64::from(id), 0)
        })
        .collect()
}

fn bench_insert_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_insert_extract");
    let input = records(1_000);

    for algorithm in Algorithm::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm),
            &input,
            |b, input| {
                b.iter(|| {
                    let mut heap = ProcessHeap::new(algorithm);
                    for record in input.iter().cloned() {
                        heap.insert(record);
                    }
                    while let Some(record) = heap.extract_min() {
                        black_box(record);
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_rebuild");

    for size in [10u32, 100, 1_000] {
        let input = records(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let mut heap = ProcessHeap::new(Algorithm::Fcfs);
                for record in input.iter().cloned() {
                    heap.insert(record);
                }
                black_box(heap.rebuild(Algorithm::Hrrn));
            });
        });
    }

    group.finish();
}

fn bench_engine_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_cycles");

    for algorithm in [Algorithm::Fcfs, Algorithm::RoundRobin, Algorithm::Hrrn] {
        group.bench_function(BenchmarkId::from_parameter(algorithm), |b| {
            b.iter(|| {
                let clock = VirtualClock::new();
                let engine = EngineBuilder::new(SimulationConfig::new(4_096, algorithm, 1))
                    .with_signaler(Arc::new(clock.clone()))
                    .build();
                for i in 0..50 {
                    engine.add_process(
                        ProcessDescriptor::io_bound(format!("p{}", i), 40, 7, 3).with_memory(64),
                    );
                }
                engine.start_stepped();
                for _ in 0..500 {
                    engine.advance_cycle();
                    clock.advance(1);
                }
                black_box(engine.performance_metrics());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert_extract, bench_rebuild, bench_engine_cycles);
criterion_main!(benches);
