/*!
 * Invariant Tests
 * Random operation sequences must keep ownership and memory accounting intact
 */

use cpu_sched_sim::{
    Algorithm, Engine, EngineBuilder, ProcessDescriptor, QueueLocation, SimulationConfig,
    VirtualClock,
};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Add {
        instructions: u32,
        period: u32,
        service: u32,
        memory: u32,
        priority: u32,
    },
    Advance(u8),
    Tick(u8),
    Switch(Algorithm),
    Unblock(u32),
    Quantum(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1u32..40, 0u32..6, 0u32..5, 0u32..300, 0u32..5).prop_map(
            |(instructions, period, service, memory, priority)| Op::Add {
                instructions,
                period,
                service,
                memory,
                priority,
            }
        ),
        4 => (1u8..8).prop_map(Op::Advance),
        2 => (1u8..4).prop_map(Op::Tick),
        1 => prop::sample::select(Algorithm::ALL.to_vec()).prop_map(Op::Switch),
        1 => (1u32..20).prop_map(Op::Unblock),
        1 => (0u32..6).prop_map(Op::Quantum),
    ]
}

fn engine(total_memory: u32) -> (Engine, VirtualClock) {
    let clock = VirtualClock::new();
    let engine = EngineBuilder::new(SimulationConfig::new(total_memory, Algorithm::Fcfs, 10))
        .with_signaler(Arc::new(clock.clone()))
        .build();
    engine.start_stepped();
    (engine, clock)
}

fn apply(engine: &Engine, clock: &VirtualClock, op: &Op) {
    match *op {
        Op::Add {
            instructions,
            period,
            service,
            memory,
            priority,
        } => {
            engine.add_process(
                ProcessDescriptor::cpu_bound("prop", instructions)
                    .with_exceptions(period, service)
                    .with_memory(memory)
                    .with_priority(priority),
            );
        }
        Op::Advance(cycles) => {
            for _ in 0..cycles {
                engine.advance_cycle();
            }
        }
        Op::Tick(ticks) => {
            clock.advance(u32::from(ticks));
        }
        Op::Switch(algorithm) => engine.set_scheduling_algorithm(algorithm),
        Op::Unblock(pid) => engine.unblock_process(pid),
        Op::Quantum(quantum) => engine.set_time_quantum(quantum),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariants_hold_after_every_operation(
        total_memory in 64u32..1024,
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let (engine, clock) = engine(total_memory);

        for op in &ops {
            apply(&engine, &clock, op);
            prop_assert_eq!(engine.check_invariants(), Ok(()), "after {:?}", op);

            let status = engine.status();
            prop_assert!(status.used_memory <= status.total_memory);
        }
    }

    #[test]
    fn prop_every_process_eventually_terminates(
        jobs in prop::collection::vec((1u32..20, 0u32..4, 0u32..3, 0u32..200), 1..8),
    ) {
        let (engine, clock) = engine(256);
        let pids: Vec<u32> = jobs
            .iter()
            .map(|&(instructions, period, service, memory)| {
                engine.add_process(
                    ProcessDescriptor::cpu_bound("job", instructions)
                        .with_exceptions(period, service)
                        .with_memory(memory),
                )
            })
            .collect();

        for _ in 0..2_000 {
            engine.advance_cycle();
            clock.advance(1);
            if engine.stats().completed == pids.len() as u64 {
                break;
            }
        }

        for pid in pids {
            prop_assert_eq!(engine.locate(pid), Some(QueueLocation::Terminated));
        }
        prop_assert_eq!(engine.used_memory(), 0);
        prop_assert_eq!(engine.check_invariants(), Ok(()));
    }
}
