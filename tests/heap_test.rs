/*!
 * Process Heap Tests
 * Ordering properties of the ready-queue heap under every algorithm
 */

use cpu_sched_sim::{Algorithm, ProcessDescriptor, ProcessHeap, ProcessRecord};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

fn record(id: u32, instructions: u32, priority: u32) -> ProcessRecord {
    ProcessRecord::new(
        id,
        ProcessDescriptor::cpu_bound(format!("p{}", id), instructions).with_priority(priority),
        u64::from(id),
        0,
    )
}

fn drain(heap: &mut ProcessHeap) -> Vec<ProcessRecord> {
    std::iter::from_fn(|| heap.extract_min()).collect()
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_extraction_is_sorted(
        algorithm in algorithm(),
        jobs in prop::collection::vec((1u32..500, 0u32..10), 0..80),
    ) {
        let mut heap = ProcessHeap::new(algorithm);
        for (i, &(instructions, priority)) in jobs.iter().enumerate() {
            heap.insert(record(i as u32 + 1, instructions, priority));
        }
        prop_assert_eq!(heap.order_violation(), None);

        let compare = algorithm.comparator();
        let drained = drain(&mut heap);
        prop_assert_eq!(drained.len(), jobs.len());
        for pair in drained.windows(2) {
            prop_assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn prop_remove_by_id_keeps_heap_valid(
        algorithm in algorithm(),
        jobs in prop::collection::vec((1u32..500, 0u32..10), 1..60),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut heap = ProcessHeap::new(algorithm);
        for (i, &(instructions, priority)) in jobs.iter().enumerate() {
            heap.insert(record(i as u32 + 1, instructions, priority));
        }

        let victim = pick.index(jobs.len()) as u32 + 1;
        let removed = heap.remove_by_id(victim);
        prop_assert_eq!(removed.map(|r| r.id()), Some(victim));
        prop_assert!(!heap.contains(victim));
        prop_assert_eq!(heap.len(), jobs.len() - 1);
        prop_assert_eq!(heap.order_violation(), None);
    }

    #[test]
    fn prop_root_survives_reinsertion(
        algorithm in algorithm(),
        jobs in prop::collection::vec((1u32..500, 0u32..10), 1..40),
    ) {
        let mut heap = ProcessHeap::new(algorithm);
        for (i, &(instructions, priority)) in jobs.iter().enumerate() {
            heap.insert(record(i as u32 + 1, instructions, priority));
        }

        let root = heap.extract_min().map(|r| r.id());
        if let Some(id) = root {
            let (instructions, priority) = jobs[id as usize - 1];
            heap.insert(record(id, instructions, priority));
        }
        prop_assert_eq!(heap.peek_min().map(|r| r.id()), root);
    }

    #[test]
    fn prop_rebuild_preserves_members(
        from in algorithm(),
        to in algorithm(),
        jobs in prop::collection::vec((1u32..500, 0u32..10), 0..50),
    ) {
        let mut heap = ProcessHeap::new(from);
        for (i, &(instructions, priority)) in jobs.iter().enumerate() {
            heap.insert(record(i as u32 + 1, instructions, priority));
        }

        let mut rebuilt = heap.rebuild(to);
        prop_assert_eq!(rebuilt.algorithm(), to);
        prop_assert_eq!(rebuilt.order_violation(), None);

        let mut ids: Vec<u32> = drain(&mut rebuilt).iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (1..=jobs.len() as u32).collect::<Vec<_>>());
    }
}

#[test]
fn test_interleaved_operations_against_sorted_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut heap = ProcessHeap::new(Algorithm::Sjf);
    let mut model: Vec<(u32, u64, u32)> = Vec::new();
    let mut next_id = 1;

    for _ in 0..2_000 {
        if model.is_empty() || rng.gen_bool(0.6) {
            let instructions = rng.gen_range(1..1_000);
            heap.insert(record(next_id, instructions, 0));
            model.push((instructions, u64::from(next_id), next_id));
            next_id += 1;
        } else {
            model.sort_unstable();
            let expected = model.remove(0);
            assert_eq!(heap.extract_min().map(|r| r.id()), Some(expected.2));
        }
        assert_eq!(heap.len(), model.len());
    }
}

#[test]
fn test_snapshot_holds_every_member() {
    let mut heap = ProcessHeap::new(Algorithm::Priority);
    for id in 1..=10 {
        heap.insert(record(id, 10, 10 - id));
    }
    let mut ids: Vec<u32> = heap.to_snapshot_vec().iter().map(|r| r.id()).collect();
    assert_eq!(ids[0], 10);
    ids.sort_unstable();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
}
