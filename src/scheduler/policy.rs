/*!
 * Ready-Queue Ordering Policy
 * One comparison strategy per algorithm, chosen once when a heap is built
 */

use super::types::Algorithm;
use crate::process::ProcessRecord;
use std::cmp::Ordering;

/// Comparison strategy: `Less` means "dispatch first"
pub type Comparator = fn(&ProcessRecord, &ProcessRecord) -> Ordering;

impl Algorithm {
    /// Comparison strategy for this algorithm
    pub fn comparator(self) -> Comparator {
        match self {
            Algorithm::Fcfs | Algorithm::Mlfq => by_creation,
            Algorithm::Sjf => by_total_instructions,
            Algorithm::Srtf => by_remaining_instructions,
            Algorithm::RoundRobin => by_ready_stamp,
            Algorithm::Priority => by_priority,
            Algorithm::Hrrn => by_response_ratio,
        }
    }
}

/// Deterministic tie-break shared by every policy
#[inline]
fn tie_break(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    a.creation_stamp()
        .cmp(&b.creation_stamp())
        .then_with(|| a.id().cmp(&b.id()))
}

fn by_creation(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    tie_break(a, b)
}

fn by_total_instructions(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    a.total_instructions()
        .cmp(&b.total_instructions())
        .then_with(|| tie_break(a, b))
}

fn by_remaining_instructions(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    a.remaining_instructions()
        .cmp(&b.remaining_instructions())
        .then_with(|| tie_break(a, b))
}

// Longest since last enqueue goes first, so a preempted process queues behind
// everyone already waiting
fn by_ready_stamp(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    a.ready_stamp()
        .cmp(&b.ready_stamp())
        .then_with(|| tie_break(a, b))
}

fn by_priority(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    a.priority()
        .cmp(&b.priority())
        .then_with(|| tie_break(a, b))
}

fn by_response_ratio(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    // Higher ratio first
    b.response_ratio()
        .total_cmp(&a.response_ratio())
        .then_with(|| tie_break(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessDescriptor;

    fn record(id: u32, stamp: u64, descriptor: ProcessDescriptor) -> ProcessRecord {
        ProcessRecord::new(id, descriptor, stamp, 0)
    }

    #[test]
    fn test_fcfs_orders_by_creation() {
        let older = record(2, 1, ProcessDescriptor::cpu_bound("a", 100));
        let newer = record(1, 2, ProcessDescriptor::cpu_bound("b", 1));
        let cmp = Algorithm::Fcfs.comparator();
        assert_eq!(cmp(&older, &newer), Ordering::Less);
        assert_eq!(Algorithm::Mlfq.comparator()(&older, &newer), Ordering::Less);
    }

    #[test]
    fn test_sjf_prefers_short_jobs() {
        let long = record(1, 1, ProcessDescriptor::cpu_bound("long", 100));
        let short = record(2, 2, ProcessDescriptor::cpu_bound("short", 10));
        assert_eq!(Algorithm::Sjf.comparator()(&short, &long), Ordering::Less);
    }

    #[test]
    fn test_priority_lower_value_wins() {
        let urgent = record(2, 2, ProcessDescriptor::cpu_bound("u", 10).with_priority(1));
        let lazy = record(1, 1, ProcessDescriptor::cpu_bound("l", 10).with_priority(9));
        assert_eq!(Algorithm::Priority.comparator()(&urgent, &lazy), Ordering::Less);
    }

    #[test]
    fn test_round_robin_uses_ready_stamp() {
        let mut first = record(1, 1, ProcessDescriptor::cpu_bound("a", 10));
        let second = record(2, 2, ProcessDescriptor::cpu_bound("b", 10));
        first.ready_stamp = 5;
        assert_eq!(
            Algorithm::RoundRobin.comparator()(&second, &first),
            Ordering::Less
        );
    }

    #[test]
    fn test_hrrn_prefers_higher_ratio() {
        let mut starved = record(1, 1, ProcessDescriptor::cpu_bound("s", 10));
        let fresh = record(2, 2, ProcessDescriptor::cpu_bound("f", 2));
        starved.waiting_time = 40; // ratio 5.0 vs 1.0
        assert_eq!(Algorithm::Hrrn.comparator()(&starved, &fresh), Ordering::Less);
    }

    #[test]
    fn test_ties_break_on_creation_then_id() {
        let a = record(5, 1, ProcessDescriptor::cpu_bound("a", 10));
        let b = record(3, 1, ProcessDescriptor::cpu_bound("b", 10));
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.comparator()(&b, &a), Ordering::Less, "{}", algorithm);
            assert_eq!(algorithm.comparator()(&a, &a), Ordering::Equal, "{}", algorithm);
        }
    }
}
