/*!
 * Engine State
 * Every container and counter guarded by the engine lock
 */

use super::metrics::EngineStats;
use crate::core::types::{Cycle, MemoryMb, ProcessId};
use crate::process::ProcessRecord;
use crate::scheduler::{Algorithm, ProcessHeap};
use crate::signal::IoRequest;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;

/// One chart sample, taken at the start of every cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySample {
    pub cycle: Cycle,
    /// 1 if the CPU executed an instruction in the previous cycle
    pub cpu_busy: u8,
    /// Terminated processes so far
    pub terminated: usize,
}

/// Bounded sample history, oldest dropped first
#[derive(Debug)]
pub(crate) struct History {
    capacity: usize,
    samples: VecDeque<HistorySample>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, sample: HistorySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn samples(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Mutable engine state, only ever touched under the engine lock
///
/// Records move between containers by value: a record lives in exactly one
/// of the queues or the current slot.
#[derive(Debug)]
pub(crate) struct EngineState {
    pub new_queue: VecDeque<ProcessRecord>,
    pub ready: ProcessHeap,
    pub blocked: VecDeque<ProcessRecord>,
    pub suspended: VecDeque<ProcessRecord>,
    pub terminated: Vec<ProcessRecord>,
    pub current: Option<ProcessRecord>,

    pub global_cycle: Cycle,
    pub total_memory: MemoryMb,
    pub used_memory: MemoryMb,
    pub time_quantum: u32,
    pub current_quantum: u32,
    pub cpu_idle: bool,

    // Monotonic stamp source for creation and ready-queue entry
    sequence: u64,
    pub created: usize,
    pub stats: EngineStats,
    pub history: History,
    pub started_at: Option<Instant>,
}

impl EngineState {
    pub fn new(
        total_memory: MemoryMb,
        algorithm: Algorithm,
        time_quantum: u32,
        history_capacity: usize,
    ) -> Self {
        Self {
            new_queue: VecDeque::new(),
            ready: ProcessHeap::new(algorithm),
            blocked: VecDeque::new(),
            suspended: VecDeque::new(),
            terminated: Vec::new(),
            current: None,
            global_cycle: 0,
            total_memory,
            used_memory: 0,
            time_quantum: time_quantum.max(1),
            current_quantum: 0,
            cpu_idle: true,
            sequence: 0,
            created: 0,
            stats: EngineStats::default(),
            history: History::new(history_capacity),
            started_at: None,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.ready.algorithm()
    }

    /// Next value of the monotonic stamp sequence
    pub fn next_stamp(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Whether a footprint fits in the memory not yet committed
    pub fn fits(&self, footprint: MemoryMb) -> bool {
        self.used_memory
            .checked_add(footprint)
            .is_some_and(|needed| needed <= self.total_memory)
    }

    pub fn free_memory(&self) -> MemoryMb {
        self.total_memory.saturating_sub(self.used_memory)
    }

    /// Processes admitted and not yet terminated
    pub fn live_processes(&self) -> usize {
        self.ready.len()
            + self.blocked.len()
            + self.suspended.len()
            + usize::from(self.current.is_some())
    }

    /// Insert into the ready heap, stamping the moment of entry
    pub fn enqueue_ready(&mut self, mut record: ProcessRecord) {
        record.ready_stamp = self.next_stamp();
        self.ready.insert(record);
    }

    /// Completion request for the current blocking episode of a record
    pub fn io_request(record: &ProcessRecord) -> IoRequest {
        IoRequest {
            pid: record.id(),
            episode: record.io_episode(),
            service_ticks: record.exception_service_length(),
        }
    }

    /// Blocked or suspended record still in the given blocking episode
    pub fn in_service_mut(&mut self, pid: ProcessId, episode: u32) -> Option<&mut ProcessRecord> {
        self.blocked
            .iter_mut()
            .chain(self.suspended.iter_mut())
            .find(|r| r.id() == pid && r.io_episode() == episode)
    }

    /// Swap the ready heap for one ordered by another algorithm
    pub fn switch_algorithm(&mut self, algorithm: Algorithm) {
        let previous = std::mem::replace(&mut self.ready, ProcessHeap::new(algorithm));
        self.ready = previous.rebuild(algorithm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new(3);
        for cycle in 1..=5 {
            history.record(HistorySample {
                cycle,
                cpu_busy: 1,
                terminated: 0,
            });
        }
        let cycles: Vec<_> = history.samples().map(|s| s.cycle).collect();
        assert_eq!(cycles, vec![3, 4, 5]);

        history.clear();
        assert_eq!(history.samples().count(), 0);
    }

    #[test]
    fn test_fits_handles_overflow() {
        let mut state = EngineState::new(512, Algorithm::Fcfs, 4, 10);
        assert!(state.fits(512));
        assert!(!state.fits(513));
        state.used_memory = 500;
        assert!(!state.fits(MemoryMb::MAX));
        assert_eq!(state.free_memory(), 12);
    }

    #[test]
    fn test_stamps_increase() {
        let mut state = EngineState::new(512, Algorithm::Fcfs, 4, 10);
        let a = state.next_stamp();
        let b = state.next_stamp();
        assert!(b > a);
    }
}
