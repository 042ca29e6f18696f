/*!
 * Engine Snapshots
 *
 * Copies of every container and counter, republished after each mutation.
 * Readers load an `Arc` without touching the engine lock, so a UI thread
 * never stalls the cycle loop.
 */

use super::metrics::{EngineStats, PerformanceMetrics};
use super::state::{EngineState, HistorySample};
use super::Engine;
use crate::core::sync::RcuCell;
use crate::core::types::{Cycle, MemoryMb};
use crate::process::{ProcessRecord, TerminatedRecord};
use crate::scheduler::Algorithm;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Scalar engine state at the last publish
#[derive(Debug, Clone, Default)]
pub struct EngineStatus {
    pub global_cycle: Cycle,
    pub cpu_idle: bool,
    pub algorithm: Algorithm,
    pub time_quantum: u32,
    pub current_quantum: u32,
    pub used_memory: MemoryMb,
    pub total_memory: MemoryMb,
    /// Admitted, not yet terminated
    pub live_processes: usize,
    pub stats: EngineStats,
    pub started_at: Option<Instant>,
}

/// Chart series, aligned by index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub cycles: Vec<Cycle>,
    pub cpu_busy: Vec<u8>,
    pub terminated: Vec<usize>,
}

impl HistorySnapshot {
    fn collect<'a>(samples: impl Iterator<Item = &'a HistorySample>) -> Self {
        let mut snapshot = Self::default();
        for sample in samples {
            snapshot.cycles.push(sample.cycle);
            snapshot.cpu_busy.push(sample.cpu_busy);
            snapshot.terminated.push(sample.terminated);
        }
        snapshot
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Published copies of engine state
#[derive(Default)]
pub(crate) struct Snapshots {
    new_queue: RcuCell<Vec<ProcessRecord>>,
    ready: RcuCell<Vec<ProcessRecord>>,
    blocked: RcuCell<Vec<ProcessRecord>>,
    suspended: RcuCell<Vec<ProcessRecord>>,
    terminated: RcuCell<Vec<ProcessRecord>>,
    current: RcuCell<Option<ProcessRecord>>,
    history: RcuCell<HistorySnapshot>,
    status: RcuCell<EngineStatus>,
}

impl Snapshots {
    pub fn publish(&self, state: &EngineState) {
        self.new_queue.store(state.new_queue.iter().cloned().collect());
        self.ready.store(state.ready.to_snapshot_vec());
        self.blocked.store(state.blocked.iter().cloned().collect());
        self.suspended.store(state.suspended.iter().cloned().collect());
        self.terminated.store(state.terminated.clone());
        self.current.store(state.current.clone());
        self.history
            .store(HistorySnapshot::collect(state.history.samples()));
        self.status.store(EngineStatus {
            global_cycle: state.global_cycle,
            cpu_idle: state.cpu_idle,
            algorithm: state.algorithm(),
            time_quantum: state.time_quantum,
            current_quantum: state.current_quantum,
            used_memory: state.used_memory,
            total_memory: state.total_memory,
            live_processes: state.live_processes(),
            stats: state.stats,
            started_at: state.started_at,
        });
    }
}

impl Engine {
    pub(super) fn publish(&self, state: &EngineState) {
        self.shared.snapshots.publish(state);
    }

    /// Processes waiting for admission, oldest first
    pub fn new_queue_snapshot(&self) -> Arc<Vec<ProcessRecord>> {
        self.shared.snapshots.new_queue.load()
    }

    /// Ready processes in heap-array order
    pub fn ready_queue_snapshot(&self) -> Arc<Vec<ProcessRecord>> {
        self.shared.snapshots.ready.load()
    }

    pub fn blocked_queue_snapshot(&self) -> Arc<Vec<ProcessRecord>> {
        self.shared.snapshots.blocked.load()
    }

    pub fn suspended_queue_snapshot(&self) -> Arc<Vec<ProcessRecord>> {
        self.shared.snapshots.suspended.load()
    }

    /// Terminated processes in completion order
    pub fn terminated_snapshot(&self) -> Arc<Vec<ProcessRecord>> {
        self.shared.snapshots.terminated.load()
    }

    pub fn current_process_snapshot(&self) -> Option<ProcessRecord> {
        (*self.shared.snapshots.current.load()).clone()
    }

    /// Terminated processes as table rows
    pub fn terminated_table(&self) -> Vec<TerminatedRecord> {
        self.terminated_snapshot()
            .iter()
            .map(TerminatedRecord::from)
            .collect()
    }

    pub fn status(&self) -> Arc<EngineStatus> {
        self.shared.snapshots.status.load()
    }

    pub fn global_cycle(&self) -> Cycle {
        self.status().global_cycle
    }

    pub fn is_cpu_idle(&self) -> bool {
        self.status().cpu_idle
    }

    pub fn algorithm(&self) -> Algorithm {
        self.status().algorithm
    }

    pub fn time_quantum(&self) -> u32 {
        self.status().time_quantum
    }

    pub fn used_memory(&self) -> MemoryMb {
        self.status().used_memory
    }

    pub fn total_memory(&self) -> MemoryMb {
        self.status().total_memory
    }

    pub fn stats(&self) -> EngineStats {
        self.status().stats
    }

    pub fn performance_metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::compute(&self.status(), Instant::now())
    }

    pub fn history(&self) -> Arc<HistorySnapshot> {
        self.shared.snapshots.history.load()
    }

    pub fn cycle_history(&self) -> Vec<Cycle> {
        self.history().cycles.clone()
    }

    pub fn cpu_usage_history(&self) -> Vec<u8> {
        self.history().cpu_busy.clone()
    }

    pub fn terminated_history(&self) -> Vec<usize> {
        self.history().terminated.clone()
    }

    pub fn cycle_duration(&self) -> Duration {
        Duration::from_millis(
            self.shared
                .cycle_duration_ms
                .load(std::sync::atomic::Ordering::Relaxed),
        )
    }
}
