/*!
 * Engine Operations
 * Mutators callable from any thread; each takes the engine lock once and republishes
 */

use super::state::EngineState;
use super::Engine;
use crate::core::config::{MAX_CYCLE_MS, MIN_CYCLE_MS};
use crate::core::errors::ConfigError;
use crate::core::types::ProcessId;
use crate::process::{ProcessDescriptor, ProcessRecord, ProcessState};
use crate::scheduler::Algorithm;
use crate::signal::IoRequest;
use std::sync::atomic::Ordering;
use tracing::{debug, info, warn};

impl Engine {
    /// Queue a new process for admission
    ///
    /// The process arrives at the current global cycle. A footprint larger
    /// than the whole memory budget is accepted but can never be admitted.
    pub fn add_process(&self, descriptor: ProcessDescriptor) -> ProcessId {
        let mut state = self.shared.state.lock();

        if descriptor.memory_footprint > state.total_memory {
            warn!(
                name = %descriptor.name,
                footprint = descriptor.memory_footprint,
                total = state.total_memory,
                "Process footprint exceeds total memory; it will never be admitted"
            );
        }

        let pid = self.shared.ids.next();
        let stamp = state.next_stamp();
        let record = ProcessRecord::new(pid, descriptor, stamp, state.global_cycle);
        info!(
            pid,
            name = record.name(),
            instructions = record.total_instructions(),
            footprint = record.memory_footprint(),
            cycle = state.global_cycle,
            "Process created"
        );
        state.new_queue.push_back(record);
        state.created += 1;

        self.publish(&state);
        pid
    }

    /// Validate a descriptor against the memory budget, then queue it
    pub fn try_add_process(&self, descriptor: ProcessDescriptor) -> Result<ProcessId, ConfigError> {
        descriptor.validate(self.total_memory())?;
        Ok(self.add_process(descriptor))
    }

    /// Move a blocked process back to READY
    ///
    /// No-op when the process is not in the blocked queue, e.g. it was
    /// suspended in the meantime or already unblocked.
    pub fn unblock_process(&self, pid: ProcessId) {
        let mut state = self.shared.state.lock();
        let Some(index) = state.blocked.iter().position(|r| r.id() == pid) else {
            debug!(pid, "Unblock ignored, process not blocked");
            return;
        };
        self.release_blocked(&mut state, index);
    }

    /// Deliver the completion of one blocking episode
    ///
    /// Unlike `unblock_process`, a completion for an earlier episode of the
    /// same process is ignored. Returns whether the process was unblocked.
    pub fn complete_io(&self, request: IoRequest) -> bool {
        let mut state = self.shared.state.lock();
        let Some(index) = state
            .blocked
            .iter()
            .position(|r| r.id() == request.pid && r.io_episode() == request.episode)
        else {
            debug!(
                pid = request.pid,
                episode = request.episode,
                "Stale or undeliverable I/O completion ignored"
            );
            return false;
        };
        self.release_blocked(&mut state, index);
        true
    }

    fn release_blocked(&self, state: &mut EngineState, index: usize) {
        let Some(mut record) = state.blocked.remove(index) else {
            return;
        };
        record.state = ProcessState::Ready;
        state.stats.unblocks += 1;
        debug!(pid = record.id(), cycle = state.global_cycle, "Process unblocked");
        state.enqueue_ready(record);

        self.publish(state);
    }

    /// Advance the memory access register of a process in I/O service
    ///
    /// Returns false if the process is neither blocked nor suspended.
    pub fn service_tick(&self, pid: ProcessId) -> bool {
        let mut state = self.shared.state.lock();

        let state = &mut *state;
        let serviced = state
            .blocked
            .iter_mut()
            .chain(state.suspended.iter_mut())
            .find(|r| r.id() == pid)
            .map(ProcessRecord::service_tick)
            .is_some();

        if serviced {
            self.publish(state);
        }
        serviced
    }

    /// Service tick for one blocking episode; ticks from earlier episodes are dropped
    pub fn service_io(&self, request: IoRequest) -> bool {
        let mut state = self.shared.state.lock();
        let serviced = state
            .in_service_mut(request.pid, request.episode)
            .map(ProcessRecord::service_tick)
            .is_some();

        if serviced {
            self.publish(&state);
        }
        serviced
    }

    /// Reorder the ready queue under another algorithm
    ///
    /// The running process keeps the CPU until the next dispatch.
    pub fn set_scheduling_algorithm(&self, algorithm: Algorithm) {
        let mut state = self.shared.state.lock();
        let previous = state.algorithm();
        if previous == algorithm {
            return;
        }

        state.switch_algorithm(algorithm);
        info!(
            from = %previous,
            to = %algorithm,
            ready = state.ready.len(),
            "Scheduling algorithm changed"
        );

        self.publish(&state);
    }

    /// Change the pause between cycles, clamped to the accepted range
    ///
    /// Takes effect from the driver's next sleep.
    pub fn set_cycle_duration(&self, cycle_ms: u64) {
        let clamped = cycle_ms.clamp(MIN_CYCLE_MS, MAX_CYCLE_MS);
        if clamped != cycle_ms {
            warn!(requested = cycle_ms, applied = clamped, "Cycle duration clamped");
        }
        let state = self.shared.state.lock();
        self.shared
            .cycle_duration_ms
            .store(clamped, Ordering::Relaxed);
        debug!(cycle_ms = clamped, cycle = state.global_cycle, "Cycle duration updated");
        self.publish(&state);
    }

    /// Change the round-robin quantum; zero is raised to one
    pub fn set_time_quantum(&self, quantum: u32) {
        let mut state = self.shared.state.lock();
        state.time_quantum = quantum.max(1);
        debug!(quantum = state.time_quantum, "Time quantum updated");
        self.publish(&state);
    }
}
