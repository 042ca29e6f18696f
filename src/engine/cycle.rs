/*!
 * Cycle Step
 *
 * One simulated clock tick: sample history, admit, resume, suspend,
 * dispatch, execute one instruction, accrue waiting time.
 */

use super::state::{EngineState, HistorySample};
use super::Engine;
use crate::core::types::Cycle;
use crate::process::{ExecutionOutcome, ProcessState};
use crate::signal::IoRequest;
use tracing::{debug, info, trace, warn};

/// Blocked-queue length above which each new block is logged as a warning
const BLOCKED_WARN_THRESHOLD: usize = 5;

impl EngineState {
    /// Run one full cycle, returning the process that blocked, if any
    pub(super) fn run_cycle(&mut self) -> Option<IoRequest> {
        self.global_cycle += 1;
        self.history.record(HistorySample {
            cycle: self.global_cycle,
            cpu_busy: u8::from(!self.cpu_idle),
            terminated: self.terminated.len(),
        });

        self.admit_next();
        // Resume before suspending so a process swapped out this cycle
        // is not swapped straight back in
        self.resume_suspended();
        self.suspend_for_pressure();

        self.cpu_idle = self.current.is_none();
        if self.needs_dispatch() {
            self.dispatch();
        }

        let pending = self.execute_current();
        self.accrue_waiting();
        pending
    }

    fn needs_dispatch(&self) -> bool {
        match &self.current {
            None => true,
            Some(record) if record.state != ProcessState::Running => true,
            Some(_) => {
                self.algorithm().is_time_sliced() && self.current_quantum >= self.time_quantum
            }
        }
    }

    /// Put the running process back in the ready heap and pick the minimum
    pub(super) fn dispatch(&mut self) {
        if let Some(mut previous) = self.current.take() {
            debug_assert_eq!(previous.state, ProcessState::Running);
            previous.state = ProcessState::Ready;
            self.stats.preemptions += 1;
            trace!(pid = previous.id(), quantum = self.current_quantum, "Process preempted");
            self.enqueue_ready(previous);
        }

        let Some(mut next) = self.ready.extract_min() else {
            return;
        };
        next.state = ProcessState::Running;
        if next.response_time.is_none() {
            next.response_time = Some(self.global_cycle);
        }
        self.current_quantum = 0;
        self.stats.dispatches += 1;
        debug!(
            pid = next.id(),
            algorithm = %self.algorithm(),
            cycle = self.global_cycle,
            "Process dispatched"
        );
        self.current = Some(next);
    }

    /// Execute one instruction of the running process and react to it
    fn execute_current(&mut self) -> Option<IoRequest> {
        let outcome = match self.current.as_mut() {
            Some(record) if record.state == ProcessState::Running => {
                record.execute_one_instruction()
            }
            _ => return None,
        };

        self.stats.busy_cycles += 1;
        self.cpu_idle = false;

        match outcome {
            ExecutionOutcome::Continue => {
                self.current_quantum += 1;
                None
            }
            ExecutionOutcome::Finished => {
                let mut done = self.current.take()?;
                done.turnaround_time = Some(self.global_cycle);
                self.used_memory = self.used_memory.saturating_sub(done.memory_footprint());
                self.stats.completed += 1;
                if let Some(first_dispatch) = done.response_time {
                    self.stats.response_cycles +=
                        first_dispatch.saturating_sub(done.arrival_cycle());
                }
                info!(
                    pid = done.id(),
                    name = done.name(),
                    turnaround = self.global_cycle,
                    waiting = done.waiting_time,
                    "Process terminated"
                );
                self.terminated.push(done);
                None
            }
            ExecutionOutcome::Blocked => {
                let blocked = self.current.take()?;
                let request = EngineState::io_request(&blocked);
                self.stats.blocks += 1;
                debug!(
                    pid = blocked.id(),
                    pc = blocked.program_counter(),
                    episode = request.episode,
                    service_ticks = request.service_ticks,
                    "Process blocked on I/O"
                );
                self.blocked.push_back(blocked);
                if self.blocked.len() > BLOCKED_WARN_THRESHOLD {
                    warn!(
                        blocked = self.blocked.len(),
                        cycle = self.global_cycle,
                        "Many processes blocked on I/O"
                    );
                }
                Some(request)
            }
        }
    }

    /// Every ready process waits one more cycle
    fn accrue_waiting(&mut self) {
        self.stats.wait_cycles += self.ready.len() as u64;
        // Waiting time feeds the HRRN key, so the heap is re-ordered
        self.ready.update_all(|record| record.waiting_time += 1);
    }
}

impl Engine {
    /// Advance the simulation by one cycle
    ///
    /// Returns the new global cycle, or `None` when the engine is not
    /// running. The driver calls this once per cycle duration; stepped
    /// engines call it directly.
    pub fn advance_cycle(&self) -> Option<Cycle> {
        if !self.is_running() {
            return None;
        }

        let mut state = self.shared.state.lock();
        // Shutdown may have landed while we waited for the lock
        if !self.is_running() {
            return None;
        }

        if let Some(request) = state.run_cycle() {
            self.arm_completion(request);
        }
        self.publish(&state);

        trace!(
            cycle = state.global_cycle,
            idle = state.cpu_idle,
            ready = state.ready.len(),
            used = state.used_memory,
            "Cycle complete"
        );
        Some(state.global_cycle)
    }

    /// Hand a freshly blocked process to the completion signaler
    ///
    /// Runs with the engine lock held; signalers never call back
    /// synchronously.
    pub(super) fn arm_completion(&self, request: IoRequest) {
        self.shared.signaler.arm(request, self.downgrade());
    }
}
