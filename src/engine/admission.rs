/*!
 * Admission and Swapping
 *
 * Long-term scheduling moves the head of the new queue into memory.
 * Medium-term scheduling swaps blocked processes out when the head of the
 * new queue cannot fit, and brings suspended processes back once memory
 * frees up. Suspended processes hold no memory.
 */

use super::state::EngineState;
use crate::process::ProcessState;
use tracing::{debug, info};

impl EngineState {
    /// Admit the head of the new queue if its footprint fits
    ///
    /// Strict FIFO: a head that does not fit holds back everyone behind it.
    /// At most one admission per cycle.
    pub(super) fn admit_next(&mut self) -> bool {
        let Some(head) = self.new_queue.front() else {
            return false;
        };
        let footprint = head.memory_footprint();
        if !self.fits(footprint) {
            debug!(
                pid = head.id(),
                footprint,
                free = self.free_memory(),
                "Admission deferred"
            );
            return false;
        }

        let Some(mut record) = self.new_queue.pop_front() else {
            return false;
        };
        self.used_memory += footprint;
        record.state = ProcessState::Ready;
        self.stats.admissions += 1;
        info!(
            pid = record.id(),
            name = record.name(),
            footprint,
            used = self.used_memory,
            cycle = self.global_cycle,
            "Process admitted"
        );
        self.enqueue_ready(record);
        true
    }

    /// Bring the oldest suspended process back to READY if it fits
    pub(super) fn resume_suspended(&mut self) -> bool {
        let Some(head) = self.suspended.front() else {
            return false;
        };
        let footprint = head.memory_footprint();
        if !self.fits(footprint) {
            return false;
        }

        let Some(mut record) = self.suspended.pop_front() else {
            return false;
        };
        self.used_memory += footprint;
        record.state = ProcessState::Ready;
        self.stats.resumptions += 1;
        info!(
            pid = record.id(),
            footprint,
            used = self.used_memory,
            cycle = self.global_cycle,
            "Process resumed"
        );
        self.enqueue_ready(record);
        true
    }

    /// Swap out the oldest blocked process when the new-queue head is starved
    pub(super) fn suspend_for_pressure(&mut self) -> bool {
        let Some(head) = self.new_queue.front() else {
            return false;
        };
        if self.blocked.is_empty() || self.fits(head.memory_footprint()) {
            return false;
        }

        let Some(mut victim) = self.blocked.pop_front() else {
            return false;
        };
        let footprint = victim.memory_footprint();
        self.used_memory = self.used_memory.saturating_sub(footprint);
        victim.state = ProcessState::Suspended;
        self.stats.suspensions += 1;
        info!(
            pid = victim.id(),
            footprint,
            used = self.used_memory,
            cycle = self.global_cycle,
            "Process suspended"
        );
        self.suspended.push_back(victim);
        true
    }
}
