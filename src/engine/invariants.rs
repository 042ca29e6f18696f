/*!
 * Invariant Audit
 * Ownership, state, and memory accounting checks over a locked state
 */

use super::state::EngineState;
use super::{Engine, QueueLocation};
use crate::core::errors::InvariantViolation;
use crate::core::types::{MemoryMb, ProcessId};
use crate::process::{ProcessRecord, ProcessState};
use ahash::AHashSet;

impl EngineState {
    /// Every record paired with the container holding it
    fn census(&self) -> impl Iterator<Item = (&ProcessRecord, QueueLocation)> {
        let new = self.new_queue.iter().map(|r| (r, QueueLocation::New));
        let ready = self.ready.iter().map(|r| (r, QueueLocation::Ready));
        let blocked = self.blocked.iter().map(|r| (r, QueueLocation::Blocked));
        let suspended = self.suspended.iter().map(|r| (r, QueueLocation::Suspended));
        let terminated = self.terminated.iter().map(|r| (r, QueueLocation::Terminated));
        let current = self.current.iter().map(|r| (r, QueueLocation::Current));

        new.chain(ready)
            .chain(blocked)
            .chain(suspended)
            .chain(terminated)
            .chain(current)
    }

    pub(super) fn locate(&self, pid: ProcessId) -> Option<QueueLocation> {
        self.census()
            .find(|(record, _)| record.id() == pid)
            .map(|(_, location)| location)
    }

    pub(super) fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = AHashSet::with_capacity(self.created);
        let mut found = 0usize;

        for (record, location) in self.census() {
            found += 1;
            if !seen.insert(record.id()) {
                return Err(InvariantViolation::DuplicateOwner(record.id()));
            }
            if record.state() != location.expected_state() {
                return Err(InvariantViolation::StateMismatch {
                    pid: record.id(),
                    state: record.state().to_string(),
                    location: location.to_string(),
                });
            }
        }

        if found != self.created {
            return Err(InvariantViolation::LostProcess {
                expected: self.created,
                found,
            });
        }

        if self.used_memory > self.total_memory {
            return Err(InvariantViolation::MemoryOverCommit {
                used: self.used_memory,
                total: self.total_memory,
            });
        }

        // Only READY, BLOCKED and RUNNING processes hold memory
        let resident: MemoryMb = self
            .ready
            .iter()
            .chain(self.blocked.iter())
            .chain(self.current.iter())
            .map(ProcessRecord::memory_footprint)
            .sum();
        if resident != self.used_memory {
            return Err(InvariantViolation::MemoryAccounting {
                used: self.used_memory,
                expected: resident,
            });
        }

        if let Some(index) = self.ready.order_violation() {
            return Err(InvariantViolation::HeapOrder(index));
        }

        Ok(())
    }
}

impl QueueLocation {
    /// State a record must carry while held here
    pub fn expected_state(self) -> ProcessState {
        match self {
            QueueLocation::New => ProcessState::New,
            QueueLocation::Ready => ProcessState::Ready,
            QueueLocation::Blocked => ProcessState::Blocked,
            QueueLocation::Suspended => ProcessState::Suspended,
            QueueLocation::Terminated => ProcessState::Terminated,
            QueueLocation::Current => ProcessState::Running,
        }
    }
}

impl Engine {
    /// Which container currently owns a process
    pub fn locate(&self, pid: ProcessId) -> Option<QueueLocation> {
        self.shared.state.lock().locate(pid)
    }

    /// Audit ownership, states, memory accounting, and heap order
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.shared.state.lock().check_invariants()
    }
}
