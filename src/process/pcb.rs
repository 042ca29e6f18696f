/*!
 * Process Control Block
 * One simulated process and its per-instruction state machine
 */

use super::types::{ExecutionOutcome, ProcessDescriptor, ProcessKind, ProcessState};
use crate::core::types::{Cycle, MemoryMb, Priority, ProcessId};
use std::sync::Arc;

/// Simulated process record
///
/// Records are moved between engine containers by value, so at any instant
/// exactly one container owns a given record. Observers only ever see
/// clones inside published snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    // Static descriptors
    id: ProcessId,
    name: Arc<str>,
    kind: ProcessKind,
    total_instructions: u32,
    exception_period: u32,
    exception_service_length: u32,
    priority: Priority,
    memory_footprint: MemoryMb,
    creation_stamp: u64,
    arrival_cycle: Cycle,

    // Run state
    pub(crate) state: ProcessState,
    program_counter: u32,
    memory_access_register: u32,
    remaining_instructions: u32,
    pub(crate) waiting_time: u64,
    pub(crate) turnaround_time: Option<Cycle>,
    pub(crate) response_time: Option<Cycle>,
    pub(crate) ready_stamp: u64,
    // Bumped on every block so a late completion can tell episodes apart
    io_episode: u32,
}

impl ProcessRecord {
    /// Create a record in `New` state
    ///
    /// `creation_stamp` must be strictly increasing across records of one
    /// engine; it drives FCFS ordering and tie-breaking.
    pub fn new(
        id: ProcessId,
        descriptor: ProcessDescriptor,
        creation_stamp: u64,
        arrival_cycle: Cycle,
    ) -> Self {
        Self {
            id,
            name: Arc::from(descriptor.name),
            kind: descriptor.kind,
            total_instructions: descriptor.total_instructions,
            exception_period: descriptor.exception_period,
            exception_service_length: descriptor.exception_service_length,
            priority: descriptor.priority,
            memory_footprint: descriptor.memory_footprint,
            creation_stamp,
            arrival_cycle,
            state: ProcessState::New,
            program_counter: 0,
            memory_access_register: 0,
            remaining_instructions: descriptor.total_instructions,
            waiting_time: 0,
            turnaround_time: None,
            response_time: None,
            ready_stamp: creation_stamp,
            io_episode: 0,
        }
    }

    /// Execute one instruction of a running process
    ///
    /// Finishing takes precedence over an I/O event landing on the same
    /// instruction. A `Blocked` outcome leaves the record in `Blocked` state;
    /// the owner is responsible for arranging its completion signal.
    pub fn execute_one_instruction(&mut self) -> ExecutionOutcome {
        debug_assert_eq!(self.state, ProcessState::Running);

        if self.remaining_instructions == 0 {
            self.state = ProcessState::Terminated;
            return ExecutionOutcome::Finished;
        }

        self.program_counter += 1;
        self.memory_access_register += 1;
        self.remaining_instructions -= 1;

        if self.remaining_instructions == 0 {
            self.state = ProcessState::Terminated;
            return ExecutionOutcome::Finished;
        }

        if self.exception_period > 0 && self.program_counter % self.exception_period == 0 {
            self.state = ProcessState::Blocked;
            self.io_episode += 1;
            return ExecutionOutcome::Blocked;
        }

        ExecutionOutcome::Continue
    }

    /// Advance the memory access register for one I/O service tick
    pub(crate) fn service_tick(&mut self) {
        self.memory_access_register += 1;
    }

    /// HRRN response ratio: (waiting + service) / service, service floored at 1
    pub fn response_ratio(&self) -> f64 {
        let service = f64::from(self.total_instructions.max(1));
        (self.waiting_time as f64 + service) / service
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    pub fn total_instructions(&self) -> u32 {
        self.total_instructions
    }

    pub fn exception_period(&self) -> u32 {
        self.exception_period
    }

    pub fn exception_service_length(&self) -> u32 {
        self.exception_service_length
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn memory_footprint(&self) -> MemoryMb {
        self.memory_footprint
    }

    pub fn creation_stamp(&self) -> u64 {
        self.creation_stamp
    }

    /// Global cycle at which the process was handed to the engine
    pub fn arrival_cycle(&self) -> Cycle {
        self.arrival_cycle
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn program_counter(&self) -> u32 {
        self.program_counter
    }

    pub fn memory_access_register(&self) -> u32 {
        self.memory_access_register
    }

    pub fn remaining_instructions(&self) -> u32 {
        self.remaining_instructions
    }

    /// Cycles spent in the ready queue so far
    pub fn waiting_time(&self) -> u64 {
        self.waiting_time
    }

    /// Global cycle at termination
    pub fn turnaround_time(&self) -> Option<Cycle> {
        self.turnaround_time
    }

    /// Global cycle of first dispatch
    pub fn response_time(&self) -> Option<Cycle> {
        self.response_time
    }

    /// Stamp of the most recent insertion into the ready queue
    pub fn ready_stamp(&self) -> u64 {
        self.ready_stamp
    }

    /// Number of times this process has blocked on I/O
    pub fn io_episode(&self) -> u32 {
        self.io_episode
    }
}
