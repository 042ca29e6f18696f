/*!
 * Process Types
 * Common types for simulated processes
 */

use super::pcb::ProcessRecord;
use crate::core::types::{MemoryMb, Priority, ProcessId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Created, waiting for admission
    New,
    /// Admitted and waiting for the CPU
    Ready,
    /// Holding the CPU this cycle
    Running,
    /// Waiting on a simulated I/O completion
    Blocked,
    /// Swapped out to free memory
    Suspended,
    /// Finished all instructions
    Terminated,
}

impl ProcessState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Blocked => "BLOCKED",
            Self::Suspended => "SUSPENDED",
            Self::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workload classification, informational for observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessKind {
    CpuBound,
    IoBound,
}

/// Result of executing one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Process stays on the CPU
    Continue,
    /// Process raised an I/O event and must wait for its completion
    Blocked,
    /// Process has no instructions left
    Finished,
}

/// Everything a collaborator supplies to create a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDescriptor {
    pub name: String,
    pub kind: ProcessKind,
    pub total_instructions: u32,
    /// Instructions between induced I/O events; 0 disables them
    #[serde(default)]
    pub exception_period: u32,
    /// Service ticks needed to complete one I/O event
    #[serde(default)]
    pub exception_service_length: u32,
    #[serde(default)]
    pub priority: Priority,
    pub memory_footprint: MemoryMb,
}

impl ProcessDescriptor {
    /// Compute-heavy process that never blocks
    pub fn cpu_bound(name: impl Into<String>, total_instructions: u32) -> Self {
        Self {
            name: name.into(),
            kind: ProcessKind::CpuBound,
            total_instructions,
            exception_period: 0,
            exception_service_length: 0,
            priority: 0,
            memory_footprint: 0,
        }
    }

    /// Process that blocks every `period` instructions for `service_length` ticks
    pub fn io_bound(
        name: impl Into<String>,
        total_instructions: u32,
        period: u32,
        service_length: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ProcessKind::IoBound,
            total_instructions,
            exception_period: period,
            exception_service_length: service_length,
            priority: 0,
            memory_footprint: 0,
        }
    }

    pub fn with_exceptions(mut self, period: u32, service_length: u32) -> Self {
        self.exception_period = period;
        self.exception_service_length = service_length;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_memory(mut self, memory_footprint: MemoryMb) -> Self {
        self.memory_footprint = memory_footprint;
        self
    }
}

/// Flat per-process row for the terminated-process table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminatedRecord {
    pub id: ProcessId,
    pub name: String,
    pub state: ProcessState,
    pub program_counter: u32,
    pub memory_access_register: u32,
    pub remaining_instructions: u32,
    pub kind: ProcessKind,
    pub priority: Priority,
    pub memory_footprint: MemoryMb,
}

impl From<&ProcessRecord> for TerminatedRecord {
    fn from(record: &ProcessRecord) -> Self {
        Self {
            id: record.id(),
            name: record.name().to_string(),
            state: record.state(),
            program_counter: record.program_counter(),
            memory_access_register: record.memory_access_register(),
            remaining_instructions: record.remaining_instructions(),
            kind: record.kind(),
            priority: record.priority(),
            memory_footprint: record.memory_footprint(),
        }
    }
}
