/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{MemoryMb, ProcessId};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors, raised while parsing or validating simulator input
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid total memory: {0} MB")]
    #[diagnostic(
        code(config::invalid_memory),
        help("Total memory must be greater than zero.")
    )]
    InvalidMemory(MemoryMb),

    #[error("Unknown scheduling algorithm '{0}'")]
    #[diagnostic(
        code(config::unknown_algorithm),
        help("Valid: FCFS, SJF, SRTF, RR, PRIORITY, MLFQ, HRRN.")
    )]
    UnknownAlgorithm(String),

    #[error("Invalid cycle duration: {0} ms")]
    #[diagnostic(
        code(config::invalid_cycle_duration),
        help("Cycle duration must be between 1 ms and 60000 ms.")
    )]
    InvalidCycleDuration(u64),

    #[error("Invalid time quantum: {0}")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("Round-robin quantum must be at least one cycle.")
    )]
    InvalidQuantum(u32),

    #[error("Invalid history capacity: {0}")]
    #[diagnostic(
        code(config::invalid_history_capacity),
        help("History must keep at least one sample.")
    )]
    InvalidHistoryCapacity(usize),

    #[error("Invalid process descriptor '{name}': {reason}")]
    #[diagnostic(
        code(config::invalid_descriptor),
        help("Check instruction count and memory footprint against the configured memory.")
    )]
    InvalidDescriptor { name: String, reason: String },

    #[error("Invalid value for {key}: '{value}'")]
    #[diagnostic(
        code(config::invalid_value),
        help("Environment overrides must be plain integers or algorithm names.")
    )]
    InvalidValue { key: String, value: String },
}

/// Engine lifecycle errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum EngineError {
    #[error("No tokio runtime available to drive the cycle loop")]
    #[diagnostic(
        code(engine::runtime_unavailable),
        help(
            "Call start() inside a tokio runtime or pass one with \
             EngineBuilder::with_runtime; start_stepped() needs no runtime."
        )
    )]
    RuntimeUnavailable,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Broken engine invariant, reported by the ownership and accounting audit
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum InvariantViolation {
    #[error("Process {0} is held by more than one container")]
    #[diagnostic(code(invariant::duplicate_owner))]
    DuplicateOwner(ProcessId),

    #[error("Process {pid} is in state {state} but held by {location}")]
    #[diagnostic(code(invariant::state_mismatch))]
    StateMismatch {
        pid: ProcessId,
        state: String,
        location: String,
    },

    #[error("Memory over-committed: {used} MB used of {total} MB")]
    #[diagnostic(code(invariant::memory_over_commit))]
    MemoryOverCommit { used: MemoryMb, total: MemoryMb },

    #[error("Memory accounting drift: {used} MB recorded, {expected} MB resident")]
    #[diagnostic(code(invariant::memory_accounting))]
    MemoryAccounting { used: MemoryMb, expected: MemoryMb },

    #[error("Ready heap order broken at index {0}")]
    #[diagnostic(code(invariant::heap_order))]
    HeapOrder(usize),

    #[error("Lost processes: {expected} created, {found} accounted for")]
    #[diagnostic(code(invariant::lost_process))]
    LostProcess { expected: usize, found: usize },
}
