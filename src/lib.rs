/*!
 * CPU Scheduling Simulator
 * Discrete-cycle scheduling engine exposed as a library
 *
 * Processes move through NEW, READY, RUNNING, BLOCKED, SUSPENDED, and
 * TERMINATED under one of seven ready-queue orderings, with long-term
 * admission and medium-term swapping against a fixed memory budget.
 */

pub mod core;
pub mod engine;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod signal;

// Re-exports
pub use crate::core::{
    AtomicGenerator, ConfigError, EngineError, IdGenerator, InvariantViolation, SimulationConfig,
};
pub use engine::{
    Engine, EngineBuilder, EngineStats, EngineStatus, HistorySnapshot, PerformanceMetrics,
    QueueLocation, WeakEngine,
};
pub use monitoring::init_tracing;
pub use process::{ProcessDescriptor, ProcessKind, ProcessRecord, ProcessState, TerminatedRecord};
pub use scheduler::{Algorithm, ProcessHeap};
pub use signal::{CompletionSignaler, IoRequest, TaskSignaler, VirtualClock};
