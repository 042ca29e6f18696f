/*!
 * Completion Signaling
 *
 * A blocked process is serviced for a number of I/O ticks and then moved
 * back to READY. Signalers own that countdown: every tick advances the
 * process's memory access register, the last one unblocks it.
 *
 * `arm` is called while the engine lock is held, so a signaler must never
 * call back into the engine from inside `arm`.
 */

mod task;
mod virtual_clock;

pub use task::TaskSignaler;
pub use virtual_clock::VirtualClock;

use crate::core::types::ProcessId;
use crate::engine::WeakEngine;
use miette::Diagnostic;
use thiserror::Error;

/// One blocking episode of one process
///
/// The engine only honours ticks and completions whose episode matches the
/// process's current one, so a late signal from an earlier block is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoRequest {
    pub pid: ProcessId,
    pub episode: u32,
    pub service_ticks: u32,
}

/// Delivers I/O completions to the engine
pub trait CompletionSignaler: Send + Sync {
    /// Begin servicing a process that just blocked
    ///
    /// Re-arming a pid replaces whatever was pending for it.
    fn arm(&self, request: IoRequest, engine: WeakEngine);

    /// Armed completions not yet delivered
    fn pending(&self) -> usize;

    /// Drop every pending completion
    fn shutdown(&self);
}

/// Reasons a completion could not be delivered
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Diagnostic)]
pub enum SignalError {
    #[error("Engine dropped before completion of process {0}")]
    #[diagnostic(code(signal::engine_dropped))]
    EngineDropped(ProcessId),
}
