/*!
 * Scheduling Engine
 *
 * Discrete-cycle CPU scheduler. One mutex guards every queue and counter;
 * each mutation republishes lock-free snapshots for observers.
 *
 * Per cycle:
 * 1. Record a history sample
 * 2. Admit the head of the new queue if it fits in memory
 * 3. Resume the oldest suspended process if it fits
 * 4. Suspend the oldest blocked process if the new-queue head is starved
 * 5. Dispatch when the CPU is free or the round-robin quantum expired
 * 6. Execute one instruction and react (continue, block, terminate)
 * 7. Charge one waiting cycle to every ready process
 */

mod admission;
mod builder;
mod cycle;
mod driver;
mod invariants;
mod lifecycle;
pub mod metrics;
mod operations;
pub mod snapshot;
mod state;

pub use builder::EngineBuilder;
pub use metrics::{EngineStats, PerformanceMetrics};
pub use snapshot::{EngineStatus, HistorySnapshot};
pub use state::HistorySample;

use crate::core::config::SimulationConfig;
use crate::core::errors::ConfigError;
use crate::core::id::IdGenerator;
use crate::core::types::MemoryMb;
use crate::scheduler::Algorithm;
use crate::signal::CompletionSignaler;
use driver::CycleDriver;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use snapshot::Snapshots;
use state::EngineState;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;

/// Container that currently owns a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueLocation {
    New,
    Ready,
    Blocked,
    Suspended,
    Terminated,
    /// The running slot
    Current,
}

impl fmt::Display for QueueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueueLocation::New => "new queue",
            QueueLocation::Ready => "ready queue",
            QueueLocation::Blocked => "blocked queue",
            QueueLocation::Suspended => "suspended queue",
            QueueLocation::Terminated => "terminated list",
            QueueLocation::Current => "CPU",
        };
        f.write_str(name)
    }
}

pub(crate) struct Shared {
    state: Mutex<EngineState>,
    snapshots: Snapshots,
    running: AtomicBool,
    cycle_duration_ms: AtomicU64,
    signaler: Arc<dyn CompletionSignaler>,
    ids: Arc<dyn IdGenerator>,
    runtime: Option<Handle>,
    driver: Mutex<Option<CycleDriver>>,
}

/// Handle to a scheduling engine
///
/// Cheap to clone; all clones drive the same simulation.
#[derive(Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

impl Engine {
    /// Engine with default quantum, history, and signaler
    pub fn new(total_memory: MemoryMb, algorithm: Algorithm, cycle_duration_ms: u64) -> Self {
        let config = SimulationConfig::new(total_memory, algorithm, cycle_duration_ms);
        EngineBuilder::new(config).build()
    }

    /// Engine from a validated configuration
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        EngineBuilder::new(config.clone()).try_build()
    }

    pub fn builder(config: SimulationConfig) -> EngineBuilder {
        EngineBuilder::new(config)
    }

    /// Handle that does not keep the engine alive
    pub fn downgrade(&self) -> WeakEngine {
        WeakEngine {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Number of armed I/O completions not yet delivered
    pub fn pending_completions(&self) -> usize {
        self.shared.signaler.pending()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status();
        f.debug_struct("Engine")
            .field("running", &self.is_running())
            .field("global_cycle", &status.global_cycle)
            .field("algorithm", &status.algorithm)
            .field("used_memory", &status.used_memory)
            .field("total_memory", &status.total_memory)
            .finish()
    }
}

/// Weak engine handle held by background tasks and signalers
#[derive(Clone)]
pub struct WeakEngine {
    shared: Weak<Shared>,
}

impl WeakEngine {
    pub fn upgrade(&self) -> Option<Engine> {
        self.shared.upgrade().map(|shared| Engine { shared })
    }
}

impl fmt::Debug for WeakEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakEngine")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}
