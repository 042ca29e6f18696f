/*!
 * Engine Builder
 * Builder pattern for Engine construction
 */

use super::driver::CycleDriver;
use super::snapshot::Snapshots;
use super::state::EngineState;
use super::{Engine, Shared};
use crate::core::config::{SimulationConfig, MAX_CYCLE_MS, MIN_CYCLE_MS};
use crate::core::errors::ConfigError;
use crate::core::id::{AtomicGenerator, IdGenerator};
use crate::scheduler::Algorithm;
use crate::signal::{CompletionSignaler, TaskSignaler, VirtualClock};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

/// Builder for Engine
pub struct EngineBuilder {
    config: SimulationConfig,
    signaler: Option<Arc<dyn CompletionSignaler>>,
    ids: Option<Arc<dyn IdGenerator>>,
    runtime: Option<Handle>,
}

impl EngineBuilder {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            signaler: None,
            ids: None,
            runtime: None,
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config.start_algorithm = algorithm;
        self
    }

    /// Round-robin quantum in cycles
    pub fn with_time_quantum(mut self, quantum: u32) -> Self {
        self.config.time_quantum = quantum;
        self
    }

    /// Samples kept per history series
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Wall-clock length of one I/O service tick for the default signaler
    pub fn with_io_tick(mut self, tick: Duration) -> Self {
        self.config.io_tick_ms = tick.as_millis() as u64;
        self
    }

    /// Replace the completion signaler
    pub fn with_signaler(mut self, signaler: Arc<dyn CompletionSignaler>) -> Self {
        self.signaler = Some(signaler);
        self
    }

    /// Replace the process id source
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Runtime for the cycle driver and default signaler tasks
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Validate the configuration, then build
    pub fn try_build(self) -> Result<Engine, ConfigError> {
        self.config.validate()?;
        Ok(self.build())
    }

    /// Build the engine, clamping out-of-range values instead of failing
    ///
    /// Without an explicit signaler, blocked processes are serviced by tokio
    /// tasks when a runtime is available and by a `VirtualClock` otherwise.
    pub fn build(self) -> Engine {
        let config = self.config;
        let runtime = self.runtime.or_else(|| Handle::try_current().ok());

        let signaler: Arc<dyn CompletionSignaler> = match (self.signaler, &runtime) {
            (Some(signaler), _) => signaler,
            (None, Some(handle)) => Arc::new(TaskSignaler::new(handle.clone(), config.io_tick())),
            (None, None) => {
                debug!("No tokio runtime; I/O completions wait on a virtual clock");
                Arc::new(VirtualClock::new())
            }
        };
        let ids: Arc<dyn IdGenerator> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(AtomicGenerator::default_start()),
        };

        let state = EngineState::new(
            config.total_memory,
            config.start_algorithm,
            config.time_quantum,
            config.history_capacity,
        );
        let snapshots = Snapshots::default();
        snapshots.publish(&state);

        debug!(
            total_memory = config.total_memory,
            algorithm = %config.start_algorithm,
            cycle_ms = config.cycle_duration_ms,
            quantum = config.time_quantum,
            "Engine built"
        );

        Engine {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                snapshots,
                running: AtomicBool::new(false),
                cycle_duration_ms: AtomicU64::new(
                    config.cycle_duration_ms.clamp(MIN_CYCLE_MS, MAX_CYCLE_MS),
                ),
                signaler,
                ids,
                runtime,
                driver: Mutex::new(None::<CycleDriver>),
            }),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
