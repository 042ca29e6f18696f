/*!
 * Engine Lifecycle
 * Start, stepped mode, and shutdown of the cycle driver and signalers
 */

use super::driver::CycleDriver;
use super::state::EngineState;
use super::Engine;
use crate::core::errors::EngineError;
use crate::core::types::EngineResult;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

impl Engine {
    /// Start advancing one cycle per cycle duration on a background task
    ///
    /// Uses the runtime given to the builder, or the ambient one. Starting a
    /// running engine is a no-op. Each start clears the history; processes
    /// left blocked by an earlier shutdown are armed again.
    pub fn start(&self) -> EngineResult<()> {
        let runtime = self
            .shared
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or(EngineError::RuntimeUnavailable)?;

        let mut driver = self.shared.driver.lock();
        if self.shared.running.swap(true, Ordering::SeqCst) {
            debug!("Engine already running");
            return Ok(());
        }
        self.mark_started();
        *driver = Some(CycleDriver::spawn(&runtime, self.downgrade()));

        info!(
            algorithm = %self.algorithm(),
            cycle_ms = self.cycle_duration().as_millis() as u64,
            total_memory = self.total_memory(),
            "Engine started"
        );
        Ok(())
    }

    /// Mark the engine running without a driver; the caller advances cycles
    ///
    /// Like `start`, this clears the history and re-arms every blocked
    /// process for a full service length.
    pub fn start_stepped(&self) {
        if self.shared.running.swap(true, Ordering::SeqCst) {
            return;
        }
        self.mark_started();
        info!(algorithm = %self.algorithm(), "Engine started in stepped mode");
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Stop the cycle loop and every pending completion signal
    ///
    /// A cycle already in progress completes; no further cycle starts.
    pub fn shutdown(&self) {
        // The driver task is left to exit on its own
        drop(self.stop());
    }

    /// Shut down, then wait for the driver task to exit
    pub async fn shutdown_and_wait(&self) {
        if let Some(handle) = self.stop() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Cycle driver exited abnormally");
            }
        }
    }

    fn stop(&self) -> Option<JoinHandle<()>> {
        let was_running = self.shared.running.swap(false, Ordering::SeqCst);
        let handle = self
            .shared
            .driver
            .lock()
            .as_mut()
            .and_then(CycleDriver::stop);
        self.shared.signaler.shutdown();

        // Taking the lock waits out an in-flight cycle
        let state = self.shared.state.lock();
        self.publish(&state);
        if was_running {
            info!(cycle = state.global_cycle, "Engine shut down");
        }
        handle
    }

    /// Reset the chart history and re-arm completions dropped by a shutdown
    fn mark_started(&self) {
        let mut state = self.shared.state.lock();
        state.started_at.get_or_insert_with(Instant::now);
        state.history.clear();

        let requests: Vec<_> = state.blocked.iter().map(EngineState::io_request).collect();
        if !requests.is_empty() {
            info!(blocked = requests.len(), "Re-arming I/O completions");
        }
        for request in requests {
            self.arm_completion(request);
        }
        self.publish(&state);
    }
}
