/*!
 * Cycle Driver
 *
 * Background tokio task that advances the engine once per cycle duration.
 *
 * Shutdown is two-layered:
 * 1. `stop()` sends a shutdown command and hands back the join handle so
 *    callers can await completion.
 * 2. `Drop` aborts the task, with a warning, if `stop()` was never called.
 *
 * The task holds only a weak engine handle, so dropping the last `Engine`
 * ends the loop on its next tick.
 */

use super::WeakEngine;
use crate::monitoring::span_driver;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn, Instrument};

/// Control messages for the driver task
#[derive(Debug, Clone)]
pub(crate) enum DriverCommand {
    Shutdown,
}

/// Handle to the running cycle loop
pub(crate) struct CycleDriver {
    command_tx: mpsc::UnboundedSender<DriverCommand>,
    handle: Option<JoinHandle<()>>,
    shutdown_initiated: bool,
}

impl CycleDriver {
    pub fn spawn(runtime: &Handle, engine: WeakEngine) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let handle = runtime.spawn(run_cycle_loop(engine, command_rx).instrument(span_driver()));

        Self {
            command_tx,
            handle: Some(handle),
            shutdown_initiated: false,
        }
    }

    /// Ask the loop to exit; returns the handle to await, once
    pub fn stop(&mut self) -> Option<JoinHandle<()>> {
        self.shutdown_initiated = true;
        let _ = self.command_tx.send(DriverCommand::Shutdown);
        self.handle.take()
    }
}

async fn run_cycle_loop(
    engine: WeakEngine,
    mut command_rx: mpsc::UnboundedReceiver<DriverCommand>,
) {
    info!("Cycle driver started");

    loop {
        // Strong handle only for the duration of one cycle; the duration is
        // read here so a change applies from the next sleep on
        let period = {
            let Some(engine) = engine.upgrade() else {
                warn!("Engine dropped, cycle driver exiting");
                break;
            };
            if engine.advance_cycle().is_none() {
                break;
            }
            engine.cycle_duration()
        };

        tokio::select! {
            _ = sleep(period) => {}
            command = command_rx.recv() => match command {
                Some(DriverCommand::Shutdown) | None => break,
            }
        }
    }

    info!("Cycle driver stopped");
}

impl Drop for CycleDriver {
    fn drop(&mut self) {
        if self.shutdown_initiated {
            return;
        }
        if let Some(handle) = self.handle.take() {
            warn!("Cycle driver dropped without shutdown; aborting task");
            let _ = self.command_tx.send(DriverCommand::Shutdown);
            handle.abort();
        }
    }
}
