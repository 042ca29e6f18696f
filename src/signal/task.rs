/*!
 * Task Signaler
 * One tokio task per blocked process, sleeping one wall-clock tick per service tick
 */

use super::{CompletionSignaler, IoRequest, SignalError};
use crate::core::types::ProcessId;
use crate::engine::WeakEngine;
use crate::monitoring::span_io_completion;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn, Instrument};

type TaskTable = DashMap<ProcessId, (u64, JoinHandle<()>), RandomState>;

/// Completion signaler backed by tokio tasks
pub struct TaskSignaler {
    runtime: Handle,
    tick: Duration,
    // Generation tags keep a finished task from evicting its replacement
    tasks: Arc<TaskTable>,
    generation: AtomicU64,
}

impl TaskSignaler {
    pub fn new(runtime: Handle, tick: Duration) -> Self {
        Self {
            runtime,
            tick,
            tasks: Arc::new(DashMap::with_hasher(RandomState::new())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }
}

// Abort only lands at an await, so a replaced task may still reach the
// engine; the episode check there discards it
async fn serve(request: IoRequest, tick: Duration, engine: &WeakEngine) -> Result<(), SignalError> {
    let dropped = || SignalError::EngineDropped(request.pid);
    for _ in 0..request.service_ticks {
        tokio::time::sleep(tick).await;
        engine.upgrade().ok_or_else(dropped)?.service_io(request);
    }
    engine.upgrade().ok_or_else(dropped)?.complete_io(request);
    Ok(())
}

impl CompletionSignaler for TaskSignaler {
    fn arm(&self, request: IoRequest, engine: WeakEngine) {
        let IoRequest {
            pid,
            episode,
            service_ticks,
        } = request;
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let tasks = Arc::clone(&self.tasks);
        let tick = self.tick;

        let handle = self.runtime.spawn(
            async move {
                if let Err(e) = serve(request, tick, &engine).await {
                    warn!(pid, error = %e, "I/O completion abandoned");
                }
                tasks.remove_if(&pid, |_, (tag, _)| *tag == generation);
            }
            .instrument(span_io_completion(pid, service_ticks)),
        );

        // A zero-tick task may already be done; drop stale entries first
        self.tasks.retain(|_, (_, task)| !task.is_finished());
        if let Some((_, previous)) = self.tasks.insert(pid, (generation, handle)) {
            previous.abort();
        }
        debug!(pid, episode, service_ticks, "I/O completion armed");
    }

    fn pending(&self) -> usize {
        self.tasks
            .iter()
            .filter(|entry| !entry.value().1.is_finished())
            .count()
    }

    fn shutdown(&self) {
        let pids: Vec<ProcessId> = self.tasks.iter().map(|entry| *entry.key()).collect();
        for pid in pids {
            if let Some((_, (_, task))) = self.tasks.remove(&pid) {
                task.abort();
            }
        }
        debug!("Task signaler shut down");
    }
}
