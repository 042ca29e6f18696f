/*!
 * Virtual Clock
 *
 * Deterministic signaler: service ticks elapse only when the owner calls
 * `advance`. Used by stepped simulations and tests.
 */

use super::{CompletionSignaler, IoRequest};
use crate::engine::WeakEngine;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

struct Pending {
    request: IoRequest,
    remaining: u32,
    engine: WeakEngine,
}

#[derive(Default)]
struct ClockState {
    now: u64,
    pending: Vec<Pending>,
}

/// Manually advanced completion signaler
///
/// Clones share one clock, so a test can keep a handle while the engine
/// owns another.
#[derive(Clone, Default)]
pub struct VirtualClock {
    inner: Arc<Mutex<ClockState>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks elapsed so far
    pub fn now(&self) -> u64 {
        self.inner.lock().now
    }

    /// Let `ticks` service ticks elapse, returning how many completions fired
    ///
    /// Each tick services every pending process once and unblocks those
    /// whose countdown hit zero. A zero-length countdown fires on the first
    /// tick without being serviced. Engine calls happen with the clock
    /// unlocked.
    pub fn advance(&self, ticks: u32) -> usize {
        let mut fired = 0;

        for _ in 0..ticks {
            let (serviced, due) = {
                let mut clock = self.inner.lock();
                clock.now += 1;

                let mut serviced = Vec::new();
                for entry in clock.pending.iter_mut().filter(|p| p.remaining > 0) {
                    entry.remaining -= 1;
                    serviced.push((entry.request, entry.engine.clone()));
                }
                let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut clock.pending)
                    .into_iter()
                    .partition(|p| p.remaining == 0);
                clock.pending = waiting;
                (serviced, due)
            };

            for (request, engine) in serviced {
                if let Some(engine) = engine.upgrade() {
                    engine.service_io(request);
                }
            }
            for entry in due {
                let pid = entry.request.pid;
                match entry.engine.upgrade() {
                    Some(engine) => {
                        engine.complete_io(entry.request);
                        fired += 1;
                    }
                    None => warn!(pid, "Engine dropped before I/O completion"),
                }
            }
        }

        fired
    }
}

impl CompletionSignaler for VirtualClock {
    fn arm(&self, request: IoRequest, engine: WeakEngine) {
        let mut clock = self.inner.lock();
        clock.pending.retain(|p| p.request.pid != request.pid);
        clock.pending.push(Pending {
            request,
            remaining: request.service_ticks,
            engine,
        });
        debug!(
            pid = request.pid,
            episode = request.episode,
            service_ticks = request.service_ticks,
            at = clock.now,
            "I/O completion armed"
        );
    }

    fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }

    fn shutdown(&self) {
        self.inner.lock().pending.clear();
    }
}
