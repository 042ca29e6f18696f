/*!
 * ID Generation
 * Process id allocation behind a substitutable generator interface
 */

use super::types::ProcessId;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Source of process ids
///
/// Ids handed out by one generator are unique and strictly increasing;
/// they are never recycled because terminated records stay readable.
/// The engine calls `next` while holding its lock, so creation order and id
/// order agree.
pub trait IdGenerator: Send + Sync {
    fn next(&self) -> ProcessId;

    /// Id the following `next` call would hand out
    fn peek(&self) -> ProcessId;
}

/// Shared counter generator
///
/// Clones draw from the same counter, which lets several engines in one
/// test harness keep process ids globally distinct.
#[derive(Clone)]
pub struct AtomicGenerator {
    next_id: Arc<AtomicU32>,
}

impl AtomicGenerator {
    pub fn new(first: ProcessId) -> Self {
        Self {
            next_id: Arc::new(AtomicU32::new(first)),
        }
    }

    /// Generator whose first id is 1
    pub fn default_start() -> Self {
        Self::new(1)
    }
}

impl Default for AtomicGenerator {
    fn default() -> Self {
        Self::default_start()
    }
}

impl IdGenerator for AtomicGenerator {
    fn next(&self) -> ProcessId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn peek(&self) -> ProcessId {
        self.next_id.load(Ordering::Relaxed)
    }
}
