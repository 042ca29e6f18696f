/*!
 * RCU Cell
 * Published engine snapshots: the writer swaps in whole copies, readers never lock
 */

use arc_swap::ArcSwap;
use std::sync::Arc;

/// Atomically replaceable snapshot
///
/// The engine rebuilds a value under its own lock and stores it here; an
/// observer's `load` is a single atomic pointer read and keeps the version
/// it got alive for as long as it holds the `Arc`.
///
/// ```
/// use cpu_sched_sim::core::sync::RcuCell;
///
/// let ready = RcuCell::new(vec![3, 1]);
/// let seen = ready.load();
/// ready.store(vec![1]);
///
/// assert_eq!(*seen, vec![3, 1]);
/// assert_eq!(*ready.load(), vec![1]);
/// ```
pub struct RcuCell<T> {
    current: ArcSwap<T>,
}

impl<T> RcuCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: ArcSwap::from_pointee(value),
        }
    }

    /// Latest published version
    #[inline]
    pub fn load(&self) -> Arc<T> {
        self.current.load_full()
    }

    /// Publish a new version
    #[inline]
    pub fn store(&self, value: T) {
        self.current.store(Arc::new(value));
    }
}

impl<T: Default> Default for RcuCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RcuCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RcuCell").field(&self.load()).finish()
    }
}
