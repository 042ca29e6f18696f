/*!
 * Synchronization Primitives
 *
 * Read-optimized publication for engine snapshots. All mutation goes through
 * the engine lock; observers only ever load.
 */

mod rcu;

pub use rcu::RcuCell;
