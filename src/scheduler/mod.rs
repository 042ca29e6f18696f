/*!
 * Scheduler Module
 * Scheduling algorithms and the ready-queue heap they order
 */

pub mod heap;
pub mod policy;
pub mod types;

pub use heap::ProcessHeap;
pub use policy::Comparator;
pub use types::Algorithm;
