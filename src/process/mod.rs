/*!
 * Process Module
 * Simulated process records, lifecycle states, and descriptors
 */

pub mod pcb;
pub mod types;
mod validation;

// Re-export for convenience
pub use pcb::ProcessRecord;
pub use types::{
    ExecutionOutcome, ProcessDescriptor, ProcessKind, ProcessState, TerminatedRecord,
};
pub use validation::MAX_NAME_LEN;
