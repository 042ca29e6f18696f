/*!
 * Process Descriptor Validation
 * Collaborator-side checks run before a descriptor reaches the engine
 */

use super::types::ProcessDescriptor;
use crate::core::errors::ConfigError;
use crate::core::types::{ConfigResult, MemoryMb};

/// Longest accepted process name
pub const MAX_NAME_LEN: usize = 64;

impl ProcessDescriptor {
    /// Check that the descriptor describes a process that can ever run
    ///
    /// The engine itself accepts any descriptor; a process larger than total
    /// memory would sit at the head of the admission queue forever.
    pub fn validate(&self, total_memory: MemoryMb) -> ConfigResult<()> {
        let reject = |reason: String| {
            Err(ConfigError::InvalidDescriptor {
                name: self.name.clone(),
                reason,
            })
        };

        if self.name.trim().is_empty() {
            return reject("name cannot be empty".to_string());
        }

        if self.name.len() > MAX_NAME_LEN {
            return reject(format!("name longer than {} bytes", MAX_NAME_LEN));
        }

        if self.total_instructions == 0 {
            return reject("instruction count must be positive".to_string());
        }

        if self.memory_footprint > total_memory {
            return reject(format!(
                "needs {} MB but only {} MB exist",
                self.memory_footprint, total_memory
            ));
        }

        if self.exception_period > 0 && self.exception_service_length == 0 {
            return reject("I/O events need a service length of at least one tick".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_descriptor() {
        let d = ProcessDescriptor::io_bound("io", 10, 3, 2).with_memory(256);
        assert!(d.validate(512).is_ok());
    }

    #[test]
    fn test_rejects_oversized_process() {
        let d = ProcessDescriptor::cpu_bound("big", 10).with_memory(1024);
        assert!(matches!(
            d.validate(512),
            Err(ConfigError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_program_and_name() {
        assert!(ProcessDescriptor::cpu_bound("p", 0).validate(512).is_err());
        assert!(ProcessDescriptor::cpu_bound("  ", 5).validate(512).is_err());
        assert!(ProcessDescriptor::cpu_bound("x".repeat(65), 5)
            .validate(512)
            .is_err());
    }

    #[test]
    fn test_rejects_instant_io() {
        let d = ProcessDescriptor::cpu_bound("p", 10).with_exceptions(4, 0);
        assert!(d.validate(512).is_err());
    }
}
