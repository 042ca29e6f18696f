/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process identifier, unique per engine and never reused
pub type ProcessId = u32;

/// Simulated time, counted in cycles since the engine was created
pub type Cycle = u64;

/// Memory quantity in megabytes
pub type MemoryMb = u32;

/// Scheduling priority (lower is more urgent)
pub type Priority = u32;

/// Common result type for engine lifecycle operations
pub type EngineResult<T> = Result<T, super::errors::EngineError>;

/// Common result type for configuration parsing and validation
pub type ConfigResult<T> = Result<T, super::errors::ConfigError>;
