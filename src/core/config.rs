/*!
 * Simulation Configuration
 *
 * Plain values the front end hands to the engine, with validation and
 * environment overrides
 */

use super::errors::ConfigError;
use super::types::{ConfigResult, MemoryMb};
use crate::scheduler::Algorithm;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shortest accepted cycle duration
pub const MIN_CYCLE_MS: u64 = 1;

/// Longest accepted cycle duration
pub const MAX_CYCLE_MS: u64 = 60_000;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Memory budget shared by admitted processes
    pub total_memory: MemoryMb,
    /// Algorithm the ready queue starts with
    pub start_algorithm: Algorithm,
    /// Wall-clock pause between cycles
    pub cycle_duration_ms: u64,
    /// Round-robin quantum in cycles
    #[serde(default = "default_time_quantum")]
    pub time_quantum: u32,
    /// Samples kept per history series
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Wall-clock length of one I/O service tick
    #[serde(default = "default_io_tick_ms")]
    pub io_tick_ms: u64,
}

fn default_time_quantum() -> u32 {
    4
}

fn default_history_capacity() -> usize {
    1_000
}

fn default_io_tick_ms() -> u64 {
    100
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_memory: 512,
            start_algorithm: Algorithm::Fcfs,
            cycle_duration_ms: 1_000,
            time_quantum: default_time_quantum(),
            history_capacity: default_history_capacity(),
            io_tick_ms: default_io_tick_ms(),
        }
    }
}

impl SimulationConfig {
    /// Configuration with the three front-end values and defaults elsewhere
    pub fn new(total_memory: MemoryMb, start_algorithm: Algorithm, cycle_duration_ms: u64) -> Self {
        Self {
            total_memory,
            start_algorithm,
            cycle_duration_ms,
            ..Self::default()
        }
    }

    /// Defaults overridden by environment variables
    ///
    /// Environment variables:
    /// - SCHED_TOTAL_MEMORY: memory budget in MB
    /// - SCHED_ALGORITHM: algorithm name (FCFS, SJF, SRTF, RR, PRIORITY, MLFQ, HRRN)
    /// - SCHED_CYCLE_MS: cycle duration in milliseconds
    /// - SCHED_TIME_QUANTUM: round-robin quantum in cycles
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading through an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("SCHED_TOTAL_MEMORY") {
            config.total_memory = parse_number("SCHED_TOTAL_MEMORY", &value)?;
        }
        if let Some(value) = lookup("SCHED_ALGORITHM") {
            config.start_algorithm = value.parse()?;
        }
        if let Some(value) = lookup("SCHED_CYCLE_MS") {
            config.cycle_duration_ms = parse_number("SCHED_CYCLE_MS", &value)?;
        }
        if let Some(value) = lookup("SCHED_TIME_QUANTUM") {
            config.time_quantum = parse_number("SCHED_TIME_QUANTUM", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.total_memory == 0 {
            return Err(ConfigError::InvalidMemory(self.total_memory));
        }
        if !(MIN_CYCLE_MS..=MAX_CYCLE_MS).contains(&self.cycle_duration_ms) {
            return Err(ConfigError::InvalidCycleDuration(self.cycle_duration_ms));
        }
        if self.time_quantum == 0 {
            return Err(ConfigError::InvalidQuantum(self.time_quantum));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidHistoryCapacity(self.history_capacity));
        }
        Ok(())
    }

    pub fn cycle_duration(&self) -> Duration {
        Duration::from_millis(self.cycle_duration_ms)
    }

    pub fn io_tick(&self) -> Duration {
        Duration::from_millis(self.io_tick_ms)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = SimulationConfig::new(0, Algorithm::Fcfs, 100);
        assert_eq!(config.validate(), Err(ConfigError::InvalidMemory(0)));

        config.total_memory = 256;
        config.cycle_duration_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidCycleDuration(0)));

        config.cycle_duration_ms = 10;
        config.time_quantum = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidQuantum(0)));
    }

    #[test]
    fn test_persisted_layout() {
        let config = SimulationConfig::new(1024, Algorithm::RoundRobin, 250);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["totalMemory"], 1024);
        assert_eq!(json["startAlgorithm"], "RR");
        assert_eq!(json["cycleDurationMs"], 250);

        let parsed: SimulationConfig = serde_json::from_str(
            r#"{"totalMemory":64,"startAlgorithm":"HRRN","cycleDurationMs":5}"#,
        )
        .unwrap();
        assert_eq!(parsed.start_algorithm, Algorithm::Hrrn);
        assert_eq!(parsed.time_quantum, 4);
    }

    #[test]
    fn test_lookup_overrides() {
        let env: HashMap<&str, &str> = [
            ("SCHED_TOTAL_MEMORY", "2048"),
            ("SCHED_ALGORITHM", "srtf"),
            ("SCHED_TIME_QUANTUM", "2"),
        ]
        .into_iter()
        .collect();

        let config =
            SimulationConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.total_memory, 2048);
        assert_eq!(config.start_algorithm, Algorithm::Srtf);
        assert_eq!(config.time_quantum, 2);
        assert_eq!(config.cycle_duration_ms, 1_000);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let result = SimulationConfig::from_lookup(|k| {
            (k == "SCHED_CYCLE_MS").then(|| "fast".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = SimulationConfig::from_lookup(|k| {
            (k == "SCHED_ALGORITHM").then(|| "EDF".to_string())
        });
        assert_eq!(result, Err(ConfigError::UnknownAlgorithm("EDF".into())));
    }
}
